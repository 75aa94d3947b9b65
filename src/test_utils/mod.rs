pub mod fixtures;

pub mod test_helpers {
    use crate::config::CONTAINER_ID;
    use crate::dom::Page;
    use crate::inputs::{HostSignal, NavigationWatcher, PointerEvent};
    use crate::scheduler::ManualScheduler;
    use crate::supervisor::{SupervisorSnapshot, TocSupervisor};
    use std::rc::Rc;
    use std::time::Duration;

    /// A page, a virtual clock and a supervisor wired together.
    pub struct Harness {
        pub page: Rc<Page>,
        pub scheduler: Rc<ManualScheduler>,
        pub supervisor: TocSupervisor,
    }

    impl Harness {
        pub fn new(body: &str, location: &str) -> Self {
            let page = Rc::new(super::fixtures::page(body, location));
            let scheduler = Rc::new(ManualScheduler::new());
            let supervisor = TocSupervisor::new(page.clone(), scheduler.clone());
            Self {
                page,
                scheduler,
                supervisor,
            }
        }

        pub fn with_watcher(
            body: &str,
            location: &str,
            watcher: impl FnOnce(&Page) -> Box<dyn NavigationWatcher>,
        ) -> Self {
            let page = Rc::new(super::fixtures::page(body, location));
            let scheduler = Rc::new(ManualScheduler::new());
            let watcher = watcher(&page);
            let supervisor = TocSupervisor::with_watcher(page.clone(), scheduler.clone(), watcher);
            Self {
                page,
                scheduler,
                supervisor,
            }
        }

        pub fn start(&self) -> &Self {
            self.supervisor.start();
            self
        }

        pub fn advance_ms(&self, millis: u64) -> usize {
            self.scheduler.advance(Duration::from_millis(millis))
        }

        pub fn enter(&self) {
            self.supervisor.pointer(PointerEvent::Enter);
        }

        pub fn leave(&self) {
            self.supervisor.pointer(PointerEvent::Leave);
        }

        /// Client-side navigation: swap the body, move the location, then let
        /// the mutation observer fire.
        pub fn navigate(&self, location: &str, body: &str) {
            self.page.replace_body(body);
            self.page.set_location(location);
            self.supervisor.notify(HostSignal::DomMutated);
        }

        pub fn panel_count(&self) -> usize {
            self.page.count_by_id(CONTAINER_ID)
        }

        pub fn snapshot(&self) -> SupervisorSnapshot {
            self.supervisor.snapshot()
        }
    }
}
