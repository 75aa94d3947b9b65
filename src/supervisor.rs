use crate::config::{CONTAINER_ID, Timings};
use crate::dom::{self, Page};
use crate::error::PanelError;
use crate::inputs::{
    HostSignal, HoverPhase, HoverTracker, LocationPoller, NavigationWatcher, PointerEvent,
};
use crate::parsing::TocParser;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::widget::TocPanel;
use markup5ever_rcdom::Handle;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Not started, or reset by a navigation and about to run again.
    Idle,
    /// Waiting for the next retry.
    Searching,
    Mounted,
    /// Retry budget spent; only a navigation revives the pipeline.
    GaveUp,
    /// The page removed our panel; the next host signal searches again.
    Lost,
}

/// The mounted root plus its hover state.
///
/// `is_mounted()` and `is_expanded()` are only ever true while the root is
/// attached under `document`; [`PanelState::teardown`] clears everything at once.
#[derive(Debug, Default)]
pub struct PanelState {
    root: Option<Handle>,
    hover: HoverTracker,
}

impl PanelState {
    fn with_tracker(hover: HoverTracker) -> Self {
        Self { root: None, hover }
    }

    pub fn is_mounted(&self, document: &Handle) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| dom::is_descendant_of(root, document))
    }

    pub fn is_expanded(&self, document: &Handle) -> bool {
        self.is_mounted(document) && self.hover.is_expanded()
    }

    pub fn has_pending_collapse(&self) -> bool {
        self.hover.has_pending_collapse()
    }

    pub fn phase(&self) -> HoverPhase {
        self.hover.phase()
    }

    fn attach(&mut self, root: Handle) {
        self.hover.reset();
        self.root = Some(root);
    }

    /// Cancels any pending collapse, detaches the root and resets both flags.
    fn teardown(&mut self) -> bool {
        self.hover.reset();
        match self.root.take() {
            Some(root) => {
                TocPanel::unmount(&root);
                true
            }
            None => false,
        }
    }
}

/// Point-in-time view of a supervisor, for tests and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorSnapshot {
    pub mounted: bool,
    pub expanded: bool,
    pub pending_collapse: bool,
    pub attempts: u32,
    pub status: PipelineStatus,
    pub cycle: u64,
    pub location: String,
}

struct SupervisorState {
    panel: PanelState,
    watcher: Box<dyn NavigationWatcher>,
    timings: Timings,
    attempts: u32,
    status: PipelineStatus,
    pending_retry: Option<TaskHandle>,
    cycle: u64,
}

/// Owns the detect → parse → mount pipeline for one page.
///
/// Retries while the TOC has not rendered yet, tears down and starts over on
/// navigation, and routes pointer events to the hover state machine. Clones
/// share the same state; scheduled callbacks only hold weak references, so
/// dropping every clone stops the pipeline.
#[derive(Clone)]
pub struct TocSupervisor {
    page: Rc<Page>,
    scheduler: Rc<dyn Scheduler>,
    state: Rc<RefCell<SupervisorState>>,
}

struct WeakSupervisor {
    page: Weak<Page>,
    scheduler: Weak<dyn Scheduler>,
    state: Weak<RefCell<SupervisorState>>,
}

impl WeakSupervisor {
    fn upgrade(&self) -> Option<TocSupervisor> {
        Some(TocSupervisor {
            page: self.page.upgrade()?,
            scheduler: self.scheduler.upgrade()?,
            state: self.state.upgrade()?,
        })
    }
}

impl TocSupervisor {
    pub fn new(page: Rc<Page>, scheduler: Rc<dyn Scheduler>) -> Self {
        let watcher = Box::new(LocationPoller::new(&page));
        Self::with_watcher(page, scheduler, watcher)
    }

    pub fn with_watcher(
        page: Rc<Page>,
        scheduler: Rc<dyn Scheduler>,
        watcher: Box<dyn NavigationWatcher>,
    ) -> Self {
        let timings = Timings::DEFAULT;
        let state = SupervisorState {
            panel: PanelState::with_tracker(HoverTracker::with_delay(timings.collapse_delay)),
            watcher,
            timings,
            attempts: 0,
            status: PipelineStatus::Idle,
            pending_retry: None,
            cycle: 0,
        };

        Self {
            page,
            scheduler,
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn page(&self) -> &Rc<Page> {
        &self.page
    }

    pub fn timings(&self) -> Timings {
        self.state.borrow().timings
    }

    /// Runs the first attempt right away. Calling it again while the pipeline
    /// is already running or finished does nothing.
    pub fn start(&self) {
        if self.state.borrow().status != PipelineStatus::Idle {
            log::debug!("TOC pipeline already started");
            return;
        }
        log::info!("Starting TOC pipeline for {}", self.page.location());
        self.run_attempt(0);
    }

    /// Feeds a host notification to the navigation watcher. A route change tears
    /// the panel down and restarts the pipeline with a fresh retry budget.
    pub fn notify(&self, signal: HostSignal) {
        let (changed, lost_panel) = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let changed = state.watcher.observe(&self.page, &signal);
            let lost_panel = !changed
                && (self.reconcile(state) || state.status == PipelineStatus::Lost);
            (changed, lost_panel)
        };

        if changed {
            log::info!("Navigation detected, rebuilding TOC for {}", self.page.location());
            self.restart();
        } else if lost_panel {
            log::info!("TOC panel was removed by the page, searching again");
            self.restart();
        }
    }

    pub fn pointer(&self, event: PointerEvent) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        self.reconcile(state);
        let Some(root) = state.panel.root.clone() else {
            return;
        };

        match event {
            PointerEvent::Enter => {
                if state.panel.hover.pointer_enter() {
                    TocPanel::set_expanded(&root, true);
                }
            }
            PointerEvent::Leave => {
                let weak = self.downgrade();
                state.panel.hover.pointer_leave(
                    self.scheduler.as_ref(),
                    Box::new(move || {
                        if let Some(supervisor) = weak.upgrade() {
                            supervisor.collapse_elapsed();
                        }
                    }),
                );
            }
        }
    }

    pub fn snapshot(&self) -> SupervisorSnapshot {
        let state = self.state.borrow();
        let document = self.page.document();
        SupervisorSnapshot {
            mounted: state.panel.is_mounted(document),
            expanded: state.panel.is_expanded(document),
            pending_collapse: state.panel.has_pending_collapse(),
            attempts: state.attempts,
            status: state.status,
            cycle: state.cycle,
            location: self.page.location(),
        }
    }

    fn restart(&self) {
        {
            let mut state = self.state.borrow_mut();
            if let Some(retry) = state.pending_retry.take() {
                retry.cancel();
            }
            state.panel.teardown();
            state.attempts = 0;
            state.status = PipelineStatus::Idle;
            state.cycle += 1;
        }
        self.run_attempt(0);
    }

    fn run_attempt(&self, attempt: u32) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.pending_retry = None;
        self.reconcile(state);

        if state.panel.is_mounted(self.page.document()) {
            log::debug!("Attempt {attempt} skipped, panel already mounted");
            return;
        }
        if self.page.element_by_id(CONTAINER_ID).is_some() {
            log::debug!("Attempt {attempt} skipped, a panel is already in the document");
            return;
        }

        state.attempts += 1;
        match TocParser::parse_page(&self.page) {
            Some(items) => match TocPanel::mount(&self.page, &items) {
                Ok(root) => {
                    state.panel.attach(root);
                    state.status = PipelineStatus::Mounted;
                    log::debug!("TOC mounted on attempt {attempt}");
                    return;
                }
                Err(PanelError::AlreadyMounted(id)) => {
                    log::debug!("Attempt {attempt}: `{id}` appeared meanwhile, nothing to do");
                    return;
                }
                Err(e) => log::warn!("Attempt {attempt}: could not mount TOC panel: {e}"),
            },
            None => log::debug!("Attempt {attempt}: no TOC on the page yet"),
        }

        if attempt >= state.timings.max_retries {
            state.status = PipelineStatus::GaveUp;
            log::info!(
                "Giving up on TOC for {} after {} of {} attempts",
                self.page.location(),
                state.attempts,
                state.timings.max_attempts()
            );
            return;
        }

        state.status = PipelineStatus::Searching;
        let weak = self.downgrade();
        let cycle = state.cycle;
        let next = attempt + 1;
        state.pending_retry = Some(self.scheduler.schedule(
            state.timings.retry_interval,
            Box::new(move || {
                if let Some(supervisor) = weak.upgrade() {
                    supervisor.retry(cycle, next);
                }
            }),
        ));
    }

    fn retry(&self, cycle: u64, attempt: u32) {
        if self.state.borrow().cycle != cycle {
            return;
        }
        self.run_attempt(attempt);
    }

    fn collapse_elapsed(&self) {
        let mut state = self.state.borrow_mut();
        let Some(root) = state.panel.root.clone() else {
            return;
        };
        if state.panel.hover.collapse_elapsed() {
            TocPanel::set_expanded(&root, false);
        }
    }

    /// Drops the panel state if the host removed our root behind our back and
    /// marks the pipeline [`PipelineStatus::Lost`]. Returns true when that happened.
    fn reconcile(&self, state: &mut SupervisorState) -> bool {
        let detached = state
            .panel
            .root
            .as_ref()
            .is_some_and(|root| !dom::is_descendant_of(root, self.page.document()));
        if detached {
            state.panel.teardown();
            state.status = PipelineStatus::Lost;
        }
        detached
    }

    fn downgrade(&self) -> WeakSupervisor {
        WeakSupervisor {
            page: Rc::downgrade(&self.page),
            scheduler: Rc::downgrade(&self.scheduler),
            state: Rc::downgrade(&self.state),
        }
    }
}
