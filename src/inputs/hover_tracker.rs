use crate::config::COLLAPSE_DELAY;
use crate::scheduler::{Scheduler, Task, TaskHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPhase {
    #[default]
    Collapsed,
    Expanded,
}

/// Expand on hover, collapse once the pointer has been away for the debounce delay.
///
/// Holds at most one pending collapse; every new one cancels its predecessor.
#[derive(Debug)]
pub struct HoverTracker {
    phase: HoverPhase,
    pending_collapse: Option<TaskHandle>,
    collapse_delay: Duration,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::with_delay(COLLAPSE_DELAY)
    }

    pub fn with_delay(collapse_delay: Duration) -> Self {
        Self {
            phase: HoverPhase::Collapsed,
            pending_collapse: None,
            collapse_delay,
        }
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    pub fn is_expanded(&self) -> bool {
        self.phase == HoverPhase::Expanded
    }

    pub fn has_pending_collapse(&self) -> bool {
        self.pending_collapse.is_some()
    }

    /// Returns true when the phase changed.
    pub fn pointer_enter(&mut self) -> bool {
        self.cancel_pending();
        let changed = self.phase == HoverPhase::Collapsed;
        self.phase = HoverPhase::Expanded;
        changed
    }

    /// Starts the collapse countdown. `on_expire` runs when it elapses uninterrupted
    /// and is expected to call [`HoverTracker::collapse_elapsed`].
    pub fn pointer_leave(&mut self, scheduler: &dyn Scheduler, on_expire: Task) {
        if self.phase == HoverPhase::Collapsed {
            return;
        }
        self.cancel_pending();
        self.pending_collapse = Some(scheduler.schedule(self.collapse_delay, on_expire));
    }

    /// Returns true when the phase changed.
    pub fn collapse_elapsed(&mut self) -> bool {
        self.pending_collapse = None;
        let changed = self.phase == HoverPhase::Expanded;
        self.phase = HoverPhase::Collapsed;
        changed
    }

    pub fn reset(&mut self) {
        self.cancel_pending();
        self.phase = HoverPhase::Collapsed;
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_collapse.take() {
            handle.cancel();
        }
    }
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shared_tracker() -> Rc<RefCell<HoverTracker>> {
        Rc::new(RefCell::new(HoverTracker::new()))
    }

    fn collapse_task(tracker: &Rc<RefCell<HoverTracker>>) -> Task {
        let tracker = Rc::downgrade(tracker);
        Box::new(move || {
            if let Some(tracker) = tracker.upgrade() {
                tracker.borrow_mut().collapse_elapsed();
            }
        })
    }

    fn leave(tracker: &Rc<RefCell<HoverTracker>>, scheduler: &ManualScheduler) {
        let task = collapse_task(tracker);
        tracker.borrow_mut().pointer_leave(scheduler, task);
    }

    #[test]
    fn test_enter_expands_immediately() {
        let mut tracker = HoverTracker::new();
        assert_eq!(tracker.phase(), HoverPhase::Collapsed);
        assert!(tracker.pointer_enter());
        assert!(tracker.is_expanded());
        assert!(!tracker.pointer_enter());
        assert!(tracker.is_expanded());
    }

    #[test]
    fn test_leave_while_collapsed_is_noop() {
        let scheduler = ManualScheduler::new();
        let tracker = shared_tracker();
        leave(&tracker, &scheduler);

        assert!(!tracker.borrow().has_pending_collapse());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_collapse_after_quiet_period() {
        let scheduler = ManualScheduler::new();
        let tracker = shared_tracker();
        tracker.borrow_mut().pointer_enter();
        leave(&tracker, &scheduler);

        scheduler.advance(Duration::from_millis(499));
        assert!(tracker.borrow().is_expanded());

        scheduler.advance(Duration::from_millis(1));
        assert!(!tracker.borrow().is_expanded());
        assert!(!tracker.borrow().has_pending_collapse());
    }

    #[test]
    fn test_reenter_within_window_cancels_collapse() {
        let scheduler = ManualScheduler::new();
        let tracker = shared_tracker();
        tracker.borrow_mut().pointer_enter();
        leave(&tracker, &scheduler);
        scheduler.advance(Duration::from_millis(300));
        tracker.borrow_mut().pointer_enter();

        scheduler.advance(Duration::from_secs(5));
        assert!(tracker.borrow().is_expanded());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_repeated_leave_keeps_single_timer() {
        let scheduler = ManualScheduler::new();
        let tracker = shared_tracker();
        tracker.borrow_mut().pointer_enter();
        leave(&tracker, &scheduler);
        scheduler.advance(Duration::from_millis(400));
        leave(&tracker, &scheduler);

        assert_eq!(scheduler.pending(), 1);
        scheduler.advance(Duration::from_millis(400));
        assert!(tracker.borrow().is_expanded());
        scheduler.advance(Duration::from_millis(100));
        assert!(!tracker.borrow().is_expanded());
    }

    #[test]
    fn test_reset_cancels_pending() {
        let scheduler = ManualScheduler::new();
        let tracker = shared_tracker();
        tracker.borrow_mut().pointer_enter();
        leave(&tracker, &scheduler);
        tracker.borrow_mut().reset();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(tracker.borrow().phase(), HoverPhase::Collapsed);
    }
}
