pub mod hover_tracker;
pub mod navigation;

pub use hover_tracker::{HoverPhase, HoverTracker, PointerEvent};
pub use navigation::{HostSignal, LocationPoller, NavigationWatcher, RouteHookWatcher};
