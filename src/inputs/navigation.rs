use crate::dom::Page;

/// Notifications a host forwards to the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSignal {
    /// Something in the document changed (a mutation-observer callback).
    DomMutated,
    /// The host router reported a new location.
    RouteChanged(String),
}

/// Decides whether a host signal means the page moved to another route.
///
/// Implementations swap the detection mechanism without touching the pipeline.
pub trait NavigationWatcher {
    /// Returns true exactly once per route change.
    fn observe(&mut self, page: &Page, signal: &HostSignal) -> bool;
}

/// Compares the page location against the last one seen on every signal.
/// Coarse, but works on hosts that only expose DOM mutations.
#[derive(Debug, Clone)]
pub struct LocationPoller {
    last_seen: String,
}

impl LocationPoller {
    pub fn new(page: &Page) -> Self {
        Self {
            last_seen: page.location(),
        }
    }
}

impl NavigationWatcher for LocationPoller {
    fn observe(&mut self, page: &Page, _signal: &HostSignal) -> bool {
        let current = page.location();
        if current == self.last_seen {
            return false;
        }
        log::debug!("Location changed: {} -> {}", self.last_seen, current);
        self.last_seen = current;
        true
    }
}

/// Trusts the host router and ignores raw DOM mutations.
#[derive(Debug, Clone)]
pub struct RouteHookWatcher {
    last_route: String,
}

impl RouteHookWatcher {
    pub fn new(page: &Page) -> Self {
        Self {
            last_route: page.location(),
        }
    }
}

impl NavigationWatcher for RouteHookWatcher {
    fn observe(&mut self, _page: &Page, signal: &HostSignal) -> bool {
        match signal {
            HostSignal::RouteChanged(route) if *route != self.last_route => {
                self.last_route = route.clone();
                true
            }
            _ => false,
        }
    }
}
