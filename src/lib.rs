//! Floating table-of-contents panel for wiki pages that render their content
//! client-side.
//!
//! A [`TocSupervisor`] watches a [`Page`], finds the rendered TOC macro,
//! turns its nested lists into [`TocItem`]s and mounts a hover-expandable
//! panel. Timers go through a [`Scheduler`]; route changes reach the
//! supervisor as [`HostSignal`]s.

pub mod config;
pub mod dom;
pub mod error;
pub mod inputs;
pub mod logging;
pub mod parsing;
pub mod scheduler;
pub mod supervisor;
pub mod types;
pub mod widget;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Timings;
pub use dom::Page;
pub use error::PanelError;
pub use inputs::{HostSignal, NavigationWatcher, PointerEvent};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TokioScheduler};
pub use supervisor::{PipelineStatus, SupervisorSnapshot, TocSupervisor};
pub use types::TocItem;
