use serde::Serialize;
use std::time::Duration;

/// Delay between the pointer leaving the panel and the panel collapsing.
pub const COLLAPSE_DELAY: Duration = Duration::from_millis(500);

/// Pause between two detection attempts while the page is still loading.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(2000);

/// Retries after the first attempt; a page without a TOC costs `MAX_RETRIES + 1` attempts.
pub const MAX_RETRIES: u32 = 10;

pub const CONTAINER_ID: &str = "cftoc-container";
pub const BAR_ID: &str = "cftoc-bar";
pub const BAR_LABEL_ID: &str = "cftoc-bar-label";
pub const PANEL_ID: &str = "cftoc-panel";
pub const HEADER_ID: &str = "cftoc-header";
pub const LIST_ID: &str = "cftoc-list";
pub const STYLE_ID: &str = "cftoc-style";

pub const BAR_LABEL: &str = "TOC";
pub const PANEL_TITLE: &str = "Table of Contents";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timings {
    #[serde(with = "millis")]
    pub collapse_delay: Duration,
    #[serde(with = "millis")]
    pub retry_interval: Duration,
    pub max_retries: u32,
}

impl Timings {
    pub const DEFAULT: Timings = Timings {
        collapse_delay: COLLAPSE_DELAY,
        retry_interval: RETRY_INTERVAL,
        max_retries: MAX_RETRIES,
    };

    /// Attempts made before giving up on a page that never shows a TOC.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}
