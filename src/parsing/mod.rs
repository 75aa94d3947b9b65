pub mod detector;
pub mod toc_parser;

pub use detector::{ContainerPattern, TOC_PATTERNS, detect_container};
pub use toc_parser::TocParser;
