pub mod styles;
pub mod toc_panel;

pub use toc_panel::TocPanel;
