use crate::config::STYLE_ID;
use crate::dom::{self, Page};

/// Fixed styles for the floating panel. Indentation follows `.cftoc-level-N`;
/// the list region only shows while the root carries `cftoc-expanded`.
pub const PANEL_STYLES: &str = r#"
#cftoc-container {
  position: fixed;
  top: 80px;
  right: 16px;
  z-index: 9999;
  font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
  font-size: 13px;
}

#cftoc-bar {
  background: #0052cc;
  color: #ffffff;
  border-radius: 4px;
  padding: 6px 10px;
  cursor: default;
  box-shadow: 0 2px 6px rgba(9, 30, 66, 0.25);
}

#cftoc-panel {
  display: none;
  max-height: 70vh;
  width: 280px;
  overflow-y: auto;
  background: #ffffff;
  border: 1px solid #dfe1e6;
  border-radius: 4px;
  box-shadow: 0 8px 24px rgba(9, 30, 66, 0.2);
}

#cftoc-container.cftoc-expanded #cftoc-panel {
  display: block;
}

#cftoc-container.cftoc-expanded #cftoc-bar {
  display: none;
}

#cftoc-header {
  font-weight: 600;
  padding: 8px 12px;
  border-bottom: 1px solid #dfe1e6;
}

#cftoc-list {
  list-style: none;
  margin: 0;
  padding: 6px 0;
}

.cftoc-item {
  display: block;
  padding: 3px 12px;
  color: #172b4d;
  text-decoration: none;
}

.cftoc-item:hover {
  background: #f4f5f7;
}

.cftoc-level-1 { padding-left: 12px; }
.cftoc-level-2 { padding-left: 24px; }
.cftoc-level-3 { padding-left: 36px; }
.cftoc-level-4 { padding-left: 48px; }
.cftoc-level-5 { padding-left: 60px; }
.cftoc-level-6 { padding-left: 72px; }
"#;

/// Adds the panel stylesheet once. Returns false if it was already present
/// or there was nowhere to put it.
pub fn ensure_styles(page: &Page) -> bool {
    if page.element_by_id(STYLE_ID).is_some() {
        return false;
    }

    let Some(target) = page.head().or_else(|| page.body()) else {
        return false;
    };

    let style = dom::create_element("style", &[("id", STYLE_ID)]);
    dom::append_child(&style, dom::create_text(PANEL_STYLES));
    dom::append_child(&target, style);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_injected_once_into_head() {
        let page = Page::parse("<p>content</p>", "https://wiki.local/p");

        assert!(ensure_styles(&page));
        assert!(!ensure_styles(&page));
        assert_eq!(page.count_by_id(STYLE_ID), 1);

        let style = page.element_by_id(STYLE_ID).unwrap();
        let head = page.head().unwrap();
        assert!(dom::is_descendant_of(&style, &head));
        assert!(dom::text_content(&style).contains(".cftoc-level-2"));
    }
}
