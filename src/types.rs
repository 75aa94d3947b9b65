use serde::Serialize;

/// One navigable entry of a parsed table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    text: String,
    href: String,
    level: u32,
}

impl TocItem {
    /// Builds an item, rejecting blank text or target. Text whitespace is
    /// trimmed and inner runs collapse to one space.
    pub fn new(text: &str, href: &str, level: u32) -> Option<Self> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let href = href.trim();
        if text.is_empty() || href.is_empty() {
            return None;
        }

        Some(Self {
            text,
            href: href.to_string(),
            level: level.max(1),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

/// Pretty JSON of an outline, used by diagnostics and the inspector demo.
pub fn outline_to_json(items: &[TocItem]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|e| {
        log::error!("Failed to serialize outline: {e}");
        "[]".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collapses_whitespace() {
        let item = TocItem::new("  Getting \n   started ", " #start ", 2).unwrap();
        assert_eq!(item.text(), "Getting started");
        assert_eq!(item.href(), "#start");
        assert_eq!(item.level(), 2);
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        assert!(TocItem::new("   ", "#a", 1).is_none());
        assert!(TocItem::new("Title", "", 1).is_none());
        assert!(TocItem::new("Title", "  ", 1).is_none());
    }

    #[test]
    fn test_level_is_at_least_one() {
        let item = TocItem::new("Intro", "#intro", 0).unwrap();
        assert_eq!(item.level(), 1);
    }

    #[test]
    fn test_outline_to_json() {
        let items = vec![TocItem::new("Intro", "#intro", 1).unwrap()];
        let json = outline_to_json(&items);
        assert!(json.contains("\"text\": \"Intro\""));
        assert!(json.contains("\"level\": 1"));
    }
}
