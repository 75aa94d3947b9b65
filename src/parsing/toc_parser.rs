use crate::dom::{self, Page};
use crate::parsing::detector;
use crate::types::TocItem;
use markup5ever_rcdom::Handle;
use std::rc::Rc;

pub struct TocParser;

impl TocParser {
    /// Detects the TOC container on `page` and parses it. `None` covers both
    /// "no container yet" and "container without usable links".
    pub fn parse_page(page: &Page) -> Option<Vec<TocItem>> {
        let (pattern, container) = detector::detect_with_pattern(page)?;
        log::debug!(
            "TOC container matched {:?}",
            detector::TOC_PATTERNS[pattern]
        );
        let items = Self::parse_container(&container);
        if items.is_empty() {
            log::debug!("TOC container found but it holds no usable links");
            None
        } else {
            Some(items)
        }
    }

    /// Collects every `<a>` under `container` in document order, dropping links
    /// without text or target, and normalizes nesting so the shallowest entry is level 1.
    pub fn parse_container(container: &Handle) -> Vec<TocItem> {
        let raw: Vec<(String, String, u32)> = dom::descendants(container)
            .iter()
            .filter(|node| dom::tag_name(node) == Some("a"))
            .filter_map(|link| {
                let text = dom::text_content(link);
                let href = dom::attr(link, "href").unwrap_or_default();
                if text.trim().is_empty() || href.trim().is_empty() {
                    log::trace!("Dropping malformed TOC link (text={text:?}, href={href:?})");
                    return None;
                }
                Some((text, href, Self::list_depth(link, container)))
            })
            .collect();

        let Some(min_level) = raw.iter().map(|(_, _, level)| *level).min() else {
            return Vec::new();
        };

        raw.into_iter()
            .filter_map(|(text, href, level)| TocItem::new(&text, &href, level - min_level + 1))
            .collect()
    }

    /// Number of `ul`/`ol` elements between `link` and `container`, the container excluded.
    fn list_depth(link: &Handle, container: &Handle) -> u32 {
        let mut depth = 0;
        let mut current = Some(link.clone());
        while let Some(node) = current {
            if Rc::ptr_eq(&node, container) {
                break;
            }
            if matches!(dom::tag_name(&node), Some("ul" | "ol")) {
                depth += 1;
            }
            current = dom::parent_of(&node);
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(markup: &str) -> Vec<TocItem> {
        let page = Page::parse(
            &format!("<html><body><div id=\"toc\" class=\"toc-macro\">{markup}</div></body></html>"),
            "https://wiki.local/p",
        );
        let container = page.element_by_id("toc").unwrap();
        TocParser::parse_container(&container)
    }

    fn levels(items: &[TocItem]) -> Vec<u32> {
        items.iter().map(TocItem::level).collect()
    }

    #[test]
    fn test_flat_list() {
        let items = parse(
            "<ul>\
               <li><a href=\"#one\">One</a></li>\
               <li><a href=\"#two\">Two</a></li>\
               <li><a href=\"#three\">Three</a></li>\
             </ul>",
        );

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text(), "One");
        assert_eq!(items[1].href(), "#two");
        assert_eq!(levels(&items), vec![1, 1, 1]);
    }

    #[test]
    fn test_two_level_nesting() {
        let items = parse(
            "<ul>\
               <li><a href=\"#a\">A</a>\
                 <ul><li><a href=\"#a1\">A.1</a></li></ul>\
               </li>\
               <li><a href=\"#b\">B</a></li>\
             </ul>",
        );

        assert_eq!(levels(&items), vec![1, 2, 1]);
        let texts: Vec<&str> = items.iter().map(TocItem::text).collect();
        assert_eq!(texts, vec!["A", "A.1", "B"]);
    }

    #[test]
    fn test_extra_wrapping_list_is_normalized_away() {
        let items = parse(
            "<ul><li>\
               <ul>\
                 <li><a href=\"#a\">A</a>\
                   <ol><li><a href=\"#a1\">A.1</a></li></ol>\
                 </li>\
               </ul>\
             </li></ul>",
        );

        assert_eq!(levels(&items), vec![1, 2]);
    }

    #[test]
    fn test_links_outside_lists_become_level_one() {
        let items = parse(
            "<a href=\"#top\">Top</a>\
             <ul><li><a href=\"#a\">A</a></li></ul>",
        );

        assert_eq!(levels(&items), vec![1, 2]);
    }

    #[test]
    fn test_empty_text_link_is_dropped() {
        let items = parse(
            "<ul>\
               <li><a href=\"#first\">First</a></li>\
               <li><a href=\"#blank\">   </a></li>\
               <li><a href=\"#third\">Third</a></li>\
             </ul>",
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text(), "First");
        assert_eq!(items[1].text(), "Third");
    }

    #[test]
    fn test_missing_or_empty_href_is_dropped() {
        let items = parse(
            "<ul>\
               <li><a>No target</a></li>\
               <li><a href=\"\">Empty target</a></li>\
               <li><a href=\"#ok\">Ok</a></li>\
             </ul>",
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].href(), "#ok");
    }

    #[test]
    fn test_nested_markup_inside_link_contributes_text() {
        let items = parse("<ul><li><a href=\"#x\"><span>1.</span> <em>Intro</em></a></li></ul>");

        assert_eq!(items[0].text(), "1. Intro");
    }

    #[test]
    fn test_container_without_links() {
        let items = parse("<p>Nothing here</p>");
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_page_without_container() {
        let page = Page::parse("<p>plain</p>", "https://wiki.local/p");
        assert!(TocParser::parse_page(&page).is_none());
    }

    #[test]
    fn test_parse_page_with_empty_container() {
        let page = Page::parse("<div class=\"toc-macro\"></div>", "https://wiki.local/p");
        assert!(TocParser::parse_page(&page).is_none());
    }
}
