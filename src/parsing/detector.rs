use crate::config::CONTAINER_ID;
use crate::dom::{self, Page};
use markup5ever_rcdom::Handle;

/// Structural shape of an element that hosts a rendered TOC macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerPattern {
    Class(&'static str),
    Attribute {
        name: &'static str,
        value: &'static str,
    },
    TagWithClass {
        tag: &'static str,
        class: &'static str,
    },
}

impl ContainerPattern {
    pub fn matches(&self, node: &Handle) -> bool {
        match *self {
            ContainerPattern::Class(class) => dom::has_class(node, class),
            ContainerPattern::Attribute { name, value } => {
                dom::attr(node, name).as_deref() == Some(value)
            }
            ContainerPattern::TagWithClass { tag, class } => {
                dom::tag_name(node) == Some(tag) && dom::has_class(node, class)
            }
        }
    }
}

/// Patterns in priority order. When a page matches several, the earliest entry wins,
/// even if a later pattern matches an element that appears sooner in the document.
// TODO: revisit precedence once pages with both `toc-macro` and a themed `nav.toc` show up.
pub const TOC_PATTERNS: [ContainerPattern; 5] = [
    ContainerPattern::Class("toc-macro"),
    ContainerPattern::Attribute {
        name: "data-macro-name",
        value: "toc",
    },
    ContainerPattern::Class("table-of-contents"),
    ContainerPattern::Class("toc"),
    ContainerPattern::TagWithClass {
        tag: "nav",
        class: "toc",
    },
];

/// First element matching the highest-priority pattern, or `None` when the page has no TOC.
pub fn detect_container(page: &Page) -> Option<Handle> {
    detect_with_pattern(page).map(|(_, container)| container)
}

/// Like [`detect_container`] but also reports the index into [`TOC_PATTERNS`] that matched.
pub fn detect_with_pattern(page: &Page) -> Option<(usize, Handle)> {
    let candidates: Vec<Handle> = dom::descendants(page.document())
        .into_iter()
        .filter(|node| dom::tag_name(node).is_some())
        .collect();
    let own_panel = page.element_by_id(CONTAINER_ID);

    TOC_PATTERNS
        .iter()
        .enumerate()
        .find_map(|(index, pattern)| {
            candidates
                .iter()
                .find(|node| {
                    pattern.matches(node)
                        && !own_panel
                            .as_ref()
                            .is_some_and(|panel| dom::is_descendant_of(node, panel))
                })
                .map(|node| (index, node.clone()))
        })
}
