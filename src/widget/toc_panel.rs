use crate::config::{
    BAR_ID, BAR_LABEL, BAR_LABEL_ID, CONTAINER_ID, HEADER_ID, LIST_ID, PANEL_ID, PANEL_TITLE,
};
use crate::dom::{self, Page};
use crate::error::PanelError;
use crate::types::TocItem;
use crate::widget::styles;
use markup5ever_rcdom::Handle;

const COLLAPSED_CLASS: &str = "cftoc-collapsed";
const EXPANDED_CLASS: &str = "cftoc-expanded";

/// Builds and mounts the floating navigation panel.
///
/// ```text
/// div#cftoc-container            role=navigation
///   div#cftoc-bar                collapsed affordance
///     span#cftoc-bar-label
///   div#cftoc-panel              shown while expanded
///     div#cftoc-header
///     ul#cftoc-list
///       li > a.cftoc-item.cftoc-level-N
/// ```
pub struct TocPanel;

impl TocPanel {
    /// Mounts a panel for `items` as the last child of `<body>` and returns its root.
    ///
    /// Mounting is idempotent per document: if a root is already present the
    /// call fails with [`PanelError::AlreadyMounted`] and leaves the page untouched.
    pub fn mount(page: &Page, items: &[TocItem]) -> Result<Handle, PanelError> {
        if items.is_empty() {
            return Err(PanelError::EmptyOutline);
        }
        if page.element_by_id(CONTAINER_ID).is_some() {
            return Err(PanelError::AlreadyMounted(CONTAINER_ID));
        }
        let body = page.body().ok_or(PanelError::MissingBody)?;

        styles::ensure_styles(page);
        let root = Self::build(items);
        dom::append_child(&body, root.clone());
        log::info!("Mounted TOC panel with {} entries", items.len());
        Ok(root)
    }

    /// Builds the detached panel tree.
    pub fn build(items: &[TocItem]) -> Handle {
        let root = dom::create_element(
            "div",
            &[
                ("id", CONTAINER_ID),
                ("class", COLLAPSED_CLASS),
                ("role", "navigation"),
                ("aria-label", PANEL_TITLE),
                ("aria-expanded", "false"),
            ],
        );

        let bar = dom::create_element("div", &[("id", BAR_ID)]);
        let label = dom::create_element("span", &[("id", BAR_LABEL_ID)]);
        dom::append_child(&label, dom::create_text(BAR_LABEL));
        dom::append_child(&bar, label);

        let panel = dom::create_element("div", &[("id", PANEL_ID)]);
        let header = dom::create_element("div", &[("id", HEADER_ID)]);
        dom::append_child(&header, dom::create_text(PANEL_TITLE));
        dom::append_child(&panel, header);

        let list = dom::create_element("ul", &[("id", LIST_ID)]);
        for item in items {
            dom::append_child(&list, Self::entry(item));
        }
        dom::append_child(&panel, list);

        dom::append_child(&root, bar);
        dom::append_child(&root, panel);
        root
    }

    /// Reflects the hover state on the root element.
    pub fn set_expanded(root: &Handle, expanded: bool) {
        let (class, aria) = if expanded {
            (EXPANDED_CLASS, "true")
        } else {
            (COLLAPSED_CLASS, "false")
        };
        dom::set_attr(root, "class", class);
        dom::set_attr(root, "aria-expanded", aria);
    }

    /// Removes the root from the document. Returns false if it was already detached.
    pub fn unmount(root: &Handle) -> bool {
        let removed = dom::detach(root);
        if removed {
            log::info!("Removed TOC panel");
        }
        removed
    }

    fn entry(item: &TocItem) -> Handle {
        let level = item.level().to_string();
        let class = format!("cftoc-item cftoc-level-{level}");
        let li = dom::create_element("li", &[]);
        let link = dom::create_element(
            "a",
            &[
                ("class", class.as_str()),
                ("href", item.href()),
                ("data-level", level.as_str()),
            ],
        );
        dom::append_child(&link, dom::create_text(item.text()));
        dom::append_child(&li, link);
        li
    }
}
