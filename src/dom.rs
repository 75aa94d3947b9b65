use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::{Attribute, LocalName, Namespace, QualName, parse_document};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::RefCell;
use std::rc::Rc;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A live host document: an html5ever tree plus the location it is showing.
///
/// Every accessor takes `&self`; the tree itself is interior-mutable, which lets
/// the host and the supervisor share one `Rc<Page>` on a single thread.
pub struct Page {
    dom: RcDom,
    location: RefCell<String>,
}

impl Page {
    pub fn parse(html: &str, location: impl Into<String>) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self {
            dom,
            location: RefCell::new(location.into()),
        }
    }

    pub fn document(&self) -> &Handle {
        &self.dom.document
    }

    pub fn location(&self) -> String {
        self.location.borrow().clone()
    }

    /// Changes the location in place, the way client-side routing does.
    pub fn set_location(&self, location: impl Into<String>) {
        *self.location.borrow_mut() = location.into();
    }

    pub fn head(&self) -> Option<Handle> {
        self.find_first(|node| tag_name(node) == Some("head"))
    }

    pub fn body(&self) -> Option<Handle> {
        self.find_first(|node| tag_name(node) == Some("body"))
    }

    /// Replaces everything under `<body>` with freshly parsed markup.
    pub fn replace_body(&self, html: &str) {
        let Some(body) = self.body() else {
            return;
        };
        for child in body.children.take() {
            child.parent.set(None);
        }
        for node in parse_fragment(html) {
            append_child(&body, node);
        }
    }

    /// Appends parsed markup at the end of `<body>`, simulating late content.
    pub fn append_to_body(&self, html: &str) {
        if let Some(body) = self.body() {
            for node in parse_fragment(html) {
                append_child(&body, node);
            }
        }
    }

    pub fn element_by_id(&self, id: &str) -> Option<Handle> {
        self.find_first(|node| attr(node, "id").as_deref() == Some(id))
    }

    pub fn count_by_id(&self, id: &str) -> usize {
        descendants(self.document())
            .iter()
            .filter(|node| attr(node, "id").as_deref() == Some(id))
            .count()
    }

    pub fn find_first(&self, predicate: impl Fn(&Handle) -> bool) -> Option<Handle> {
        descendants(self.document())
            .into_iter()
            .find(|node| predicate(node))
    }

    pub fn to_html(&self) -> String {
        serialize_children(self.document())
    }
}

/// Parses an HTML fragment in body context and returns its detached top-level nodes.
pub fn parse_fragment(html: &str) -> Vec<Handle> {
    let wrapped = format!("<html><head></head><body>{html}</body></html>");
    let scratch = Page::parse(&wrapped, "about:blank");
    let Some(body) = scratch.body() else {
        return Vec::new();
    };
    let nodes = body.children.take();
    for node in &nodes {
        node.parent.set(None);
    }
    nodes
}

pub fn tag_name(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn set_attr(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name) {
            Some(existing) => existing.value = StrTendril::from(value),
            None => attrs.push(attribute(name, value)),
        }
    }
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|value| value.split_whitespace().any(|token| token == class))
        .unwrap_or(false)
}

/// Concatenated text of every descendant text node.
pub fn text_content(node: &Handle) -> String {
    fn collect(node: &Handle, out: &mut String) {
        if let NodeData::Text { ref contents } = node.data {
            out.push_str(&contents.borrow());
        }
        for child in node.children.borrow().iter() {
            collect(child, out);
        }
    }

    let mut out = String::new();
    collect(node, &mut out);
    out
}

/// All nodes below `root` in document (pre-order) order, `root` excluded.
pub fn descendants(root: &Handle) -> Vec<Handle> {
    fn walk(node: &Handle, out: &mut Vec<Handle>) {
        for child in node.children.borrow().iter() {
            out.push(child.clone());
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|weak| weak.upgrade());
    node.parent.set(weak);
    parent
}

/// True when walking parents from `node` reaches `ancestor`.
pub fn is_descendant_of(node: &Handle, ancestor: &Handle) -> bool {
    let mut current = parent_of(node);
    while let Some(parent) = current {
        if Rc::ptr_eq(&parent, ancestor) {
            return true;
        }
        current = parent_of(&parent);
    }
    false
}

pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    Node::new(NodeData::Element {
        name: QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag)),
        attrs: RefCell::new(
            attrs
                .iter()
                .map(|(name, value)| attribute(name, value))
                .collect(),
        ),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Detaches `node` from its parent. Returns false if it was not attached.
pub fn detach(node: &Handle) -> bool {
    let Some(parent) = parent_of(node) else {
        return false;
    };
    parent
        .children
        .borrow_mut()
        .retain(|child| !Rc::ptr_eq(child, node));
    node.parent.set(None);
    true
}

pub fn serialize_children(node: &Handle) -> String {
    let mut bytes = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    if let Err(e) = serialize(&mut bytes, &serializable, SerializeOpts::default()) {
        log::warn!("Failed to serialize document: {e}");
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
        value: StrTendril::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exposes_head_and_body() {
        let page = Page::parse("<p id=\"intro\">Hello</p>", "https://wiki.local/a");

        assert!(page.head().is_some());
        assert!(page.body().is_some());
        assert_eq!(page.location(), "https://wiki.local/a");
        let intro = page.element_by_id("intro").unwrap();
        assert_eq!(tag_name(&intro), Some("p"));
        assert_eq!(text_content(&intro), "Hello");
    }

    #[test]
    fn test_has_class_matches_whole_tokens() {
        let page = Page::parse("<div id=\"d\" class=\"toc-macro  wide\"></div>", "x");
        let div = page.element_by_id("d").unwrap();

        assert!(has_class(&div, "toc-macro"));
        assert!(has_class(&div, "wide"));
        assert!(!has_class(&div, "toc"));
    }

    #[test]
    fn test_append_and_detach_keep_parent_links() {
        let page = Page::parse("", "x");
        let body = page.body().unwrap();
        let div = create_element("div", &[("id", "box")]);
        append_child(&div, create_text("inside"));
        append_child(&body, div.clone());

        assert!(is_descendant_of(&div, &body));
        assert_eq!(page.count_by_id("box"), 1);

        assert!(detach(&div));
        assert!(!detach(&div));
        assert_eq!(page.count_by_id("box"), 0);
        assert!(parent_of(&div).is_none());
    }

    #[test]
    fn test_set_attr_overwrites_existing_value() {
        let el = create_element("div", &[("class", "a")]);
        set_attr(&el, "class", "b");
        set_attr(&el, "role", "navigation");

        assert_eq!(attr(&el, "class").as_deref(), Some("b"));
        assert_eq!(attr(&el, "role").as_deref(), Some("navigation"));
    }

    #[test]
    fn test_replace_body_swaps_content() {
        let page = Page::parse("<p id=\"old\">old</p>", "x");
        page.replace_body("<p id=\"new\">new</p>");

        assert!(page.element_by_id("old").is_none());
        assert!(page.element_by_id("new").is_some());
    }

    #[test]
    fn test_to_html_serializes_created_nodes() {
        let page = Page::parse("", "x");
        let body = page.body().unwrap();
        let link = create_element("a", &[("href", "#top")]);
        append_child(&link, create_text("Top"));
        append_child(&body, link);

        assert!(page.to_html().contains("<a href=\"#top\">Top</a>"));
    }
}
