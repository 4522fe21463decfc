//! Small helpers over the `markup5ever_rcdom` tree shared by the render and inspect sides
//!
//! Both directions work on the same node type: the renderer builds elements by hand and
//! rewrites them pass by pass, the inspector parses pasted HTML into it. Helpers here only
//! touch node-local data (attributes, child lists); no helper walks up through parents.

use crate::error::BabelError;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute,
    LocalName, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Create an element with the given attributes
pub fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.into()),
        },
    })
}

/// Element with a single text child
pub fn create_text_element(tag: &str, text: &str) -> Handle {
    let element = create_element(tag, vec![]);
    append(&element, create_text(text));
    element
}

pub fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Swap the whole child list of `parent`.
pub fn replace_children(parent: &Handle, children: Vec<Handle>) {
    for child in &children {
        child.parent.set(Some(Rc::downgrade(parent)));
    }
    *parent.children.borrow_mut() = children;
}

/// Snapshot of the child list, so callers can rewrite it while iterating.
pub fn children_of(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// Lower-case local tag name for elements.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

pub fn get_attr(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(attr))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn has_attr(node: &Handle, attr: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .any(|a| a.name.local.as_ref().eq_ignore_ascii_case(attr)),
        _ => false,
    }
}

pub fn set_attr(node: &Handle, attr: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs
            .iter_mut()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(attr))
        {
            Some(existing) => existing.value = value.to_string().into(),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr)),
                value: value.to_string().into(),
            }),
        }
    }
}

/// Keep only the attributes for which `keep(name, value)` holds.
pub fn retain_attrs(node: &Handle, mut keep: impl FnMut(&str, &str) -> bool) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs
            .borrow_mut()
            .retain(|a| keep(&a.name.local.as_ref().to_ascii_lowercase(), a.value.as_ref()));
    }
}

pub fn remove_attr(node: &Handle, attr: &str) {
    retain_attrs(node, |name, _| !name.eq_ignore_ascii_case(attr));
}

/// Whitespace-separated class list contains `class`.
pub fn has_class(node: &Handle, class: &str) -> bool {
    get_attr(node, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Pre-order visit of every element strictly below `root`.
pub fn for_each_element(root: &Handle, visit: &mut impl FnMut(&Handle)) {
    for child in children_of(root) {
        if is_element(&child) {
            visit(&child);
        }
        for_each_element(&child, visit);
    }
}

/// A parsed HTML document.
///
/// The `RcDom` is kept alive next to the body handle: dropping a `markup5ever_rcdom` node
/// empties the child lists of its whole subtree, even for nodes still referenced elsewhere.
pub struct HtmlDocument {
    _dom: RcDom,
    body: Handle,
}

impl HtmlDocument {
    /// Parse an HTML document or fragment.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        // The tree builder always synthesizes a body; the detached fallback only guards the type.
        let body = find_element(&dom.document, "body").unwrap_or_else(|| create_element("body", vec![]));
        HtmlDocument { _dom: dom, body }
    }

    pub fn body(&self) -> &Handle {
        &self.body
    }
}

/// Move the children out of `node`, leaving it empty.
///
/// Use this before discarding a node whose children are re-parented, see [`HtmlDocument`].
pub fn take_children(node: &Handle) -> Vec<Handle> {
    std::mem::take(&mut *node.children.borrow_mut())
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if tag_name(child).as_deref() == Some(tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Serialize a node including its own tag.
pub fn serialize_node(node: &Handle) -> Result<String, BabelError> {
    serialize_with_scope(node, TraversalScope::IncludeNode)
}

/// Serialize only the children of a node (inner HTML).
pub fn serialize_children(node: &Handle) -> Result<String, BabelError> {
    serialize_with_scope(node, TraversalScope::ChildrenOnly(None))
}

fn serialize_with_scope(node: &Handle, scope: TraversalScope) -> Result<String, BabelError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| BabelError::serialization("HTML serialization failed", e))?;
    String::from_utf8(output).map_err(|e| BabelError::serialization("UTF-8 conversion failed", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_serializes() {
        let p = create_element("p", vec![("style", "color:#000;")]);
        append(&p, create_text("a < b"));
        assert_eq!(serialize_node(&p).unwrap(), r#"<p style="color:#000;">a &lt; b</p>"#);
    }

    #[test]
    fn attribute_helpers() {
        let a = create_element("a", vec![("href", "https://x.test"), ("class", "one two")]);
        assert!(has_class(&a, "two"));
        set_attr(&a, "href", "https://y.test");
        assert_eq!(get_attr(&a, "href").as_deref(), Some("https://y.test"));
        remove_attr(&a, "class");
        assert!(!has_attr(&a, "class"));
    }

    #[test]
    fn parses_fragment_into_body() {
        let doc = HtmlDocument::parse("<p>one</p><p>two</p>");
        let body = doc.body();
        let mut tags = Vec::new();
        for_each_element(body, &mut |node| tags.extend(tag_name(node)));
        assert_eq!(tags, vec!["p", "p"]);
        assert_eq!(text_content(body), "onetwo");
        assert_eq!(serialize_children(body).unwrap(), "<p>one</p><p>two</p>");
    }
}
