use crate::dom::path::NodePath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Elements whose text never reaches the rendered page
pub const NON_RENDERING_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that never have children or a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// A node of the document tree: either an element or a run of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DomNode {
    Element(ElementNode),
    Text(TextNode),
}

/// Represents a DOM element node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "p", "span")
    pub tag_name: String,

    /// Element attributes in source order (e.g., id, class, href)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,
}

/// Represents a DOM text node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextNode {
    pub value: String,
}

impl DomNode {
    pub fn text(value: impl Into<String>) -> Self {
        DomNode::Text(TextNode::new(value))
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            DomNode::Element(element) => Some(element),
            DomNode::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            DomNode::Element(element) => Some(element),
            DomNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DomNode::Text(text) => Some(&text.value),
            DomNode::Element(_) => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            DomNode::Text(text) => out.push_str(&text.value),
            DomNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        match self {
            DomNode::Text(text) if raw_text => out.push_str(&text.value),
            DomNode::Text(text) => escape_into(&text.value, false, out),
            DomNode::Element(element) => element.write_html(out),
        }
    }
}

impl From<ElementNode> for DomNode {
    fn from(element: ElementNode) -> Self {
        DomNode::Element(element)
    }
}

impl TextNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: add a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    /// Builder method: append a child node
    pub fn with_child(mut self, child: impl Into<DomNode>) -> Self {
        self.add_child(child);
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<DomNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child node
    pub fn add_child(&mut self, child: impl Into<DomNode>) {
        self.children.push(child.into());
    }

    /// Add a text child
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(DomNode::text(text));
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Script, style and similar elements whose text is never rendered
    pub fn is_non_rendering(&self) -> bool {
        NON_RENDERING_TAGS.iter().any(|&tag| self.is_tag(tag))
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.iter().any(|&tag| self.is_tag(tag))
    }

    /// Concatenated value of every descendant text node, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Count this element and all descendant elements
    pub fn count_elements(&self) -> usize {
        1 + self
            .children
            .iter()
            .filter_map(DomNode::as_element)
            .map(ElementNode::count_elements)
            .sum::<usize>()
    }

    /// Resolve a path to the node it names. The root path names this element
    /// itself, which is not a `DomNode`, so it resolves to `None`.
    pub fn node_at(&self, path: &NodePath) -> Option<&DomNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.children.get(*first)?;
        for &index in rest {
            node = node.as_element()?.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut DomNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &index in rest {
            node = node.as_element_mut()?.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Child list of the element at `path` (the root path yields this element's children)
    pub fn children_at_mut(&mut self, path: &NodePath) -> Option<&mut Vec<DomNode>> {
        if path.is_root() {
            return Some(&mut self.children);
        }
        self.node_at_mut(path)
            .and_then(DomNode::as_element_mut)
            .map(|element| &mut element.children)
    }

    /// Serialize this element and its subtree as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag_name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');

        if self.is_void() {
            return;
        }

        let raw_text = self.is_tag("script") || self.is_tag("style");
        for child in &self.children {
            child.write_html(out, raw_text);
        }

        out.push_str("</");
        out.push_str(&self.tag_name);
        out.push('>');
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("p")
            .with_attribute("id", "intro")
            .with_attribute("class", "lead primary")
            .with_text("Hello");

        assert_eq!(element.tag_name, "p");
        assert_eq!(element.id(), Some("intro"));
        assert!(element.has_class("lead"));
        assert!(element.has_class("primary"));
        assert!(!element.has_class("hidden"));
        assert_eq!(element.text_content(), "Hello");
    }

    #[test]
    fn test_is_non_rendering() {
        assert!(ElementNode::new("script").is_non_rendering());
        assert!(ElementNode::new("STYLE").is_non_rendering());
        assert!(!ElementNode::new("p").is_non_rendering());
    }

    #[test]
    fn test_text_content_is_document_order() {
        let element = ElementNode::new("p")
            .with_text("The ")
            .with_child(ElementNode::new("em").with_text("quick"))
            .with_text(" fox");

        assert_eq!(element.text_content(), "The quick fox");
        assert_eq!(element.count_elements(), 2);
    }

    #[test]
    fn test_node_at() {
        let root = ElementNode::new("body")
            .with_child(ElementNode::new("p").with_text("first").with_child(ElementNode::new("b").with_text("bold")))
            .with_text("tail");

        assert_eq!(root.node_at(&NodePath::from(vec![0, 0])).and_then(DomNode::as_text), Some("first"));
        assert_eq!(root.node_at(&NodePath::from(vec![0, 1, 0])).and_then(DomNode::as_text), Some("bold"));
        assert_eq!(root.node_at(&NodePath::from(vec![1])).and_then(DomNode::as_text), Some("tail"));
        assert!(root.node_at(&NodePath::from(vec![1, 0])).is_none());
        assert!(root.node_at(&NodePath::from(vec![5])).is_none());
        assert!(root.node_at(&NodePath::root()).is_none());
    }

    #[test]
    fn test_children_at_mut() {
        let mut root = ElementNode::new("body").with_child(ElementNode::new("p").with_text("x"));

        root.children_at_mut(&NodePath::from(vec![0])).unwrap().push(DomNode::text("y"));
        assert_eq!(root.text_content(), "xy");
        assert_eq!(root.children_at_mut(&NodePath::root()).unwrap().len(), 1);
        assert!(root.children_at_mut(&NodePath::from(vec![0, 0])).is_none());
    }

    #[test]
    fn test_to_html_escapes() {
        let element = ElementNode::new("p")
            .with_attribute("title", "a \"quoted\" <title>")
            .with_text("1 < 2 & 3 > 2")
            .with_child(ElementNode::new("br"))
            .with_child(ElementNode::new("script").with_text("if (a < b) {}"));

        assert_eq!(
            element.to_html(),
            "<p title=\"a &quot;quoted&quot; &lt;title&gt;\">1 &lt; 2 &amp; 3 &gt; 2<br><script>if (a < b) {}</script></p>"
        );
    }

    #[test]
    fn test_serialization_shape() {
        let element = ElementNode::new("p").with_attribute("class", "content").with_text("Hi");
        let json = serde_json::to_value(DomNode::from(element.clone())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "element",
                "tag_name": "p",
                "attributes": {"class": "content"},
                "children": [{"type": "text", "value": "Hi"}]
            })
        );

        let deserialized: DomNode = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, DomNode::Element(element));
    }
}
