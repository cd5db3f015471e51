use crate::dom::node::{DomNode, ElementNode};
use crate::error::{HighlightError, Result};

/// Represents the document tree of a page, rooted at its body (or any content root)
#[derive(Debug, Clone, PartialEq)]
pub struct DomTree {
    /// Root element of the DOM tree
    pub root: ElementNode,
}

impl DomTree {
    /// Create a new DomTree around a root element
    pub fn new(root: ElementNode) -> Self {
        Self { root }
    }

    /// Build a DomTree from a JSON snapshot.
    ///
    /// The root object may omit its `"type"` tag; every descendant must carry one.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: ElementNode = serde_json::from_str(json)
            .map_err(|e| HighlightError::DomParseFailed(format!("Failed to parse DOM JSON: {}", e)))?;
        Ok(Self::new(root))
    }

    /// Build a DomTree from an already decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let root: ElementNode = serde_json::from_value(value)
            .map_err(|e| HighlightError::DomParseFailed(format!("Failed to decode DOM value: {}", e)))?;
        Ok(Self::new(root))
    }

    /// Convert the DOM tree to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&DomNode::Element(self.root.clone()))
            .map_err(|e| HighlightError::DomParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Serialize the tree as HTML
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    /// Render the tree as Markdown
    pub fn to_markdown(&self) -> String {
        html2md::parse_html(&self.to_html())
    }

    /// Concatenated text of every text node under the root
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        self.root.count_elements()
    }

    /// Count elements carrying the given class (e.g. highlight markers)
    pub fn count_with_class(&self, class_name: &str) -> usize {
        fn walk(element: &ElementNode, class_name: &str) -> usize {
            let own = usize::from(element.has_class(class_name));
            own + element
                .children
                .iter()
                .filter_map(DomNode::as_element)
                .map(|child| walk(child, class_name))
                .sum::<usize>()
        }
        walk(&self.root, class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tree() -> ElementNode {
        ElementNode::new("body")
            .with_child(ElementNode::new("header").with_child(ElementNode::new("h1").with_text("Title")))
            .with_child(
                ElementNode::new("main")
                    .with_child(ElementNode::new("p").with_text("Some text"))
                    .with_child(ElementNode::new("div").with_attribute("class", "content").with_text("More")),
            )
    }

    #[test]
    fn test_dom_tree_creation() {
        let tree = DomTree::new(create_test_tree());

        assert_eq!(tree.root.tag_name, "body");
        assert_eq!(tree.root.children.len(), 2);
    }

    #[test]
    fn test_count_elements() {
        let tree = DomTree::new(create_test_tree());

        // body, header, h1, main, p, div
        assert_eq!(tree.count_elements(), 6);
    }

    #[test]
    fn test_text_content() {
        let tree = DomTree::new(create_test_tree());
        assert_eq!(tree.text_content(), "TitleSome textMore");
    }

    #[test]
    fn test_json_round_trip_keeps_structure() {
        let tree = DomTree::new(create_test_tree());
        let json = tree.to_json().unwrap();

        assert!(json.contains("\"tag_name\": \"main\""));
        assert!(json.contains("\"class\": \"content\""));

        let parsed = DomTree::from_json(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_from_json_without_root_tag() {
        let tree = DomTree::from_json(
            r#"{"tag_name": "body", "children": [{"type": "text", "value": "Hello"}]}"#,
        )
        .unwrap();
        assert_eq!(tree.text_content(), "Hello");
    }

    #[test]
    fn test_from_json_invalid() {
        let err = DomTree::from_json(r#"{"children": []}"#).unwrap_err();
        assert!(matches!(err, HighlightError::DomParseFailed(_)));
    }

    #[test]
    fn test_to_html_and_markdown() {
        let tree = DomTree::new(
            ElementNode::new("body").with_child(
                ElementNode::new("p")
                    .with_text("A ")
                    .with_child(ElementNode::new("strong").with_text("bold"))
                    .with_text(" word"),
            ),
        );

        assert_eq!(tree.to_html(), "<body><p>A <strong>bold</strong> word</p></body>");
        assert!(tree.to_markdown().contains("**bold**"));
    }

    #[test]
    fn test_count_with_class() {
        let tree = DomTree::new(
            ElementNode::new("body")
                .with_child(ElementNode::new("span").with_attribute("class", "highlight").with_text("a"))
                .with_child(
                    ElementNode::new("p")
                        .with_child(ElementNode::new("span").with_attribute("class", "x highlight").with_text("b")),
                ),
        );
        assert_eq!(tree.count_with_class("highlight"), 2);
        assert_eq!(tree.count_with_class("missing"), 0);
    }
}
