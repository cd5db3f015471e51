use crate::config::HighlightOptions;
use crate::dom::{DomNode, ElementNode, NodePath};

/// One text node captured by a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    /// Location of the text node at snapshot time
    pub path: NodePath,

    /// Value of the text node at snapshot time
    pub text: String,
}

/// Text nodes of a document in depth-first, pre-order document order.
///
/// Paths and offsets are only valid against the tree the view was built from;
/// take a new snapshot after every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTextView {
    entries: Vec<TextEntry>,
}

impl DocumentTextView {
    pub fn entries(&self) -> &[TextEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no indexed text node carries anything but whitespace
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|entry| entry.text.trim().is_empty())
    }

    /// Total number of characters over all indexed text nodes
    pub fn char_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.text.chars().count()).sum()
    }
}

/// Builds [`DocumentTextView`] snapshots of a tree
pub struct TextNodeIndex;

impl TextNodeIndex {
    pub fn build(root: &ElementNode, options: &HighlightOptions) -> DocumentTextView {
        let mut entries = Vec::new();
        Self::collect(root, &NodePath::root(), options, &mut entries);
        DocumentTextView { entries }
    }

    fn collect(element: &ElementNode, path: &NodePath, options: &HighlightOptions, entries: &mut Vec<TextEntry>) {
        for (i, child) in element.children.iter().enumerate() {
            match child {
                DomNode::Text(text) => {
                    if !text.value.is_empty() {
                        entries.push(TextEntry {
                            path: path.child(i),
                            text: text.value.clone(),
                        });
                    }
                }
                DomNode::Element(child_element) => {
                    if Self::is_excluded(child_element, options) {
                        continue;
                    }
                    Self::collect(child_element, &path.child(i), options, entries);
                }
            }
        }
    }

    fn is_excluded(element: &ElementNode, options: &HighlightOptions) -> bool {
        if !options.include_non_rendering && element.is_non_rendering() {
            return true;
        }
        options.skip_marked_text && element.is_tag(&options.marker_tag) && element.has_class(&options.marker_class)
    }
}
