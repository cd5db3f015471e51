use crate::config::MatchMode;
use crate::dom::NodePath;
use crate::highlight::index::DocumentTextView;
use crate::highlight::normalize;
use serde::Serialize;

/// A located occurrence of a fragment inside exactly one text node.
///
/// `start` and `len` are byte offsets into `snapshot`, the node value at the time
/// the view was built; `start + len <= snapshot.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub path: NodePath,
    pub start: usize,
    pub len: usize,
    #[serde(skip)]
    pub snapshot: String,
}

impl Match {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The matched slice of the snapshot text
    pub fn matched_text(&self) -> &str {
        &self.snapshot[self.start..self.end()]
    }
}

/// Finds the first text node containing a fragment.
///
/// Fragments are never matched across node boundaries: text split by inline
/// markup (`quick <b>brown</b>`) is not found as `"quick brown"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentLocator {
    mode: MatchMode,
}

impl FragmentLocator {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Scan the view in document order and return the leftmost occurrence in the first node that has one
    pub fn locate(&self, view: &DocumentTextView, fragment: &str) -> Option<Match> {
        if fragment.is_empty() {
            return None;
        }

        view.iter().find_map(|entry| {
            if self.mode.is_exact() && fragment.len() > entry.text.len() {
                return None;
            }
            normalize::find(&entry.text, fragment, self.mode).map(|(start, len)| Match {
                path: entry.path.clone(),
                start,
                len,
                snapshot: entry.text.clone(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightOptions;
    use crate::dom::ElementNode;
    use crate::highlight::index::TextNodeIndex;

    fn view_of(root: &ElementNode) -> DocumentTextView {
        TextNodeIndex::build(root, &HighlightOptions::default())
    }

    #[test]
    fn test_locate_single_node() {
        let root = ElementNode::new("body").with_child(ElementNode::new("p").with_text("The quick brown fox jumps."));
        let found = FragmentLocator::default().locate(&view_of(&root), "quick brown").unwrap();

        assert_eq!(found.path, NodePath::from(vec![0, 0]));
        assert_eq!(found.start, 4);
        assert_eq!(found.len, 11);
        assert_eq!(found.matched_text(), "quick brown");
    }

    #[test]
    fn test_locate_first_node_then_leftmost_offset() {
        let root = ElementNode::new("body")
            .with_child(ElementNode::new("p").with_text("nothing here"))
            .with_child(ElementNode::new("p").with_text("fox and fox"))
            .with_child(ElementNode::new("p").with_text("fox first"));
        let found = FragmentLocator::default().locate(&view_of(&root), "fox").unwrap();

        assert_eq!(found.path, NodePath::from(vec![1, 0]));
        assert_eq!(found.start, 0);
    }

    #[test]
    fn test_locate_not_found() {
        let root = ElementNode::new("body").with_text("The quick brown fox");
        let locator = FragmentLocator::default();
        let view = view_of(&root);

        assert!(locator.locate(&view, "lazy dog").is_none());
        assert!(locator.locate(&view, "").is_none());
        assert!(locator.locate(&view, "The quick brown fox and more").is_none());
        assert!(locator.locate(&view, "QUICK").is_none());
    }

    #[test]
    fn test_locate_never_spans_nodes() {
        let root = ElementNode::new("body").with_child(
            ElementNode::new("p")
                .with_text("quick ")
                .with_child(ElementNode::new("b").with_text("brown")),
        );
        assert!(FragmentLocator::default().locate(&view_of(&root), "quick brown").is_none());
    }

    #[test]
    fn test_locate_normalized() {
        let root = ElementNode::new("body").with_text("The Quick\n  Brown fox");
        let found = FragmentLocator::new(MatchMode::normalized())
            .locate(&view_of(&root), "quick brown")
            .unwrap();
        assert_eq!(found.matched_text(), "Quick\n  Brown");
    }
}
