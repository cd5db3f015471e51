use crate::config::HighlightOptions;
use crate::dom::{DomNode, ElementNode};
use crate::highlight::locate::Match;
use crate::highlight::report::{HighlightMarker, SkipReason};

/// Wraps a matched substring of a text node in a marker element.
///
/// The text node is replaced by up to three siblings: the text before the
/// match, the marker holding the matched text, and the text after it. Empty
/// before/after pieces are not inserted. No other node is touched.
#[derive(Debug, Clone)]
pub struct RangeHighlighter {
    tag: String,
    class: String,
}

impl RangeHighlighter {
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: class.into(),
        }
    }

    pub fn from_options(options: &HighlightOptions) -> Self {
        Self::new(options.marker_tag.clone(), options.marker_class.clone())
    }

    pub fn highlight(&self, root: &mut ElementNode, found: &Match) -> Result<HighlightMarker, SkipReason> {
        let stale = |detail: &str| SkipReason::StaleReference {
            path: found.path.clone(),
            detail: detail.to_string(),
        };

        let (parent, index) = found.path.split_last().ok_or_else(|| stale("match points at the root"))?;
        let siblings = root
            .children_at_mut(&parent)
            .ok_or_else(|| stale("parent element no longer exists"))?;

        let value = match siblings.get(index) {
            Some(DomNode::Text(text)) => &text.value,
            Some(DomNode::Element(_)) => return Err(stale("node is no longer a text node")),
            None => return Err(stale("node no longer exists")),
        };
        if *value != found.snapshot {
            return Err(stale("text changed since the snapshot"));
        }
        if found.len == 0
            || found.end() > value.len()
            || !value.is_char_boundary(found.start)
            || !value.is_char_boundary(found.end())
        {
            return Err(stale("range does not fit the node text"));
        }

        let before = &value[..found.start];
        let matched = value[found.start..found.end()].to_string();
        let after = &value[found.end()..];

        let mut replacement = Vec::with_capacity(3);
        if !before.is_empty() {
            replacement.push(DomNode::text(before));
        }
        let marker_index = index + replacement.len();
        replacement.push(DomNode::Element(
            ElementNode::new(self.tag.clone())
                .with_attribute("class", self.class.clone())
                .with_text(matched.clone()),
        ));
        if !after.is_empty() {
            replacement.push(DomNode::text(after));
        }

        siblings.splice(index..=index, replacement);

        Ok(HighlightMarker {
            path: parent.child(marker_index),
            start: found.start,
            len: found.len,
            text: matched,
        })
    }
}

impl Default for RangeHighlighter {
    fn default() -> Self {
        Self::from_options(&HighlightOptions::default())
    }
}
