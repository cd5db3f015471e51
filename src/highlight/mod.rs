//! Keypoint highlighting
//!
//! A highlighting pass takes the keypoints returned by the summarization service and
//! marks the first occurrence of each one in the document:
//! - [`TextNodeIndex`] snapshots the text nodes of a tree in document order
//! - [`FragmentLocator`] finds the first text node containing a keypoint
//! - [`RangeHighlighter`] wraps the matched substring in a marker element
//! - [`HighlightOrchestrator`] drives the three for a whole keypoint list and
//!   collects a [`HighlightReport`]
//!
//! Matching happens inside a single text node only. A keypoint whose text is split
//! by inline markup is reported as not found.

pub mod index;
pub mod locate;
pub mod marker;
pub mod normalize;
pub mod orchestrator;
pub mod report;

pub use index::{DocumentTextView, TextEntry, TextNodeIndex};
pub use locate::{FragmentLocator, Match};
pub use marker::RangeHighlighter;
pub use orchestrator::HighlightOrchestrator;
pub use report::{AppliedKeypoint, HighlightMarker, HighlightReport, PreconditionFailed, SkipReason, SkippedKeypoint};

use crate::config::HighlightOptions;
use crate::dom::DomTree;

/// Highlight `keypoints` in `tree` with the given options
pub fn highlight_keypoints<S: AsRef<str>>(tree: &mut DomTree, keypoints: &[S], options: &HighlightOptions) -> HighlightReport {
    HighlightOrchestrator::new(options.clone()).apply_all(&mut tree.root, keypoints)
}
