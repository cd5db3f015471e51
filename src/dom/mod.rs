//! In-memory document model
//!
//! This module provides the document tree the highlighter works against:
//! - DomNode / ElementNode / TextNode: element and text nodes in document order
//! - NodePath: child-index path used to refer to a node
//! - DomTree: a rooted tree with JSON, HTML and Markdown conversions

pub mod node;
pub mod path;
pub mod tree;

pub use node::{DomNode, ElementNode, NON_RENDERING_TAGS, TextNode};
pub use path::NodePath;
pub use tree::DomTree;

use crate::error::Result;

/// Load a DOM tree from its JSON snapshot
pub fn load_dom(json: &str) -> Result<DomTree> {
    DomTree::from_json(json)
}
