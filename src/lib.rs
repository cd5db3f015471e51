//! # keypoint-highlight
//!
//! A Rust library that finds summarizer keypoints in a page's text and wraps each
//! match in a highlight marker, designed for AI agent integration.
//!
//! ## Features
//!
//! - **Highlighting engine**: locate the first occurrence of each keypoint inside a
//!   single text node and split that node around a marker element
//! - **Per-keypoint report**: every keypoint is either applied or skipped with a reason
//! - **Summarization client**: talk to a local summarization service for summaries,
//!   keypoints and bullet points
//! - **MCP Server**: Model Context Protocol server exposing the page tools
//!
//! ## MCP Server
//!
//! ```bash
//! # Talk to the service on localhost:10000 over stdio
//! cargo run --bin mcp-server --features mcp-server
//!
//! # Fall back to simulated answers when the service is down
//! cargo run --bin mcp-server --features mcp-server -- --simulate
//! ```
//!
//! ## Library Usage
//!
//! ### Highlighting keypoints
//!
//! ```rust
//! use keypoint_highlight::{DomTree, ElementNode, HighlightOptions, highlight::highlight_keypoints};
//!
//! let mut tree = DomTree::new(
//!     ElementNode::new("body").with_child(ElementNode::new("p").with_text("The quick brown fox jumps.")),
//! );
//!
//! let report = highlight_keypoints(&mut tree, &["quick brown", "lazy dog"], &HighlightOptions::default());
//!
//! assert_eq!(report.applied_count, 1);
//! assert_eq!(report.skipped_count, 1);
//! assert_eq!(
//!     tree.to_html(),
//!     "<body><p>The <span class=\"highlight\">quick brown</span> fox jumps.</p></body>"
//! );
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust,no_run
//! use keypoint_highlight::PageSession;
//! use serde_json::json;
//!
//! # fn main() -> keypoint_highlight::Result<()> {
//! let mut session = PageSession::default();
//! session.execute_tool(
//!     "load_page",
//!     json!({"dom": {"tag_name": "body", "children": [{"type": "text", "value": "Some article"}]}}),
//! )?;
//!
//! // Ask the service for keypoints and highlight them
//! let result = session.execute_tool("fetch_keypoints", json!({}))?;
//! println!("{}", result.data.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: document tree, node paths and JSON/HTML/Markdown conversion
//! - [`highlight`]: text node index, fragment locator, range highlighter and orchestrator
//! - [`extract`]: main content extraction for service requests
//! - [`service`]: summarization service client and offline fallback
//! - [`page`]: a loaded page with its options and collaborators
//! - [`tools`]: page tools (load, extract, highlight, summarize, export)
//! - [`config`]: highlight and service options
//! - [`error`]: error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature)

pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod page;
pub mod service;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use config::{HighlightOptions, MatchMode, ServiceOptions};
pub use dom::{DomNode, DomTree, ElementNode, NodePath};
pub use error::{HighlightError, Result};
pub use highlight::{HighlightOrchestrator, HighlightReport};
pub use page::PageSession;
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::HighlightServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
