//! Page session management
//!
//! A [`PageSession`] holds the document being worked on, the highlighting and
//! service options, and the summarizer used to obtain keypoints.

pub mod session;

pub use crate::config::{HighlightOptions, MatchMode, ServiceOptions};
pub use session::PageSession;
