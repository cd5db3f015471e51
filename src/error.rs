use thiserror::Error;

use crate::highlight::PreconditionFailed;

/// Errors raised by the document, service and tool layers.
///
/// Per-keypoint outcomes (a keypoint that is not found, or a match that went
/// stale) are not errors; they are recorded in a
/// [`HighlightReport`](crate::highlight::HighlightReport).
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("Failed to parse DOM snapshot: {0}")]
    DomParseFailed(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(#[from] PreconditionFailed),

    #[error("Summarization service request failed: {0}")]
    ServiceFailed(String),

    #[error("Summarization service rejected the request ({status}): {message}")]
    ServiceRejected { status: u16, message: String },

    #[error("Unexpected service response: {0}")]
    UnexpectedResponse(String),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HighlightError>;
