//! MCP (Model Context Protocol) server implementation for keypoint highlighting
//!
//! This module provides rmcp-compatible tools by wrapping the page tool implementations.

pub mod handler;
pub use handler::HighlightServer;

use crate::error::HighlightError;
use crate::tools::{
    ExtractTextParams, FetchKeypointsParams, GetHtmlParams, GetMarkdownParams, HighlightKeypointsParams,
    LoadPageParams, SummarizeParams, ToolResult as InternalToolResult,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use serde::Serialize;

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = if let Some(data) = result.data {
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        } else {
            "Success".to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        // A failed result carries the precondition that stopped the pass
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::invalid_request(error_msg, None))
    }
}

fn convert_error(error: HighlightError) -> McpError {
    match error {
        HighlightError::InvalidParams(_) | HighlightError::DomParseFailed(_) => {
            McpError::invalid_params(error.to_string(), None)
        }
        HighlightError::PreconditionFailed(_) => McpError::invalid_request(error.to_string(), None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// Run a blocking tool call. On a multi-threaded runtime the worker hands its
/// other tasks off first, so a slow service request only holds up its own session.
#[cfg(feature = "mcp-server")]
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    use tokio::runtime::{Handle, RuntimeFlavor};

    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => tokio::task::block_in_place(f),
        _ => f(),
    }
}

#[cfg(not(feature = "mcp-server"))]
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    f()
}

impl HighlightServer {
    fn run_tool<P: Serialize>(&self, name: &str, params: P) -> Result<CallToolResult, McpError> {
        let tool_params =
            serde_json::to_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let result = run_blocking(|| self.session().execute_tool(name, tool_params)).map_err(convert_error)?;

        convert_result(result)
    }
}

#[tool_router]
impl HighlightServer {
    /// Load a DOM snapshot
    #[tool(description = "Load a page as a JSON DOM snapshot, replacing the current document")]
    fn page_load(&self, params: Parameters<LoadPageParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("load_page", params.0)
    }

    /// Extract the text that would be sent to the summarization service
    #[tool(description = "Extract the main content text of the page, the whole document, or a given selection")]
    fn page_extract_text(&self, params: Parameters<ExtractTextParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("extract_text", params.0)
    }

    /// Highlight caller-supplied keypoints
    #[tool(description = "Wrap the first occurrence of each keypoint in a highlight marker and report what was skipped")]
    fn page_highlight(&self, params: Parameters<HighlightKeypointsParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("highlight_keypoints", params.0)
    }

    /// Request keypoints from the service and highlight them
    #[tool(description = "Ask the summarization service for keypoints of the page and highlight them")]
    fn page_fetch_and_highlight(&self, params: Parameters<FetchKeypointsParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("fetch_keypoints", params.0)
    }

    /// Summarize the page or a selection
    #[tool(description = "Summarize the page or a selection, or turn it into keypoints or bullet points")]
    fn page_summarize(&self, params: Parameters<SummarizeParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("summarize", params.0)
    }

    /// Serialize the document as HTML
    #[tool(description = "Get the current document, including highlight markers, as HTML")]
    fn page_get_html(&self, params: Parameters<GetHtmlParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("get_html", params.0)
    }

    /// Render the document as Markdown
    #[tool(description = "Get the current document as Markdown")]
    fn page_get_markdown(&self, params: Parameters<GetMarkdownParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("get_markdown", params.0)
    }
}
