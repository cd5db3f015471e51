use crate::config::{HighlightOptions, ServiceOptions};
use crate::page::PageSession;
use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// MCP server exposing keypoint highlighting over a shared page session
#[derive(Clone)]
pub struct HighlightServer {
    session: Arc<Mutex<PageSession>>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl HighlightServer {
    /// Create a server with default service and highlight options
    pub fn new() -> Self {
        Self::with_options(ServiceOptions::default(), HighlightOptions::default())
    }

    pub fn with_options(service_options: ServiceOptions, highlight_options: HighlightOptions) -> Self {
        Self::with_session(PageSession::new(service_options, highlight_options))
    }

    /// Serve an already configured session
    pub fn with_session(session: PageSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }

    /// Lock the shared session, recovering from a poisoned lock
    pub fn session(&self) -> MutexGuard<'_, PageSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for HighlightServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for HighlightServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Load a page snapshot with page_load, then highlight keypoints with page_highlight \
                 or let the summarization service pick them with page_fetch_and_highlight. \
                 page_get_html returns the marked-up document."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
