//! Page tools
//!
//! Every operation an agent or the CLI can run against a [`PageSession`] is a
//! [`Tool`] with typed, schema-described parameters. The [`ToolRegistry`] looks
//! tools up by name and feeds them JSON parameters.

pub mod extract;
pub mod highlight;
pub mod html;
pub mod load;
pub mod markdown;
pub mod summarize;

pub use extract::{ExtractTextParams, ExtractTextTool};
pub use highlight::{FetchKeypointsParams, FetchKeypointsTool, HighlightKeypointsParams, HighlightKeypointsTool};
pub use html::{GetHtmlParams, GetHtmlTool};
pub use load::{LoadPageParams, LoadPageTool};
pub use markdown::{GetMarkdownParams, GetMarkdownTool};
pub use summarize::{SummarizeParams, SummarizeTool};

use crate::error::{HighlightError, Result};
use crate::page::PageSession;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success_with(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Mutable access to the session a tool runs against
pub struct ToolContext<'a> {
    pub session: &'a mut PageSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a mut PageSession) -> Self {
        Self { session }
    }
}

/// A named operation with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(serde_json::Value::Null)
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;
}

/// Object-safe view of a [`Tool`] used by the registry
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;

    fn parameters_schema(&self) -> serde_json::Value;

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> serde_json::Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: T::Params = serde_json::from_value(params)
            .map_err(|e| HighlightError::InvalidParams(format!("{}: {}", Tool::name(self), e)))?;
        self.execute_typed(typed, context)
    }
}

/// Registry of tools, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every page tool registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(LoadPageTool);
        registry.register(ExtractTextTool);
        registry.register(HighlightKeypointsTool);
        registry.register(FetchKeypointsTool);
        registry.register(SummarizeTool);
        registry.register(GetHtmlTool);
        registry.register(GetMarkdownTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name with JSON parameters
    pub fn execute(&self, name: &str, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| HighlightError::ToolNotFound(name.to_string()))?;
        log::debug!("Executing tool {}", name);
        tool.execute(params, context)
    }
}
