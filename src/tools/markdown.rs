use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for getting markdown content (no parameters needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetMarkdownParams {}

#[derive(Default)]
pub struct GetMarkdownTool;

impl Tool for GetMarkdownTool {
    type Params = GetMarkdownParams;

    fn name(&self) -> &str {
        "get_markdown"
    }

    fn execute_typed(&self, _params: GetMarkdownParams, context: &mut ToolContext) -> Result<ToolResult> {
        let markdown = context.session.to_markdown();

        Ok(ToolResult::success_with(serde_json::json!({
            "length": markdown.len(),
            "markdown": markdown
        })))
    }
}
