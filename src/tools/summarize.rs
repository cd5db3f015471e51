use crate::error::Result;
use crate::service::Action;
use crate::tools::extract::ExtractTextParams;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the summarize tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    /// What to request: summarize (default), keypoints or bullet
    #[serde(default = "default_action")]
    pub action: Action,

    #[serde(flatten)]
    pub source: ExtractTextParams,
}

fn default_action() -> Action {
    Action::Summarize
}

/// Tool that sends page or selection text to the summarization service
#[derive(Default)]
pub struct SummarizeTool;

impl Tool for SummarizeTool {
    type Params = SummarizeParams;

    fn name(&self) -> &str {
        "summarize"
    }

    fn execute_typed(&self, params: SummarizeParams, context: &mut ToolContext) -> Result<ToolResult> {
        let outcome = context.session.request(params.action, &params.source.source())?;

        Ok(ToolResult::success_with(serde_json::json!({
            "action": params.action,
            "text": outcome.to_text(),
            "result": outcome
        })))
    }
}
