use crate::config::HighlightOptions;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-call overrides of the session's matching options
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MatchOverrides {
    /// Compare case-insensitively
    #[serde(default)]
    pub case_insensitive: Option<bool>,

    /// Treat whitespace runs as a single space
    #[serde(default)]
    pub collapse_whitespace: Option<bool>,

    /// Ignore text that is already highlighted
    #[serde(default)]
    pub skip_marked_text: Option<bool>,
}

impl MatchOverrides {
    pub fn apply(&self, base: &HighlightOptions) -> HighlightOptions {
        let mut options = base.clone();
        if let Some(case_insensitive) = self.case_insensitive {
            options.match_mode.case_insensitive = case_insensitive;
        }
        if let Some(collapse) = self.collapse_whitespace {
            options.match_mode.collapse_whitespace = collapse;
        }
        if let Some(skip) = self.skip_marked_text {
            options.skip_marked_text = skip;
        }
        options
    }
}

/// Parameters for the highlight_keypoints tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightKeypointsParams {
    /// Keypoints to highlight, applied in order
    pub keypoints: Vec<String>,

    #[serde(flatten)]
    pub overrides: MatchOverrides,
}

/// Tool for highlighting caller-supplied keypoints
#[derive(Default)]
pub struct HighlightKeypointsTool;

impl Tool for HighlightKeypointsTool {
    type Params = HighlightKeypointsParams;

    fn name(&self) -> &str {
        "highlight_keypoints"
    }

    fn execute_typed(&self, params: HighlightKeypointsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let options = params.overrides.apply(context.session.highlight_options());
        let report = context.session.highlight_with(&params.keypoints, &options);
        if report.precondition.is_some() {
            return Ok(ToolResult::failure(report.summary()));
        }

        Ok(ToolResult::success_with(serde_json::json!({
            "summary": report.summary(),
            "report": report
        })))
    }
}

/// Parameters for the fetch_keypoints tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FetchKeypointsParams {
    #[serde(flatten)]
    pub overrides: MatchOverrides,
}

/// Tool that asks the summarization service for keypoints of the whole document and highlights them
#[derive(Default)]
pub struct FetchKeypointsTool;

impl Tool for FetchKeypointsTool {
    type Params = FetchKeypointsParams;

    fn name(&self) -> &str {
        "fetch_keypoints"
    }

    fn execute_typed(&self, params: FetchKeypointsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let previous = context.session.highlight_options().clone();
        context.session.set_highlight_options(params.overrides.apply(&previous));
        let outcome = context.session.fetch_and_highlight();
        context.session.set_highlight_options(previous);

        let (keypoints, report) = outcome?;
        if report.precondition.is_some() {
            return Ok(ToolResult::failure(report.summary()));
        }
        Ok(ToolResult::success_with(serde_json::json!({
            "keypoints": keypoints,
            "summary": report.summary(),
            "report": report
        })))
    }
}
