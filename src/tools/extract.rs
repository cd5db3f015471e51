use crate::error::Result;
use crate::extract::TextSource;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_text tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractTextParams {
    /// Use this selected text instead of the page content
    #[serde(default)]
    pub selection: Option<String>,

    /// Extract every rendered text node instead of the main content container
    #[serde(default)]
    pub whole_document: bool,
}

impl ExtractTextParams {
    pub fn source(&self) -> TextSource {
        match (&self.selection, self.whole_document) {
            (Some(selection), _) => TextSource::Selection(selection.clone()),
            (None, true) => TextSource::Document,
            (None, false) => TextSource::Page,
        }
    }
}

/// Tool for extracting the text that would be sent to the summarization service
#[derive(Default)]
pub struct ExtractTextTool;

impl Tool for ExtractTextTool {
    type Params = ExtractTextParams;

    fn name(&self) -> &str {
        "extract_text"
    }

    fn execute_typed(&self, params: ExtractTextParams, context: &mut ToolContext) -> Result<ToolResult> {
        let text = context.session.extract_text(&params.source())?;

        Ok(ToolResult::success_with(serde_json::json!({
            "length": text.chars().count(),
            "text": text
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, ElementNode};
    use crate::error::HighlightError;
    use crate::page::PageSession;
    use serde_json::json;

    fn session() -> PageSession {
        let mut session = PageSession::default();
        session.load_tree(DomTree::new(
            ElementNode::new("body")
                .with_child(ElementNode::new("header").with_text("Site"))
                .with_child(ElementNode::new("main").with_text("Story text")),
        ));
        session
    }

    #[test]
    fn test_params_source() {
        assert_eq!(ExtractTextParams::default().source(), TextSource::Page);
        let params: ExtractTextParams = serde_json::from_value(json!({"whole_document": true})).unwrap();
        assert_eq!(params.source(), TextSource::Document);
        let params: ExtractTextParams = serde_json::from_value(json!({"selection": "x", "whole_document": true})).unwrap();
        assert_eq!(params.source(), TextSource::Selection("x".to_string()));
    }

    #[test]
    fn test_extract_page_text() {
        let mut session = session();
        let result = session.execute_tool("extract_text", json!({})).unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["text"], "Story text");
        assert_eq!(data["length"], 10);

        let result = session.execute_tool("extract_text", json!({"whole_document": true})).unwrap();
        assert_eq!(result.data.unwrap()["text"], "Site\nStory text");
    }

    #[test]
    fn test_extract_blank_selection_fails() {
        let mut session = session();
        let err = session.execute_tool("extract_text", json!({"selection": "  "})).unwrap_err();
        assert!(matches!(err, HighlightError::PreconditionFailed(_)));
    }
}
