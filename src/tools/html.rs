use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for getting the document as HTML (no parameters needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetHtmlParams {}

#[derive(Default)]
pub struct GetHtmlTool;

impl Tool for GetHtmlTool {
    type Params = GetHtmlParams;

    fn name(&self) -> &str {
        "get_html"
    }

    fn execute_typed(&self, _params: GetHtmlParams, context: &mut ToolContext) -> Result<ToolResult> {
        let html = context.session.to_html();
        let markers = context
            .session
            .tree()
            .count_with_class(&context.session.highlight_options().marker_class);

        Ok(ToolResult::success_with(serde_json::json!({
            "length": html.len(),
            "markers": markers,
            "html": html
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, ElementNode};
    use crate::page::PageSession;
    use serde_json::json;

    #[test]
    fn test_get_html_tool_name() {
        let tool = GetHtmlTool::default();
        assert_eq!(tool.name(), "get_html");
        assert!(tool.parameters_schema().is_object());
    }

    #[test]
    fn test_get_html_counts_markers() {
        let mut session = PageSession::default();
        session.load_tree(DomTree::new(ElementNode::new("body").with_text("one two")));
        session.highlight(&["two"]);

        let data = session.execute_tool("get_html", json!({})).unwrap().data.unwrap();
        assert_eq!(data["html"], "<body>one <span class=\"highlight\">two</span></body>");
        assert_eq!(data["markers"], 1);
    }
}
