use crate::dom::DomTree;
use crate::error::Result;
use crate::highlight::TextNodeIndex;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the load_page tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoadPageParams {
    /// DOM snapshot: an element object with `tag_name`, `attributes` and typed `children`
    pub dom: serde_json::Value,
}

/// Tool for replacing the session's document
#[derive(Default)]
pub struct LoadPageTool;

impl Tool for LoadPageTool {
    type Params = LoadPageParams;

    fn name(&self) -> &str {
        "load_page"
    }

    fn execute_typed(&self, params: LoadPageParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tree = DomTree::from_value(params.dom)?;
        let view = TextNodeIndex::build(&tree.root, context.session.highlight_options());
        let elements = tree.count_elements();

        context.session.load_tree(tree);

        Ok(ToolResult::success_with(serde_json::json!({
            "elements": elements,
            "text_nodes": view.len(),
            "characters": view.char_count()
        })))
    }
}
