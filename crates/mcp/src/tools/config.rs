// Configuration inspection tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use std::sync::Arc;
use template_core::CoreService;

/// Tool that returns the application configuration as formatted JSON
pub struct GetConfigTool {
    service: Arc<CoreService>,
}

impl GetConfigTool {
    pub fn new(service: Arc<CoreService>) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl Tool for GetConfigTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_config".to_string(),
            description: "Get application configuration".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let json = serde_json::to_string_pretty(self.service.config())?;
        Ok(CallToolResult::text(json))
    }
}
