// Greeting tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use serde::Deserialize;
use std::sync::Arc;
use template_core::CoreService;

/// Tool that greets a user by name
pub struct GreetTool {
    service: Arc<CoreService>,
}

impl GreetTool {
    pub fn new(service: Arc<CoreService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Deserialize)]
struct GreetArgs {
    name: String,
}

#[async_trait::async_trait]
impl Tool for GreetTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "greet".to_string(),
            description: "Greet a user by name".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Name to greet"),
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GreetArgs = serde_json::from_value(arguments)
            .map_err(|e| anyhow::anyhow!("invalid arguments: {}", e))?;
        let message = self.service.greet(&args.name)?;
        Ok(CallToolResult::text(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use template_core::{AppConfig, Environment};

    fn greet_tool() -> GreetTool {
        let config = AppConfig::new("Test App", "1.0.0", Environment::Test);
        GreetTool::new(Arc::new(CoreService::new(config)))
    }

    #[tokio::test]
    async fn test_greet_returns_text_content() {
        let result = greet_tool()
            .execute(serde_json::json!({"name": "World"}))
            .await
            .unwrap();

        assert!(result.is_error.is_none());
        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "Hello, World! Welcome to Test App.");
    }

    #[tokio::test]
    async fn test_greet_missing_name_fails() {
        assert!(greet_tool().execute(serde_json::json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_greet_empty_name_fails() {
        assert!(greet_tool()
            .execute(serde_json::json!({"name": ""}))
            .await
            .is_err());
    }

    #[test]
    fn test_schema_requires_name() {
        let schema = greet_tool().schema();
        assert_eq!(schema.name, "greet");
        assert_eq!(schema.input_schema["required"][0], "name");
    }
}
