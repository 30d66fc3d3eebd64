// MCP server: newline-delimited JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

pub struct McpServer {
    registry: ToolRegistry,
    server_info: ServerInfo,
    initialized: bool,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            registry,
            server_info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            initialized: false,
        }
    }

    /// Read requests from stdin until EOF, writing one response line per
    /// request to stdout. All logging goes to stderr; stdout carries only
    /// protocol messages.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("MCP server running on stdio");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                tracing::warn!("Dropping oversized message ({} bytes)", n);
                write_response(
                    &mut stdout,
                    &JsonRpcResponse::error(serde_json::Value::Null, JsonRpcError::parse_error()),
                )
                .await?;
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    write_response(
                        &mut stdout,
                        &JsonRpcResponse::error(
                            serde_json::Value::Null,
                            JsonRpcError::parse_error(),
                        ),
                    )
                    .await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Failed to parse request: {}", e);
                    write_response(
                        &mut stdout,
                        &JsonRpcResponse::error(
                            serde_json::Value::Null,
                            JsonRpcError::parse_error(),
                        ),
                    )
                    .await?;
                    continue;
                }
            };

            if let Some(resp) = self.handle(req).await {
                write_response(&mut stdout, &resp).await?;
            }
        }

        Ok(())
    }

    /// Dispatch a single request. Returns `None` for notifications, which
    /// get no response.
    pub async fn handle(&mut self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = req.id.clone().unwrap_or(serde_json::Value::Null);

        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("Invalid Request"),
            ));
        }

        // Only `initialize` is allowed before the handshake completes
        if !self.initialized && req.method != "initialize" {
            if req.id.is_none() {
                return None;
            }
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("Server not initialized"),
            ));
        }

        match req.method.as_str() {
            "initialize" => {
                self.initialized = true;
                Some(JsonRpcResponse::success(
                    id,
                    InitializeResult {
                        protocol_version: PROTOCOL_VERSION.to_string(),
                        capabilities: ServerCapabilities {
                            tools: ToolsCapability {
                                list_changed: false,
                            },
                        },
                        server_info: self.server_info.clone(),
                    },
                ))
            }
            "tools/list" => {
                req.id?;
                Some(JsonRpcResponse::success(
                    id,
                    ListToolsResult {
                        tools: self.registry.list_schemas(),
                    },
                ))
            }
            "tools/call" => {
                req.id?;
                let params: CallToolParams =
                    match serde_json::from_value(req.params.unwrap_or_default()) {
                        Ok(p) => p,
                        Err(e) => {
                            return Some(JsonRpcResponse::error(
                                id,
                                JsonRpcError::invalid_params(format!("invalid params: {}", e)),
                            ));
                        }
                    };
                Some(JsonRpcResponse::success(id, self.call_tool(params).await))
            }
            method if method.starts_with("notifications/") => None,
            method => {
                req.id?;
                Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::method_not_found(method),
                ))
            }
        }
    }

    /// Execute a tool call. Failures, including unknown tool names, become
    /// error-flagged results rather than transport errors.
    async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        let Some(tool) = self.registry.get(&params.name) else {
            return CallToolResult::error(format!("Unknown tool: {}", params.name));
        };

        match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }
}

async fn write_response(stdout: &mut tokio::io::Stdout, resp: &JsonRpcResponse) -> Result<()> {
    let out = serde_json::to_string(resp)?;
    stdout.write_all(out.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use crate::tools::default_registry;
    use std::sync::Arc;
    use template_core::{AppConfig, CoreService, Environment};

    fn test_server() -> McpServer {
        let config = AppConfig::new("Test App", "1.0.0", Environment::Test);
        let service = Arc::new(CoreService::new(config));
        McpServer::new(default_registry(service), "template-cli-mcp", "0.1.0")
    }

    async fn initialized_server() -> McpServer {
        let mut server = test_server();
        server
            .handle(JsonRpcRequest::new(1, "initialize", serde_json::json!({})))
            .await
            .unwrap();
        server
    }

    fn result_of(resp: JsonRpcResponse) -> serde_json::Value {
        assert!(resp.error.is_none(), "unexpected error: {:?}", resp.error);
        resp.result.unwrap()
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let mut server = test_server();
        let resp = server
            .handle(JsonRpcRequest::new(1, "initialize", serde_json::json!({})))
            .await
            .unwrap();

        let result = result_of(resp);
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "template-cli-mcp");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_request_before_initialize_is_rejected() {
        let mut server = test_server();
        let resp = server
            .handle(JsonRpcRequest::new(1, "tools/list", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(resp.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_tools_list_has_both_tools() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::new(2, "tools/list", serde_json::json!({})))
            .await
            .unwrap();

        let result: ListToolsResult = serde_json::from_value(result_of(resp)).unwrap();
        let names: Vec<_> = result.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["get_config", "greet"]);
    }

    #[tokio::test]
    async fn test_call_greet_tool() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::new(
                3,
                "tools/call",
                serde_json::json!({"name": "greet", "arguments": {"name": "World"}}),
            ))
            .await
            .unwrap();

        let result: CallToolResult = serde_json::from_value(result_of(resp)).unwrap();
        assert!(result.is_error.is_none());
        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "Hello, World! Welcome to Test App.");
    }

    #[tokio::test]
    async fn test_call_get_config_tool_parses_as_config() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::new(
                4,
                "tools/call",
                serde_json::json!({"name": "get_config", "arguments": {}}),
            ))
            .await
            .unwrap();

        let result: CallToolResult = serde_json::from_value(result_of(resp)).unwrap();
        let ToolContent::Text { text } = &result.content[0];
        let config: AppConfig = serde_json::from_str(text).unwrap();
        assert_eq!(config.name, "Test App");
        assert_eq!(config.environment, Environment::Test);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_flagged_not_fatal() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::new(
                5,
                "tools/call",
                serde_json::json!({"name": "nope", "arguments": {}}),
            ))
            .await
            .unwrap();

        let result: CallToolResult = serde_json::from_value(result_of(resp)).unwrap();
        assert_eq!(result.is_error, Some(true));
        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "Error: Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_invalid_tool_arguments_are_error_flagged() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::new(
                6,
                "tools/call",
                serde_json::json!({"name": "greet", "arguments": {}}),
            ))
            .await
            .unwrap();

        let result: CallToolResult = serde_json::from_value(result_of(resp)).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::new(7, "resources/list", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(resp.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let mut server = initialized_server().await;
        let resp = server
            .handle(JsonRpcRequest::notification(
                "notifications/initialized",
                serde_json::json!({}),
            ))
            .await;

        assert!(resp.is_none());
    }
}
