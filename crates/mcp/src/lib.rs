// MCP (Model Context Protocol) server for the template application.
// Exposes the core service's operations as tools over JSON-RPC 2.0 stdio.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{default_registry, GetConfigTool, GreetTool, Tool, ToolRegistry};
