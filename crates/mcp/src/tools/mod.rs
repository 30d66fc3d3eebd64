pub mod config;
pub mod greet;
mod registry;

pub use config::GetConfigTool;
pub use greet::GreetTool;
pub use registry::{json_schema_object, json_schema_string, Tool, ToolRegistry};

use std::sync::Arc;
use template_core::CoreService;

/// Registry with the standard tool set, shared by the CLI `mcp` subcommand
/// and the standalone binary.
pub fn default_registry(service: Arc<CoreService>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GreetTool::new(service.clone())));
    registry.register(Arc::new(GetConfigTool::new(service)));
    registry
}
