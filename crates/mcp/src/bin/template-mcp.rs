// Standalone MCP server binary

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use template_core::{AppConfig, CoreService};
use template_mcp::{default_registry, McpServer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout carries protocol messages, so all logging goes to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = std::env::var("TEMPLATE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("template.toml"));
    let config = AppConfig::load(&config_path, "Template CLI - MCP Mode")?;
    let service = Arc::new(CoreService::new(config));

    let mut server = McpServer::new(
        default_registry(service),
        "template-cli-mcp",
        env!("CARGO_PKG_VERSION"),
    );
    server.run().await
}
