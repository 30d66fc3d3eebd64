use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use template_core::{AppConfig, CoreService};
use template_mcp::{default_registry, McpServer};

mod api;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "template-cli")]
#[command(about = "Multi-mode template application", version, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "template.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Greet a user
    Greet {
        /// Name to greet
        name: String,
    },
    /// Show application info
    Info,
    /// Run the MCP server on stdio
    Mcp,
    /// Start the web server
    Web {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000, env = "PORT")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; in mcp mode stdout belongs to the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "template_cli=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Greet { name } => {
            let config = AppConfig::load(&cli.config, "Template CLI")?;
            let service = CoreService::new(config);
            println!("{}", service.greet(&name)?);
        }
        Command::Info => {
            let config = AppConfig::load(&cli.config, "Template CLI")?;
            let service = CoreService::new(config);
            let cfg = service.config();
            println!("Application Info:");
            println!("  Name: {}", cfg.name);
            println!("  Version: {}", cfg.version);
            println!("  Environment: {}", cfg.environment);
        }
        Command::Mcp => {
            let config = AppConfig::load(&cli.config, "Template CLI - MCP Mode")?;
            let service = Arc::new(CoreService::new(config));
            let mut server = McpServer::new(
                default_registry(service),
                "template-cli-mcp",
                env!("CARGO_PKG_VERSION"),
            );
            server.run().await?;
        }
        Command::Web { port, host } => {
            let config = AppConfig::load(&cli.config, "Template CLI - Web Mode")?;
            let service = CoreService::new(config);
            let addr = format!("{}:{}", host, port);
            api::serve(&addr, service).await?;
        }
    }

    Ok(())
}
