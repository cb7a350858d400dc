mod config;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use language::{Dispatcher, LanguageClient, catalog};
use mcp::{Server, ServerInfo};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{API_KEY_ENV, Config};
use error::Result;

const SERVER_NAME: &str = "language-mcp";

#[derive(Parser)]
#[command(name = "language-mcp")]
#[command(about = "MCP server for Google Cloud Natural Language analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: ./language-mcp.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Print the tool catalog as JSON
    Tools,
    /// Run a single tool call and print its result
    Call {
        /// Tool name, e.g. analyze_sentiment
        tool: String,
        /// Text to analyze
        #[arg(short, long)]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the protocol.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) | None => cmd_serve(cli.config.as_deref()).await,
        Some(Commands::Tools) => cmd_tools(),
        Some(Commands::Call { tool, text }) => {
            cmd_call(cli.config.as_deref(), &tool, &text).await
        }
    }
}

async fn cmd_serve(config_path: Option<&Path>) -> Result<()> {
    let dispatcher = build_dispatcher(config_path)?;
    let info = ServerInfo {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    info!(version = %info.version, "serving MCP over stdio");
    Server::new(info, dispatcher).serve_stdio().await?;
    info!("stdin closed, shutting down");
    Ok(())
}

fn cmd_tools() -> Result<()> {
    let tools = json!({ "tools": catalog::list_tools() });
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}

async fn cmd_call(config_path: Option<&Path>, tool: &str, text: &str) -> Result<()> {
    let dispatcher = build_dispatcher(config_path)?;
    let result = dispatcher.invoke(tool, Some(&json!({ "text": text }))).await;

    if result.is_error {
        eprintln!("{}", result.joined_text());
        std::process::exit(1);
    }

    println!("{}", result.joined_text());
    Ok(())
}

/// Load config and build the dispatcher. A missing API key stops startup.
fn build_dispatcher(config_path: Option<&Path>) -> Result<Dispatcher<LanguageClient>> {
    let config = Config::resolve(config_path)?.with_env_key(std::env::var(API_KEY_ENV).ok());
    let client = LanguageClient::new(config.client_config()?)?;

    info!(%client, timeout = ?client.config().timeout, "Language API client ready");
    Ok(Dispatcher::new(client))
}
