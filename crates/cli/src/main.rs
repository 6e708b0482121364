mod config;
mod error;
mod observability;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use server::{Dispatcher, router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use config::{API_KEY_ENV, Config};
use error::{Error, Result};

#[derive(Parser)]
#[command(name = "medassist")]
#[command(about = "Clinical document generation endpoint backed by a completion API", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./medassist.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP endpoint
    Serve {
        /// Address to bind, overriding the config file
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// List registered tools
    Tools,
    /// Print the prompt a tool would send, without calling the API
    Render {
        /// Tool id, e.g. mental-health
        tool: String,
        /// Input data as JSON, or @path to read it from a file
        #[arg(short, long)]
        input: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { listen }) => cmd_serve(config, listen).await,
        None => cmd_serve(config, None).await,
        Some(Commands::Tools) => cmd_tools(&config),
        Some(Commands::Render { tool, input }) => cmd_render(&config, &tool, &input),
    }
}

async fn cmd_serve(config: Config, listen: Option<String>) -> Result<()> {
    observability::init_tracing(config.logging.format);

    let registry = Arc::new(config.registry()?);
    let gateway = config.gateway()?;
    if gateway.is_none() {
        warn!("{API_KEY_ENV} is not set; generate requests will fail");
    }

    let dispatcher = Arc::new(Dispatcher::new(registry.clone(), gateway));
    let addr = listen.unwrap_or(config.server.listen_addr);
    let listener = TcpListener::bind(&addr).await?;

    info!(
        addr = %listener.local_addr()?,
        tools = ?registry.list_ids(),
        "medassist v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn cmd_tools(config: &Config) -> Result<()> {
    let registry = config.registry()?;

    if registry.is_empty() {
        println!("No tools registered.");
        return Ok(());
    }

    println!(
        "{:<24}  {:<36}  {:<12}  {:<5}  MAX TOKENS",
        "ID", "NAME", "MODEL", "TEMP"
    );
    println!("{}", "-".repeat(96));

    for tool in registry.tools() {
        println!(
            "{:<24}  {:<36}  {:<12}  {:<5.2}  {}",
            tool.id, tool.display_name, tool.model, tool.temperature, tool.max_tokens
        );
        if !tool.description.is_empty() {
            println!("    {}", tool.description);
        }
    }

    Ok(())
}

fn cmd_render(config: &Config, tool_id: &str, input: &str) -> Result<()> {
    let tools = config.registry()?;
    let tool = tools.lookup(tool_id)?;

    let input = read_input(input)?;
    let prompt = registry::compile(&tool.prompt_template, &input, Utc::now())?;

    println!(
        "# {} (model {}, temperature {}, max_tokens {})\n",
        tool.display_name, tool.model, tool.temperature, tool.max_tokens
    );
    println!("{prompt}");
    Ok(())
}

fn read_input(arg: &str) -> Result<serde_json::Value> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).map_err(|e| Error::InvalidInput(e.to_string()))
}
