use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use beanscan_config::Config;
use beanscan_gateway::AppState;

#[derive(Parser)]
#[command(name = "beanscan")]
#[command(about = "BeanScan — coffee-bag scanner backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the BeanScan API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Probe a running server's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            beanscan_logging::init_logger("logs", &config.log_level);
            let config = Config { port: port.unwrap_or(config.port), ..config };
            run_server(config).await?;
        }
        Commands::Status => {
            beanscan_logging::init_console_logger(&config.log_level);
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("BeanScan is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        config = %config.to_redacted_json(),
        "starting BeanScan backend"
    );

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;

    let state = Arc::new(AppState::from_config(config).await?);
    beanscan_gateway::start_server(addr, state).await
}
