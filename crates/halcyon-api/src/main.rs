//! Halcyon CLI and REST API entry point.
//!
//! Binary name: `halcyon`
//!
//! Parses CLI arguments, then either starts the REST API server or runs
//! the interactive terminal chat client against a running server.

mod cli;
mod http;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Parser)]
#[command(name = "halcyon", about = "Halcyon Studio chat concierge")]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Bind address, overriding config (e.g. 0.0.0.0:8787)
        #[arg(long)]
        bind: Option<String>,

        /// Data directory (default: ~/.halcyon)
        #[arg(long, env = "HALCYON_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Chat with the concierge from the terminal
    Chat {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8787")]
        server: String,

        /// Bearer credential for the server
        #[arg(long, env = "HALCYON_TOKEN")]
        token: Option<String>,
    },
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".halcyon")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,halcyon=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { bind, data_dir } => {
            let data_dir = data_dir.unwrap_or_else(default_data_dir);
            let config = halcyon_infra::config::load_config(&data_dir).await;
            let addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());

            let app_state = AppState::init(&config, &data_dir).await?;
            let router = http::router::build_router(app_state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "listening");
            println!(
                "  {} Halcyon API listening on {}",
                console::style("●").green(),
                console::style(&addr).cyan()
            );
            axum::serve(listener, router).await?;
        }

        Commands::Chat { server, token } => {
            let token = token.ok_or_else(|| {
                anyhow::anyhow!("no credential: pass --token or set HALCYON_TOKEN")
            })?;
            cli::chat::run_chat(&server, token).await?;
        }
    }

    Ok(())
}
