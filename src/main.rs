//! Music API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──▶ routing::classify
//!                                   │
//!        ┌──────────────┬──────────┴─────────┬────────────────────┐
//!        ▼              ▼                    ▼                    ▼
//!    preflight     405 reject        audio::AudioProxy     backends::Backend
//!                                   (host allow-list)     (primary / alternate)
//!                                           │                    │
//!                                           └──── upstream ──────┘
//!                                                    │
//!   Client ◀── streamed body + security::CorsPolicy ◀┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use music_gateway::config::{load_config, GatewayConfig};
use music_gateway::observability::{logging, metrics};
use music_gateway::{GatewayServer, Shutdown};

#[derive(Parser)]
#[command(name = "music-gateway")]
#[command(about = "CORS gateway for music APIs and audio streams", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("music-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_backend = %config.backends.default,
        audio_suffix = %config.audio.trusted_suffix,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = GatewayServer::new(&config)?;

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
