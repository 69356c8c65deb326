//! connect-bridge
//!
//! Exposes a small REST API and forwards each request to a remote-control
//! controller session.
//!
//! # Architecture Overview
//!
//! ```text
//!     flags / config / env
//!            │
//!            ▼
//!     ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!     │   session    │───▶│  controller  │◀───│    http      │◀──── REST clients
//!     │ login select │    │ (Arc, shared)│    │  handlers    │
//!     └──────────────┘    └──────┬───────┘    └──────┬───────┘
//!                                │                   │
//!                                ▼                   ▼
//!                          device ecosystem    devices::resolve
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tokio::net::TcpListener;

use connect_bridge::config::{read_config, validate_config, BridgeConfig, ConfigError};
use connect_bridge::lifecycle::{connect, Shutdown};
use connect_bridge::observability::{logging, metrics};
use connect_bridge::session::{LoginInputs, LoginStrategy, LoopbackConnector};
use connect_bridge::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "connect-bridge")]
#[command(about = "REST bridge for remote playback control", long_about = None)]
struct Cli {
    /// Account username
    #[arg(long)]
    username: Option<String>,

    /// Account password
    #[arg(long)]
    password: Option<String>,

    /// Path to saved session blob (created by discovery if missing)
    #[arg(long = "blobPath")]
    blob_path: Option<String>,

    /// Name of this device [default: SpotControlServer]
    #[arg(long)]
    devicename: Option<String>,

    /// Name of controlled device [default: SpotControl]
    #[arg(long)]
    controlled: Option<String>,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address [default: 0.0.0.0:8080]
    #[arg(long)]
    bind: Option<String>,
}

impl Cli {
    /// Flags take precedence over the config file.
    fn apply(&self, config: &mut BridgeConfig) {
        let overrides = [
            (&self.username, &mut config.login.username),
            (&self.password, &mut config.login.password),
            (&self.blob_path, &mut config.login.blob_path),
            (&self.devicename, &mut config.device.name),
            (&self.controlled, &mut config.device.controlled),
            (&self.bind, &mut config.listener.bind_address),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
    }

    /// File (or defaults), then flags, then one validation pass.
    fn resolve_config(&self) -> Result<BridgeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => BridgeConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = cli.resolve_config()?;

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("connect-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    let inputs = LoginInputs {
        username: config.login.username.clone(),
        password: config.login.password.clone(),
        blob_path: config.login.blob_path.clone(),
        client_secret: None,
    }
    .with_env_secret();

    let Some(strategy) = LoginStrategy::select(&inputs) else {
        println!("{}", Cli::command().render_usage());
        println!(
            "  connect-bridge --username USERNAME --password PASSWORD --devicename DEVICE_NAME"
        );
        return Ok(());
    };

    let connector = LoopbackConnector::new(config.catalog.clone());
    let controller = match connect(&connector, &strategy, &config.device.name).await {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!(strategy = strategy.kind(), error = %e, "Login failed");
            eprintln!("Error logging in: {}", e);
            return Ok(());
        }
    };

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
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, controller);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
