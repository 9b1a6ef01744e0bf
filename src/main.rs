//! HTTP server for the Tuttle business core.
//!
//! Run with: `cargo run --bin tuttle-server -- --config ./config/tuttle`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tuttle::api::{AppState, create_router};
use tuttle::config::ConfigLoader;

/// Serve the Tuttle business rules over HTTP.
#[derive(Debug, Parser)]
#[command(name = "tuttle-server")]
struct Args {
    /// Configuration directory containing settings.yaml and tax_tables/
    #[arg(long, default_value = "./config/tuttle")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let config = match ConfigLoader::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, path = %args.config.display(), "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(args.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, bind = %args.bind, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        bind = %args.bind,
        country = %config.settings().country,
        "Tuttle server listening"
    );

    let router = create_router(AppState::new(config));
    if let Err(err) = axum::serve(listener, router).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
