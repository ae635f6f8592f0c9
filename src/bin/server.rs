//! recordkeeper HTTP server.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use recordkeeper::db::Database;
use recordkeeper::http::{self, AppState};
use recordkeeper::services::SystemClock;
use recordkeeper::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// User and subscription record service
#[derive(Parser, Debug)]
#[command(name = "recordkeeper-server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info,recordkeeper=debug")]
    log: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::builder()
        .listen_addr(args.listen)
        .log_filter(args.log)
        .build();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt().with_env_filter(filter).with_target(true).init();

    tracing::info!("recordkeeper v{}", recordkeeper::VERSION);

    let state = match AppState::new(Database::new(), Arc::new(SystemClock)) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("failed to wire repositories: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received Ctrl+C, shutting down");
        }
    };

    if let Err(e) = http::serve(state, &config.listen_addr, shutdown).await {
        tracing::error!("server error: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("server stopped");
    ExitCode::SUCCESS
}
