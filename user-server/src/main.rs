//! User Directory REST API Server
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin user-server -- --port 5000
//!
//! curl -X POST localhost:5000/users \
//!     -H 'Content-Type: application/json' \
//!     -d '{"name":"Carol","email":"carol@example.com"}'
//! ```

use std::path::PathBuf;

use clap::Parser;
use user_server::{create_router, logging, AppState, Config, UserStore};

#[derive(Parser)]
#[command(name = "user-server")]
#[command(version, about = "In-memory user directory REST API", long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind host
    #[arg(long, env = "USER_SERVER_HOST")]
    host: Option<String>,

    /// Bind port
    #[arg(short, long, env = "USER_SERVER_PORT")]
    port: Option<u16>,

    /// Log filter, e.g. `info` or `user_server=debug`
    #[arg(long, env = "USER_SERVER_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_overrides(cli.host, cli.port, cli.log_level);
    config.validate()?;

    logging::init(&config.logging);

    let state = AppState::new(UserStore::seeded());
    let user_count = state.store.len().await;
    let app = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, users = user_count, "User server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("User server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
