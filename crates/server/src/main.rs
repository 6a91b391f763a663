// crates/server/src/main.rs
//! Datalift server binary.
//!
//! Opens the job store, wires up the extraction client, and serves the
//! `/api/v1` surface until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use datalift_db::Database;
use datalift_server::{create_app, AppState, ExtractionClient, DEFAULT_UPSTREAM_URL};

/// Datalift extraction service API.
#[derive(Debug, Parser)]
#[command(name = "datalift", version)]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// SQLite database path.
    #[arg(long, env = "DB_NAME", default_value = "datalift.db")]
    db: PathBuf,

    /// Base URL of the upstream contact service.
    #[arg(long, env = "SERVICE_API_BASE_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream: String,

    /// Upstream request timeout, in seconds.
    #[arg(long, env = "API_TIMEOUT", default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let db = Database::new(&args.db).await?;
    let extraction = ExtractionClient::new(&args.upstream, Duration::from_secs(args.timeout))?;
    let state = AppState::new(db, extraction);
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(upstream = %args.upstream, "datalift listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
