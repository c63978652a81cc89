use anyhow::{Context, Result};
use clap::Parser;
use schoolapi::{
    api, config, logging,
    students::{StudentService, StudentStore},
};
use std::io;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Ports tried in order when no port is configured.
const FALLBACK_PORTS: RangeInclusive<u16> = 8080..=8099;

#[derive(Parser)]
#[command(name = "schoolapi", about = "In-memory student CRUD service")]
struct Cli {
    /// Interface to bind (overrides `SERVER_HOST`).
    #[arg(long)]
    host: Option<Ipv4Addr>,
    /// Port to bind (overrides `SERVER_PORT`).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    config::init_config().context("failed to load configuration")?;
    let config = config::get_config();
    logging::init_tracing(config.log_file.as_deref());
    tracing::debug!(?config, "Loaded configuration");

    let store = match &config.seed_file {
        Some(path) => {
            let store = StudentStore::from_json_file(path)?;
            tracing::info!(path = %path.display(), students = store.len(), "Seeded student store");
            store
        }
        None => StudentStore::new(),
    };
    let app = api::create_router(Arc::new(StudentService::with_store(store)));

    let host = cli.host.unwrap_or(config.server_host);
    let listener = match cli.port.or(config.server_port) {
        Some(port) => TcpListener::bind((host, port)).await,
        None => bind_first_free(host, FALLBACK_PORTS).await,
    }
    .context("failed to bind listener")?;
    let addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!(%addr, "Serving student API");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}

/// Bind the first port in `ports` that is not already taken.
///
/// Errors other than `AddrInUse` stop the scan immediately.
async fn bind_first_free(host: Ipv4Addr, ports: RangeInclusive<u16>) -> io::Result<TcpListener> {
    let mut last_in_use = None;
    for port in ports {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port taken");
                last_in_use = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_in_use.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "empty port range")
    }))
}
