//! linkd - link reachability service
//!
//! Accepts batches of links over HTTP, probes each for reachability, and
//! appends the classified outcome to an append-only record log. Batches
//! that arrive during shutdown are parked in a pending log and replayed on
//! the next startup, before the server accepts traffic.
//!
//! # Usage
//!
//! ```bash
//! # Run with built-in defaults
//! linkd
//!
//! # Run with a config file
//! linkd --config configs/linkd.toml
//!
//! # Override the log level
//! linkd --log-level debug
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use linkd_api::{build_router, AppState};
use linkd_config::Config;
use linkd_service::{Prober, Processor};
use linkd_store::{FileStore, StoreConfig};

/// Link reachability service
#[derive(Parser, Debug)]
#[command(name = "linkd")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).context("cannot load config")?,
        None => Config::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| config.logging.level.as_str());
    init_logging(level)?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting linkd");

    let store = FileStore::open(StoreConfig {
        dir: config.storage.dir.clone(),
        records_file: config.storage.records_file.clone(),
        pending_file: config.storage.pending_file.clone(),
    })
    .context("cannot open record store")?;

    let prober = Prober::new(config.probe.timeout).context("cannot build probe client")?;
    let processor = Arc::new(Processor::new(Arc::new(store), Arc::new(prober)));

    // Drain batches parked during a previous shutdown before accepting
    // traffic - the pending log is only ever cleared after replay.
    match processor.replay_pending().await {
        Ok(stats) if stats.replayed > 0 || stats.requeued > 0 => {
            info!(
                replayed = stats.replayed,
                requeued = stats.requeued,
                "startup replay finished"
            );
        }
        Ok(_) => {}
        Err(err) => warn!(error = %err, "startup replay failed, continuing"),
    }

    let shutdown = CancellationToken::new();
    let state = AppState::new(processor, shutdown.clone(), config.server.request_timeout);
    let app = build_router(state);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", bind_addr))?;
    info!(addr = %listener.local_addr()?, "http server listening");

    tokio::spawn(watch_signals(shutdown.clone()));

    let server = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = shutdown.clone();
        async move { shutdown.cancelled().await }
    });

    // Bound the drain of in-flight requests. Batches still arriving inside
    // the window are parked in the pending log and replayed next start.
    let drain_deadline = async {
        shutdown.cancelled().await;
        tokio::time::sleep(config.server.shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result.context("http server failed")?,
        _ = drain_deadline => {
            warn!("graceful shutdown window elapsed, aborting in-flight requests");
        }
    }

    info!("shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}

/// Cancel the service-lifetime scope on SIGINT or SIGTERM
async fn watch_signals(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "cannot install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("received shutdown signal");
    shutdown.cancel();
}
