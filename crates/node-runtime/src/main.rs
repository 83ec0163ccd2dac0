//! # Dark-Pool Node Runtime
//!
//! Runs the sequencer over the authenticated store until Ctrl+C.
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`RUST_LOG` filters, default `info`)
//! 2. Load configuration (defaults, then `DP_*` environment overrides)
//! 3. Restore state and start the sequencer
//! 4. Wait for Ctrl+C, then drain and persist

use anyhow::{Context, Result};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env().context("Invalid configuration")?;

    let runtime = NodeRuntime::start(config)?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await?;

    Ok(())
}
