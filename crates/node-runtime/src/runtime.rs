//! # Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Open the data directory
//! 2. Restore the authenticated store from the last snapshot (empty if none)
//! 3. Spawn the sequencer task
//!
//! ## Shutdown Sequence
//!
//! 1. Drop the runtime's submission handle
//! 2. Wait for the sequencer to drain its queue (bounded by
//!    `shutdown_timeout_secs`)
//! 3. Persist a snapshot of committed state

use crate::adapters::FileStateDb;
use crate::config::NodeConfig;
use anyhow::{Context, Result};
use dp_01_state_store::{AuthenticatedStore, StateRoot};
use dp_05_sequencer::{QueryHandle, Sequencer, SequencerHandle};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct NodeRuntime {
    config: NodeConfig,
    db: FileStateDb,
    handle: SequencerHandle,
    query: QueryHandle,
    task: JoinHandle<()>,
}

impl NodeRuntime {
    /// Restore state and start the sequencer. Must run inside a tokio runtime.
    pub fn start(config: NodeConfig) -> Result<Self> {
        info!("===========================================");
        info!("  Dark-Pool Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let db = FileStateDb::open(
            &config.storage.data_dir,
            config.storage.min_disk_space_percent,
        )
        .context("Failed to open data directory")?;

        let store = AuthenticatedStore::load_from_db(&db, config.store_config())
            .context("Failed to restore state snapshot")?;
        info!(
            "Restored {} entries, root {}",
            store.len(),
            store.root()
        );

        let (handle, task) = Sequencer::spawn(config.sequencer.clone(), store);
        let query = handle.query();

        info!("Data Dir: {:?}", db.dir());
        if let Some(admin) = &config.sequencer.admin {
            info!("Eligibility admin: {}", admin);
        } else {
            warn!("No eligibility admin configured; any signer may change eligibility");
        }

        Ok(Self {
            config,
            db,
            handle,
            query,
            task,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Submission handle for clients of this node.
    pub fn handle(&self) -> SequencerHandle {
        self.handle.clone()
    }

    pub fn query(&self) -> QueryHandle {
        self.query.clone()
    }

    /// Persist committed state now.
    pub fn snapshot(&self) -> Result<StateRoot> {
        self.query
            .save_snapshot(&self.db)
            .context("Failed to save state snapshot")?;
        Ok(self.query.state_root())
    }

    /// Stop accepting requests, drain the queue and persist state.
    ///
    /// Handles cloned out of [`NodeRuntime::handle`] keep the sequencer
    /// alive; if any are still held when the timeout expires the snapshot
    /// is taken anyway and covers everything committed so far.
    pub async fn shutdown(self) -> Result<StateRoot> {
        info!("Initiating graceful shutdown...");
        let NodeRuntime {
            config,
            db,
            handle,
            query,
            task,
        } = self;
        drop(handle);

        let timeout = Duration::from_secs(config.storage.shutdown_timeout_secs);
        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Sequencer task ended abnormally: {}", e),
            Err(_) => warn!(
                "Sequencer still busy after {:?}; snapshotting committed state",
                timeout
            ),
        }

        query
            .save_snapshot(&db)
            .context("Failed to save state snapshot")?;
        let root = query.state_root();
        info!("Shutdown complete at root {}", root);
        Ok(root)
    }
}
