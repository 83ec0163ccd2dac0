//! # Sequencer Service
//!
//! The single writer. One tokio task drains the submission queue in batches,
//! applies each request through the [`Runtime`] under the state write lock,
//! then publishes the new root and resolves pending handles.
//!
//! ## Ordering Guarantees
//!
//! - Requests are applied in queue order, one at a time
//! - A batch is applied under one write lock, so readers see either the
//!   root before the batch or the root after it
//! - Pending handles resolve only after the lock is released, so a caller
//!   that awaited `Included` always reads the committed effect

use crate::domain::{Runtime, SequencerConfig, SignedTransaction, TransactionStatus};
use crate::handle::{NonceTracker, QueryHandle, SequencerHandle};
use dp_01_state_store::{AuthenticatedStore, StateRoot};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A queued request and where to report its outcome.
pub(crate) struct Submission {
    pub(crate) transaction: SignedTransaction,
    pub(crate) respond: oneshot::Sender<TransactionStatus>,
}

pub struct Sequencer {
    config: SequencerConfig,
    runtime: Arc<RwLock<Runtime>>,
    submissions: mpsc::Receiver<Submission>,
    root_tx: watch::Sender<StateRoot>,
    nonces: NonceTracker,
    block_height: u64,
}

impl Sequencer {
    /// Start the sequencer over `store`.
    ///
    /// The task stops once every [`SequencerHandle`] is dropped and the
    /// queue is drained.
    pub fn spawn(config: SequencerConfig, store: AuthenticatedStore) -> (SequencerHandle, JoinHandle<()>) {
        let runtime = Arc::new(RwLock::new(Runtime::new(store, &config)));
        let initial_root = runtime.read().state_root();
        let (root_tx, root_rx) = watch::channel(initial_root);
        let (sender, submissions) = mpsc::channel(config.channel_capacity.max(1));
        let nonces = NonceTracker::default();

        let query = QueryHandle::new(Arc::clone(&runtime), root_rx);
        let handle = SequencerHandle::new(sender, query, nonces.clone());

        let sequencer = Sequencer {
            config,
            runtime,
            submissions,
            root_tx,
            nonces,
            block_height: 0,
        };

        info!("[dp-05] Sequencer starting at root {}", initial_root);
        let task = tokio::spawn(sequencer.run());
        (handle, task)
    }

    async fn run(mut self) {
        let max_batch_size = self.config.max_batch_size.max(1);

        while let Some(first) = self.submissions.recv().await {
            let mut batch = Vec::with_capacity(max_batch_size);
            batch.push(first);
            while batch.len() < max_batch_size {
                match self.submissions.try_recv() {
                    Ok(submission) => batch.push(submission),
                    Err(_) => break,
                }
            }
            self.process_batch(batch);
        }

        info!(
            "[dp-05] Sequencer stopped at block {} (root {})",
            self.block_height,
            *self.root_tx.borrow()
        );
    }

    fn process_batch(&mut self, batch: Vec<Submission>) {
        let block = self.block_height + 1;
        let mut outcomes = Vec::with_capacity(batch.len());
        let mut included = 0usize;

        let root = {
            let mut runtime = self.runtime.write();
            for submission in batch {
                let status = match runtime.apply(&submission.transaction) {
                    Ok(transition) => {
                        included += 1;
                        TransactionStatus::Included {
                            root: transition.new_root,
                            block,
                        }
                    }
                    Err(e) => {
                        warn!(
                            "[dp-05] Rejected {} from {} (nonce {}): {}",
                            submission.transaction.call.name(),
                            submission.transaction.sender,
                            submission.transaction.nonce,
                            e
                        );
                        self.nonces.reset(&submission.transaction.sender);
                        TransactionStatus::Rejected {
                            reason: e.to_string(),
                        }
                    }
                };
                outcomes.push((submission.respond, status));
            }
            runtime.state_root()
        };

        if included > 0 {
            self.block_height = block;
            self.root_tx.send_replace(root);
            debug!(
                "[dp-05] Block {}: {} included, {} rejected, root {}",
                block,
                included,
                outcomes.len() - included,
                root
            );
        }

        for (respond, status) in outcomes {
            // The submitter may have dropped its handle
            let _ = respond.send(status);
        }
    }
}
