//! # Sequencer (DP-05)
//!
//! The single sequencing authority. Owns the authenticated store and the
//! runtime modules, and is the only component that ever writes state.
//!
//! ## Request Flow
//!
//! ```text
//! client ──SignedTransaction──→ [SequencerHandle] ──mpsc──→ [Sequencer task]
//!    ↑                                                         │
//!    │                                              verify signature + nonce
//!    │                                              stage writes, commit
//!    │                                                         │
//!    └──── PendingTransaction::wait() ←──oneshot── Included / Rejected
//!                                                              │
//!                                               watch: new committed root
//! ```
//!
//! ## Guarantees
//!
//! - One writer: the sequencer task holds the only write lock
//! - Rejected requests (bad signature, bad nonce, failed call) leave the
//!   root unchanged and do not consume the nonce
//! - Readers never observe a half-applied request or batch

pub mod domain;
pub mod handle;
pub mod service;

pub use domain::*;
pub use handle::{PendingTransaction, QueryHandle, SequencerHandle};
pub use service::Sequencer;
