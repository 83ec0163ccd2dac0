//! # dp-01-state-store
//!
//! Authenticated State Store for Dark-Pool.
//!
//! ## Role in System
//!
//! - **Single Commitment**: every registry, ledger and eligibility entry lives
//!   in one sparse Merkle map; its root is the only trusted summary.
//! - **Witnesses**: any key's value, including absence, can be proven against
//!   the root without trusting the store.
//! - **Atomic Write Sets**: runtime modules write through [`StateAccess`]; a
//!   [`StateTransaction`] commits all of a request's writes or none.
//!
//! ## Key Layout
//!
//! ```text
//! hash_fields([hash_name("Module.name"), hash_fields(key.to_fields())])  StateMap entry
//! hash_fields([hash_name("Module.name")])                                StateSlot
//! hash_fields(user.to_fields())                                          eligibility flag
//! ```
//!
//! ## Concurrency
//!
//! The store itself is single-threaded (`&mut self` writes). Shared readers
//! wrap it in `parking_lot::RwLock`; the sequencer is the only writer.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
