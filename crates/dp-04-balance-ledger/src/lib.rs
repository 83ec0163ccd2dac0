//! # Balance Ledger (DP-04)
//!
//! Authenticated balances keyed by `(TokenId, owner)`, plus the client-side
//! cache that reads them back.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `BalanceLedger` over any `StateAccess`
//! - **Ports Layer** (`ports/`): `LedgerQuery`, `TransactionSubmitter`
//! - **Client** (`client.rs`): `BalancesClient` cache with a loading flag
//!
//! Absent entries read as zero. Credits go through signed requests applied by
//! the sequencer; the client only ever observes committed state.

pub mod client;
pub mod domain;
pub mod ports;

pub use client::{BalancesClient, BalancesState};
pub use domain::*;
pub use ports::*;
