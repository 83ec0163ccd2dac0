//! # Token Registry (DP-03)
//!
//! Assigns compact, densely increasing `TokenIdId`s to external `TokenId`s.
//!
//! ## State Layout
//!
//! | Name | Kind | Entry |
//! |------|------|-------|
//! | `TokenRegistry.tokenIdToTokenIdId` | map | `TokenId -> TokenIdId` |
//! | `TokenRegistry.tokenIdIdToTokenId` | map | `TokenIdId -> TokenId` |
//! | `TokenRegistry.lastTokenIdId` | slot | counter, absent = 0 |
//!
//! The `n`-th registration from an empty counter receives id `n`.

pub mod domain;

pub use domain::*;
