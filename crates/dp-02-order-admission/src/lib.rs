//! # Order Admission Verifier (DP-02)
//!
//! Gates order submission on proof that the user is eligible under the
//! current state root, without revealing the order.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the pure admission circuit, orders, wire types
//! - **Ports Layer** (`ports/`): `OrderAdmissionApi`, `ProofBackend`, `MatchingGateway`
//! - **Adapters** (`adapters/`): keyed-digest attestation backend, channel handoff
//! - **Service Layer** (`service.rs`): wires the circuit to backend and matching
//!
//! ## Security Notes
//!
//! - A failed circuit never reaches the backend, so no artifact exists for it
//! - Submissions are checked against the committed root at submission time
//! - The public output carries only the order commitment

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{AttestationBackend, ChannelMatchingGateway};
pub use domain::*;
pub use ports::{MatchingError, MatchingGateway, OrderAdmissionApi, ProofBackend};
pub use service::OrderAdmissionService;
