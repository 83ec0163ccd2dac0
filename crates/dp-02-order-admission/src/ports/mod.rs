//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that clients and verifiers call
//! - **Outbound (Driven)**: proof backend and the matching handoff

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
