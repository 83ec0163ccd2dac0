//! Cross-subsystem integration tests.

pub mod admission;
pub mod properties;
pub mod scenarios;
pub mod sequencer;
