//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! - `config`: `NodeConfig` with `DP_*` environment overrides
//! - `adapters`: filesystem snapshot storage
//! - `runtime`: node lifecycle around the sequencer

pub mod adapters;
pub mod config;
pub mod runtime;

pub use config::{ConfigError, NodeConfig, StorageConfig};
pub use runtime::NodeRuntime;
