//! # Dark-Pool Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks (store, witnesses, admission)
//! └── src/integration/  # cross-subsystem flows
//!     ├── scenarios.rs  # acceptance scenarios A-D
//!     ├── properties.rs # soundness, binding, completeness, registry, ledger
//!     ├── admission.rs  # eligibility -> proof -> matching handoff
//!     └── sequencer.rs  # signed requests through the sequencer
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dp-tests
//! cargo test -p dp-tests integration::properties::
//! cargo bench -p dp-tests
//! ```

pub mod integration;
