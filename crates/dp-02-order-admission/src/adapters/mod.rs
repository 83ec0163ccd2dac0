pub mod attestation;
pub mod matching;

pub use attestation::*;
pub use matching::*;
