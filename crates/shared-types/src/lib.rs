//! # Shared Types Crate
//!
//! Value types shared by every Dark-Pool subsystem: field elements, record
//! hashing, token identifiers and pool keys.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **One Commitment Shape**: every key, value and record commitment is a
//!   256-bit [`Field`], so the authenticated store never converts.

pub mod entities;
pub mod errors;
pub mod field;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use field::{Field, FIELD_BITS};
pub use hashing::{hash_fields, hash_leaf, hash_name, hash_node, ToFields};
