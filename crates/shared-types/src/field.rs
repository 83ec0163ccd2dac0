//! # Field Elements
//!
//! 256-bit commitment elements shared by every subsystem.
//!
//! A `Field` is stored big-endian. State keys, leaf values, Merkle nodes and
//! record commitments are all `Field`s, so the sparse Merkle map can walk a
//! key bit by bit without any conversion.
//!
//! ## Bit Numbering
//!
//! `bit(0)` is the least significant bit. The Merkle map consumes bits from
//! index 0 (leaf level) up to index 255 (just below the root).

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits in a field element (and depth of the sparse Merkle map).
pub const FIELD_BITS: usize = 256;

/// 256-bit field element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Field([u8; 32]);

impl Field {
    /// The zero element. Doubles as the digest of an empty leaf.
    pub const ZERO: Field = Field([0u8; 32]);

    /// The one element. Encodes boolean `true`.
    pub const ONE: Field = {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        Field(bytes)
    };

    /// Wrap raw big-endian bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consume into raw bytes.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Check if zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Read bit `index` (0 = least significant).
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < FIELD_BITS);
        let byte = self.0[31 - index / 8];
        (byte >> (index % 8)) & 1 == 1
    }

    /// Copy with bit `index` set.
    pub fn with_bit_set(mut self, index: usize) -> Self {
        self.0[31 - index / 8] |= 1 << (index % 8);
        self
    }

    /// Copy with bit `index` flipped.
    pub fn with_bit_flipped(mut self, index: usize) -> Self {
        self.0[31 - index / 8] ^= 1 << (index % 8);
        self
    }

    /// Copy with the lowest `count` bits cleared.
    ///
    /// `count >= 256` yields zero.
    pub fn clear_low_bits(mut self, count: usize) -> Self {
        if count >= FIELD_BITS {
            return Self::ZERO;
        }
        let full_bytes = count / 8;
        for byte in self.0.iter_mut().rev().take(full_bytes) {
            *byte = 0;
        }
        let rem = count % 8;
        if rem > 0 {
            self.0[31 - full_bytes] &= 0xFFu8 << rem;
        }
        self
    }

    /// Interpret as an unsigned 256-bit integer.
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Narrow to `u64`, `None` if the value does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        if self.0[..24].iter().any(|b| *b != 0) {
            return None;
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[24..]);
        Some(u64::from_be_bytes(buf))
    }

    /// Narrow to `u128`, `None` if the value does not fit.
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[..16].iter().any(|b| *b != 0) {
            return None;
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&self.0[16..]);
        Some(u128::from_be_bytes(buf))
    }

    /// Narrow to `bool`; only 0 and 1 are valid.
    pub fn to_bool(&self) -> Option<bool> {
        match self.to_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        }
    }

    /// Parse from a hex string (with or without `0x`), left-padded to 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, crate::TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() > 64 {
            return Err(crate::TypeError::FieldOverflow { len: s.len() / 2 });
        }
        let padded = format!("{:0>64}", s);
        let decoded = hex::decode(padded).map_err(|e| crate::TypeError::InvalidHex(e.to_string()))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Lowercase hex with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }
}

impl From<u64> for Field {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<u128> for Field {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<U256> for Field {
    fn from(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self.to_hex())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
