//! # Orders
//!
//! The private input to admission. An order never leaves the client in the
//! clear; only its commitment (`Order::hash`) appears in the public output.

use serde::{Deserialize, Serialize};
use shared_crypto::PublicKey;
use shared_types::{hash_fields, Field, PoolKey, ToFields};

/// Order direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    fn to_field(self) -> Field {
        match self {
            Side::Buy => Field::ZERO,
            Side::Sell => Field::ONE,
        }
    }
}

/// Limit order submitted to a pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Owner of the order; must be eligible.
    pub user: PublicKey,
    pub pool_key: PoolKey,
    pub side: Side,
    /// Base-token amount.
    pub amount: u128,
    /// Limit price in quote units per base unit.
    pub price: u128,
}

impl Order {
    pub fn new(user: PublicKey, pool_key: PoolKey, side: Side, amount: u128, price: u128) -> Self {
        Self {
            user,
            pool_key,
            side,
            amount,
            price,
        }
    }

    /// Commitment to every order field.
    pub fn hash(&self) -> Field {
        hash_fields(&self.to_fields())
    }
}

impl ToFields for Order {
    fn to_fields(&self) -> Vec<Field> {
        let mut fields = self.user.to_fields();
        fields.extend(self.pool_key.to_fields());
        fields.push(self.side.to_field());
        fields.push(Field::from(self.amount));
        fields.push(Field::from(self.price));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::KeyPair;
    use shared_types::TokenId;

    fn order(side: Side, amount: u128) -> Order {
        let user = KeyPair::from_bytes([7u8; 32]).unwrap().public_key();
        let pool = PoolKey::from_token_pair(TokenId::from(1), TokenId::from(2));
        Order::new(user, pool, side, amount, 100)
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(order(Side::Buy, 10).hash(), order(Side::Buy, 10).hash());
    }

    #[test]
    fn test_hash_binds_every_field() {
        let base = order(Side::Buy, 10).hash();
        assert_ne!(base, order(Side::Sell, 10).hash());
        assert_ne!(base, order(Side::Buy, 11).hash());
    }
}
