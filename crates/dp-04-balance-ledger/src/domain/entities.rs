use serde::{Deserialize, Serialize};
use shared_crypto::Address;
use shared_types::{Field, ToFields, TokenId};

/// State path name of the ledger map.
pub const BALANCES: &str = "Balances.balances";

/// Ledger entry key: one balance per (token, owner).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalancesKey {
    pub token_id: TokenId,
    pub owner: Address,
}

impl BalancesKey {
    pub fn from(token_id: TokenId, owner: Address) -> Self {
        Self { token_id, owner }
    }
}

impl ToFields for BalancesKey {
    /// `[token_id, owner.x, owner.is_odd]`
    fn to_fields(&self) -> Vec<Field> {
        let mut fields = self.token_id.to_fields();
        fields.extend(self.owner.to_fields());
        fields
    }
}
