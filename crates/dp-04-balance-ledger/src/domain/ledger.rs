use super::{BalancesKey, LedgerError, BALANCES};
use dp_01_state_store::{StateAccess, StateMap};
use shared_crypto::Address;
use shared_types::{Balance, TokenId, TokenIdId};
use std::collections::BTreeMap;

/// Authenticated map from (token, owner) to balance.
///
/// An absent entry reads as zero. Credits never decrease a balance; only
/// `transfer` moves value out of an entry.
pub struct BalanceLedger {
    balances: StateMap<BalancesKey, Balance>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self {
            balances: StateMap::new(BALANCES),
        }
    }

    /// Stored entry, `None` when never written.
    pub fn entry<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        token_id: TokenId,
        owner: &Address,
    ) -> Result<Option<Balance>, LedgerError> {
        Ok(self.balances.get(state, &BalancesKey::from(token_id, *owner))?)
    }

    pub fn balance<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        token_id: TokenId,
        owner: &Address,
    ) -> Result<Balance, LedgerError> {
        Ok(self.entry(state, token_id, owner)?.unwrap_or(0))
    }

    /// Credit `amount` and return the new balance.
    pub fn add_balance<S: StateAccess + ?Sized>(
        &self,
        state: &mut S,
        token_id: TokenId,
        owner: &Address,
        amount: Balance,
    ) -> Result<Balance, LedgerError> {
        let current = self.balance(state, token_id, owner)?;
        let updated = current
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { token_id })?;

        self.balances
            .set(state, &BalancesKey::from(token_id, *owner), &updated)?;
        tracing::debug!(
            "[dp-04] Credited {} of token {} to {}: {} -> {}",
            amount,
            token_id,
            owner,
            current,
            updated
        );
        Ok(updated)
    }

    /// Move `amount` from `from` to `to`. Nothing is written on failure.
    pub fn transfer<S: StateAccess + ?Sized>(
        &self,
        state: &mut S,
        token_id: TokenId,
        from: &Address,
        to: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let available = self.balance(state, token_id, from)?;
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                required: amount,
            });
        }
        if from == to {
            return Ok(());
        }

        let receiver = self.balance(state, token_id, to)?;
        let credited = receiver
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { token_id })?;

        self.balances
            .set(state, &BalancesKey::from(token_id, *from), &(available - amount))?;
        self.balances
            .set(state, &BalancesKey::from(token_id, *to), &credited)?;
        Ok(())
    }

    /// Every present entry of `owner` for token ids `0..=last`.
    ///
    /// Scans the whole id range whether or not the owner holds each token,
    /// so cost grows with the registry counter. Each index is read as the
    /// `TokenId` of the same number.
    pub fn load_all_balances<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        owner: &Address,
        last: TokenIdId,
    ) -> Result<BTreeMap<TokenId, Balance>, LedgerError> {
        let mut balances = BTreeMap::new();
        for index in 0..=last.value() {
            let token_id = TokenId::from(index);
            if let Some(balance) = self.entry(state, token_id, owner)? {
                balances.insert(token_id, balance);
            }
        }
        Ok(balances)
    }
}

impl Default for BalanceLedger {
    fn default() -> Self {
        Self::new()
    }
}
