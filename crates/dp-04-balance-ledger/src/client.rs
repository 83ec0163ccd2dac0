//! # Balances Client
//!
//! Client-side cache of one wallet's balances. Reads come from committed
//! state through [`LedgerQuery`]; credits are signed and handed to a
//! [`TransactionSubmitter`], which returns a pending handle. The cache is
//! not updated on submission: callers reload once the request settles.

use crate::domain::LedgerError;
use crate::ports::{LedgerQuery, TransactionSubmitter};
use parking_lot::RwLock;
use shared_crypto::{Address, KeyPair};
use shared_types::{Balance, TokenId, TokenIdId};
use std::collections::BTreeMap;

/// Counter assumed when the registry has never been written.
const DEFAULT_LAST_TOKEN_ID: TokenIdId = TokenIdId(1);

/// Snapshot of the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalancesState {
    pub loading: bool,
    pub balances: BTreeMap<TokenId, Balance>,
    pub last_token_id: TokenIdId,
}

impl Default for BalancesState {
    fn default() -> Self {
        Self {
            loading: false,
            balances: BTreeMap::new(),
            last_token_id: DEFAULT_LAST_TOKEN_ID,
        }
    }
}

pub struct BalancesClient<C> {
    chain: C,
    state: RwLock<BalancesState>,
}

impl<C: LedgerQuery> BalancesClient<C> {
    pub fn new(chain: C) -> Self {
        Self {
            chain,
            state: RwLock::new(BalancesState::default()),
        }
    }

    pub fn state(&self) -> BalancesState {
        self.state.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Cached balance, 0 when not loaded.
    pub fn cached_balance(&self, token_id: &TokenId) -> Balance {
        self.state
            .read()
            .balances
            .get(token_id)
            .copied()
            .unwrap_or(0)
    }

    /// Refresh one entry. An absent ledger entry is cached as 0.
    pub async fn load_balance(
        &self,
        token_id: TokenId,
        address: Address,
    ) -> Result<Balance, LedgerError> {
        self.state.write().loading = true;
        let result = self.chain.balance(token_id, address).await;

        let mut state = self.state.write();
        state.loading = false;
        let balance = result?.unwrap_or(0);
        state.balances.insert(token_id, balance);
        Ok(balance)
    }

    /// Replace the cache with every present entry for token ids
    /// `0..=lastTokenIdId`.
    pub async fn load_all_balances(
        &self,
        address: Address,
    ) -> Result<BTreeMap<TokenId, Balance>, LedgerError> {
        self.state.write().loading = true;
        let result = self.fetch_all(address).await;

        let mut state = self.state.write();
        state.loading = false;
        let (last_token_id, balances) = result?;
        state.balances = balances.clone();
        state.last_token_id = last_token_id;

        tracing::debug!(
            "[dp-04] Loaded {} balances for {} (last token id {})",
            balances.len(),
            address,
            last_token_id
        );
        Ok(balances)
    }

    async fn fetch_all(
        &self,
        address: Address,
    ) -> Result<(TokenIdId, BTreeMap<TokenId, Balance>), LedgerError> {
        let last_token_id = self
            .chain
            .last_token_id_id()
            .await?
            .unwrap_or(DEFAULT_LAST_TOKEN_ID);

        let mut balances = BTreeMap::new();
        for index in 0..=last_token_id.value() {
            let token_id = TokenId::from(index);
            if let Some(balance) = self.chain.balance(token_id, address).await? {
                balances.insert(token_id, balance);
            }
        }
        Ok((last_token_id, balances))
    }
}

impl<C: LedgerQuery + TransactionSubmitter> BalancesClient<C> {
    /// Sign and submit a credit of `amount` to the signer's own entry.
    pub async fn add_balance(
        &self,
        signer: &KeyPair,
        token_id: TokenId,
        amount: Balance,
    ) -> Result<C::Pending, LedgerError> {
        self.chain
            .submit_add_balance(signer, token_id, amount)
            .await
    }
}
