//! # Outbound Ports
//!
//! What the balances client needs from the chain: committed-state queries
//! and a way to submit signed mutations.

use crate::domain::LedgerError;
use shared_crypto::{Address, KeyPair};
use shared_types::{Balance, TokenId, TokenIdId};

/// Read access to committed ledger and registry state.
#[async_trait::async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Ledger entry, `None` when never written.
    async fn balance(&self, token_id: TokenId, owner: Address)
        -> Result<Option<Balance>, LedgerError>;

    /// Registry counter, `None` before any registration.
    async fn last_token_id_id(&self) -> Result<Option<TokenIdId>, LedgerError>;
}

/// Submission of signed state-mutating requests.
#[async_trait::async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Handle for observing the request's settlement.
    type Pending: Send;

    /// Sign an `addBalance(token_id, signer, amount)` request and submit it.
    async fn submit_add_balance(
        &self,
        signer: &KeyPair,
        token_id: TokenId,
        amount: Balance,
    ) -> Result<Self::Pending, LedgerError>;
}
