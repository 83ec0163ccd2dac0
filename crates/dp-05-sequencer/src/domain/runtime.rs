//! # Runtime
//!
//! The state transition function: one [`SignedTransaction`] in, one
//! [`RootTransition`] out. Every request is staged in a `StateTransaction`
//! and committed only if the signature, the nonce and the call all succeed,
//! so a rejected request never moves the root.
//!
//! ## Modules
//!
//! | Module | State |
//! |--------|-------|
//! | `TokenRegistry` | `TokenRegistry.*` |
//! | `Balances` | `Balances.balances` |
//! | eligibility | raw `hash(user)` keys |
//! | nonces | `Sequencer.nonces` |

use super::{RuntimeCall, SequencerConfig, SequencerError, SignedTransaction};
use dp_01_state_store::{
    AuthenticatedStore, MerkleMapWitness, RootTransition, StateAccess, StateMap, StateRoot,
    StateKey,
};
use dp_02_order_admission::{eligibility_key, ELIGIBLE};
use dp_03_token_registry::TokenRegistry;
use dp_04_balance_ledger::BalanceLedger;
use shared_crypto::{Address, PublicKey};
use shared_types::{Balance, Field, TokenId, TokenIdId};

/// State path name of per-sender nonces.
pub const NONCES: &str = "Sequencer.nonces";

pub struct Runtime {
    store: AuthenticatedStore,
    registry: TokenRegistry,
    ledger: BalanceLedger,
    nonces: StateMap<PublicKey, u64>,
    admin: Option<PublicKey>,
}

impl Runtime {
    pub fn new(store: AuthenticatedStore, config: &SequencerConfig) -> Self {
        Self {
            store,
            registry: TokenRegistry::with_config(config.registry.clone()),
            ledger: BalanceLedger::new(),
            nonces: StateMap::new(NONCES),
            admin: config.admin,
        }
    }

    /// Verify and apply one request.
    pub fn apply(&mut self, tx: &SignedTransaction) -> Result<RootTransition, SequencerError> {
        tx.verify()?;

        let expected = self.nonce(&tx.sender)?;
        if tx.nonce != expected {
            return Err(SequencerError::InvalidNonce {
                expected,
                actual: tx.nonce,
            });
        }
        let next_nonce = expected
            .checked_add(1)
            .ok_or(SequencerError::InvalidNonce {
                expected,
                actual: tx.nonce,
            })?;

        let Runtime {
            store,
            registry,
            ledger,
            nonces,
            admin,
        } = self;

        let mut staged = store.begin();
        execute(registry, ledger, admin.as_ref(), &mut staged, tx)?;
        nonces.set(&mut staged, &tx.sender, &next_nonce)?;
        Ok(staged.commit()?)
    }

    pub fn state_root(&self) -> StateRoot {
        self.store.root()
    }

    pub fn store(&self) -> &AuthenticatedStore {
        &self.store
    }

    /// Next nonce expected from `sender`.
    pub fn nonce(&self, sender: &PublicKey) -> Result<u64, SequencerError> {
        Ok(self.nonces.get(&self.store, sender)?.unwrap_or(0))
    }

    pub fn balance(&self, token_id: TokenId, owner: &Address) -> Result<Balance, SequencerError> {
        Ok(self.ledger.balance(&self.store, token_id, owner)?)
    }

    pub fn balance_entry(
        &self,
        token_id: TokenId,
        owner: &Address,
    ) -> Result<Option<Balance>, SequencerError> {
        Ok(self.ledger.entry(&self.store, token_id, owner)?)
    }

    pub fn load_all_balances(
        &self,
        owner: &Address,
    ) -> Result<std::collections::BTreeMap<TokenId, Balance>, SequencerError> {
        let last = self.registry.last_token_id_id(&self.store)?;
        Ok(self.ledger.load_all_balances(&self.store, owner, last)?)
    }

    pub fn last_token_id_id(&self) -> Result<TokenIdId, SequencerError> {
        Ok(self.registry.last_token_id_id(&self.store)?)
    }

    pub fn token_id_of(&self, token_id_id: &TokenIdId) -> Result<Option<TokenId>, SequencerError> {
        Ok(self.registry.token_id_of(&self.store, token_id_id)?)
    }

    pub fn token_id_id_of(&self, token_id: &TokenId) -> Result<Option<TokenIdId>, SequencerError> {
        Ok(self.registry.token_id_id_of(&self.store, token_id)?)
    }

    pub fn is_eligible(&self, user: &PublicKey) -> bool {
        self.store.get(&eligibility_key(user)) == Some(ELIGIBLE)
    }

    pub fn get_with_witness(&self, key: &StateKey) -> (Option<Field>, MerkleMapWitness) {
        self.store.get_with_witness(key)
    }
}

fn execute<S: StateAccess + ?Sized>(
    registry: &TokenRegistry,
    ledger: &BalanceLedger,
    admin: Option<&PublicKey>,
    state: &mut S,
    tx: &SignedTransaction,
) -> Result<(), SequencerError> {
    match &tx.call {
        RuntimeCall::AddTokenId { token_id } => {
            registry.add_token_id(state, *token_id)?;
        }
        RuntimeCall::AddBalance {
            token_id,
            address,
            amount,
        } => {
            ledger.add_balance(state, *token_id, address, *amount)?;
        }
        RuntimeCall::Transfer {
            token_id,
            to,
            amount,
        } => {
            ledger.transfer(state, *token_id, &tx.sender, to, *amount)?;
        }
        RuntimeCall::SetEligibility { user, eligible } => {
            if admin.is_some_and(|admin| *admin != tx.sender) {
                return Err(SequencerError::Unauthorized(tx.sender));
            }
            let flag = eligible.then_some(ELIGIBLE);
            state.write(eligibility_key(user), flag)?;
        }
    }
    Ok(())
}
