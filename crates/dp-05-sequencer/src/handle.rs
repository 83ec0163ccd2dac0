//! # Sequencer Handles
//!
//! - [`SequencerHandle`]: submits signed requests, returns pending handles
//! - [`QueryHandle`]: reads committed state under short read locks
//! - [`PendingTransaction`]: resolves to the request's settlement status

use crate::domain::{Runtime, RuntimeCall, SequencerError, SignedTransaction, TransactionStatus};
use crate::service::Submission;
use dp_01_state_store::{
    AuthenticatedStateApi, MerkleMapWitness, StateDatabase, StateError, StateKey, StateRoot,
};
use dp_02_order_admission::eligibility_key;
use dp_04_balance_ledger::{LedgerError, LedgerQuery, TransactionSubmitter};
use parking_lot::{Mutex, RwLock};
use shared_crypto::{Address, KeyPair, PublicKey};
use shared_types::{Balance, Field, Hash, TokenId, TokenIdId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// Handle to a submitted request.
#[derive(Debug)]
pub struct PendingTransaction {
    pub hash: Hash,
    receiver: oneshot::Receiver<TransactionStatus>,
}

impl PendingTransaction {
    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }

    /// Wait until the sequencer includes or rejects the request.
    pub async fn wait(self) -> Result<TransactionStatus, SequencerError> {
        self.receiver
            .await
            .map_err(|_| SequencerError::ChannelClosed)
    }
}

/// Next nonce per sender, counting requests queued but not yet applied.
#[derive(Clone, Default)]
pub(crate) struct NonceTracker {
    next: Arc<Mutex<HashMap<PublicKey, u64>>>,
}

impl NonceTracker {
    /// Reserve a nonce for `sender`, given its committed nonce.
    fn reserve(&self, sender: &PublicKey, committed: u64) -> u64 {
        let mut next = self.next.lock();
        let entry = next.entry(*sender).or_insert(committed);
        let nonce = (*entry).max(committed);
        *entry = nonce.saturating_add(1);
        nonce
    }

    /// Drop the reservation after a rejection; the committed nonce applies again.
    pub(crate) fn reset(&self, sender: &PublicKey) {
        self.next.lock().remove(sender);
    }
}

/// Read-only view of committed state.
#[derive(Clone)]
pub struct QueryHandle {
    runtime: Arc<RwLock<Runtime>>,
    roots: watch::Receiver<StateRoot>,
}

impl QueryHandle {
    pub(crate) fn new(runtime: Arc<RwLock<Runtime>>, roots: watch::Receiver<StateRoot>) -> Self {
        Self { runtime, roots }
    }

    pub fn state_root(&self) -> StateRoot {
        self.runtime.read().state_root()
    }

    /// Receiver notified on every new committed root.
    pub fn subscribe_roots(&self) -> watch::Receiver<StateRoot> {
        self.roots.clone()
    }

    pub fn nonce(&self, sender: &PublicKey) -> Result<u64, SequencerError> {
        self.runtime.read().nonce(sender)
    }

    /// `balances.get(tokenId, address)`; absent reads as 0.
    pub fn balance(&self, token_id: TokenId, owner: &Address) -> Result<Balance, SequencerError> {
        self.runtime.read().balance(token_id, owner)
    }

    pub fn load_all_balances(
        &self,
        owner: &Address,
    ) -> Result<BTreeMap<TokenId, Balance>, SequencerError> {
        self.runtime.read().load_all_balances(owner)
    }

    /// `lastTokenIdId.get()`; 0 before any registration.
    pub fn last_token_id_id(&self) -> Result<TokenIdId, SequencerError> {
        self.runtime.read().last_token_id_id()
    }

    pub fn token_id_of(&self, token_id_id: &TokenIdId) -> Result<Option<TokenId>, SequencerError> {
        self.runtime.read().token_id_of(token_id_id)
    }

    pub fn token_id_id_of(&self, token_id: &TokenId) -> Result<Option<TokenIdId>, SequencerError> {
        self.runtime.read().token_id_id_of(token_id)
    }

    pub fn is_eligible(&self, user: &PublicKey) -> bool {
        self.runtime.read().is_eligible(user)
    }

    /// Root and witness for `user`'s eligibility flag, read together.
    pub fn eligibility_witness(&self, user: &PublicKey) -> (StateRoot, MerkleMapWitness) {
        let runtime = self.runtime.read();
        let (_, witness) = runtime.get_with_witness(&eligibility_key(user));
        (runtime.state_root(), witness)
    }

    /// Persist a snapshot of committed state.
    pub fn save_snapshot<D: StateDatabase>(&self, db: &D) -> Result<(), SequencerError> {
        Ok(self.runtime.read().store().save_to_db(db)?)
    }
}

impl AuthenticatedStateApi for QueryHandle {
    fn state_root(&self) -> Result<StateRoot, StateError> {
        Ok(QueryHandle::state_root(self))
    }

    fn get_with_witness(
        &self,
        key: &StateKey,
    ) -> Result<(StateRoot, Option<Field>, MerkleMapWitness), StateError> {
        let runtime = self.runtime.read();
        let (value, witness) = runtime.get_with_witness(key);
        Ok((runtime.state_root(), value, witness))
    }

    fn entry_count(&self) -> Result<usize, StateError> {
        Ok(self.runtime.read().store().len())
    }
}

#[async_trait::async_trait]
impl LedgerQuery for QueryHandle {
    async fn balance(
        &self,
        token_id: TokenId,
        owner: Address,
    ) -> Result<Option<Balance>, LedgerError> {
        self.runtime
            .read()
            .balance_entry(token_id, &owner)
            .map_err(|e| LedgerError::Query(e.to_string()))
    }

    async fn last_token_id_id(&self) -> Result<Option<TokenIdId>, LedgerError> {
        let last = QueryHandle::last_token_id_id(self).map_err(|e| LedgerError::Query(e.to_string()))?;
        Ok((last.value() > 0).then_some(last))
    }
}

/// Submission side of the sequencer. Cheap to clone.
#[derive(Clone)]
pub struct SequencerHandle {
    sender: mpsc::Sender<Submission>,
    query: QueryHandle,
    nonces: NonceTracker,
}

impl SequencerHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<Submission>,
        query: QueryHandle,
        nonces: NonceTracker,
    ) -> Self {
        Self {
            sender,
            query,
            nonces,
        }
    }

    pub fn query(&self) -> QueryHandle {
        self.query.clone()
    }

    /// Queue a signed request. Waits for queue space, not for inclusion.
    pub async fn submit(
        &self,
        transaction: SignedTransaction,
    ) -> Result<PendingTransaction, SequencerError> {
        let hash = transaction.hash()?;
        let (respond, receiver) = oneshot::channel();

        self.sender
            .send(Submission {
                transaction,
                respond,
            })
            .await
            .map_err(|_| SequencerError::ChannelClosed)?;

        Ok(PendingTransaction { hash, receiver })
    }

    /// Sign `call` with the next free nonce of `signer` and submit it.
    pub async fn sign_and_submit(
        &self,
        signer: &KeyPair,
        call: RuntimeCall,
    ) -> Result<PendingTransaction, SequencerError> {
        let sender = signer.public_key();
        let committed = self.query.nonce(&sender)?;
        let nonce = self.nonces.reserve(&sender, committed);

        let transaction = SignedTransaction::sign(signer, nonce, call)?;
        self.submit(transaction).await.map_err(|e| {
            self.nonces.reset(&sender);
            e
        })
    }
}

#[async_trait::async_trait]
impl LedgerQuery for SequencerHandle {
    async fn balance(
        &self,
        token_id: TokenId,
        owner: Address,
    ) -> Result<Option<Balance>, LedgerError> {
        LedgerQuery::balance(&self.query, token_id, owner).await
    }

    async fn last_token_id_id(&self) -> Result<Option<TokenIdId>, LedgerError> {
        LedgerQuery::last_token_id_id(&self.query).await
    }
}

#[async_trait::async_trait]
impl TransactionSubmitter for SequencerHandle {
    type Pending = PendingTransaction;

    async fn submit_add_balance(
        &self,
        signer: &KeyPair,
        token_id: TokenId,
        amount: Balance,
    ) -> Result<PendingTransaction, LedgerError> {
        let call = RuntimeCall::AddBalance {
            token_id,
            address: signer.public_key(),
            amount,
        };
        self.sign_and_submit(signer, call)
            .await
            .map_err(|e| LedgerError::Submission(e.to_string()))
    }
}
