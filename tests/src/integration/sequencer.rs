//! # Sequencer Flows
//!
//! Signed requests from several clients applied through one sequencer,
//! read back through query handles and the balances client.

#[cfg(test)]
mod tests {
    use dp_01_state_store::{AuthenticatedStore, InMemoryStateDb, StoreConfig};
    use dp_04_balance_ledger::BalancesClient;
    use dp_05_sequencer::{
        RuntimeCall, Sequencer, SequencerConfig, SequencerHandle, SignedTransaction, TransactionStatus,
    };
    use shared_crypto::KeyPair;
    use shared_types::{TokenId, TokenIdId};
    use std::collections::HashSet;

    fn start() -> SequencerHandle {
        let (handle, _task) = Sequencer::spawn(SequencerConfig::default(), AuthenticatedStore::new());
        handle
    }

    async fn apply(handle: &SequencerHandle, signer: &KeyPair, call: RuntimeCall) -> bool {
        handle
            .sign_and_submit(signer, call)
            .await
            .unwrap()
            .wait()
            .await
            .unwrap()
            .is_included()
    }

    #[tokio::test]
    async fn test_balances_client_over_sequencer() {
        let client = BalancesClient::new(start());
        let signer = KeyPair::generate();
        let t1 = TokenId::from(1);

        let first = client.add_balance(&signer, t1, 50).await.unwrap();
        let second = client.add_balance(&signer, t1, 25).await.unwrap();
        assert!(first.wait().await.unwrap().is_included());
        assert!(second.wait().await.unwrap().is_included());

        assert_eq!(client.load_balance(t1, signer.public_key()).await.unwrap(), 75);
        assert_eq!(client.cached_balance(&t1), 75);
    }

    #[tokio::test]
    async fn test_load_all_balances_follows_registry_counter() {
        let handle = start();
        let client = BalancesClient::new(handle.clone());
        let operator = KeyPair::generate();
        let holder = KeyPair::generate();

        for token in [10u64, 20, 30] {
            let call = RuntimeCall::AddTokenId {
                token_id: TokenId::from(token),
            };
            assert!(apply(&handle, &operator, call).await);
        }
        for (token, amount) in [(2u64, 5u128), (3, 7), (4, 9)] {
            let call = RuntimeCall::AddBalance {
                token_id: TokenId::from(token),
                address: holder.public_key(),
                amount,
            };
            assert!(apply(&handle, &operator, call).await);
        }

        let balances = client.load_all_balances(holder.public_key()).await.unwrap();

        // Counter is 3, so index 4 is outside the scanned range
        assert_eq!(client.state().last_token_id, TokenIdId(3));
        assert_eq!(
            balances.into_iter().collect::<Vec<_>>(),
            vec![(TokenId::from(2), 5), (TokenId::from(3), 7)]
        );
        assert_eq!(
            handle.query().load_all_balances(&holder.public_key()).unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_registry_queries_through_handle() {
        let handle = start();
        let operator = KeyPair::generate();
        let token = TokenId::from(777);

        assert!(apply(&handle, &operator, RuntimeCall::AddTokenId { token_id: token }).await);

        let query = handle.query();
        assert_eq!(query.last_token_id_id().unwrap(), TokenIdId(1));
        assert_eq!(query.token_id_id_of(&token).unwrap(), Some(TokenIdId(1)));
        assert_eq!(query.token_id_of(&TokenIdId(1)).unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_transfer_conserves_and_rolls_back() {
        let handle = start();
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let token = TokenId::from(1);

        let credit = RuntimeCall::AddBalance {
            token_id: token,
            address: alice.public_key(),
            amount: 100,
        };
        assert!(apply(&handle, &alice, credit).await);

        let transfer = |amount| RuntimeCall::Transfer {
            token_id: token,
            to: bob.public_key(),
            amount,
        };
        assert!(apply(&handle, &alice, transfer(60)).await);

        let root = handle.query().state_root();
        assert!(!apply(&handle, &alice, transfer(41)).await);
        assert_eq!(handle.query().state_root(), root);

        let query = handle.query();
        let a = query.balance(token, &alice.public_key()).unwrap();
        let b = query.balance(token, &bob.public_key()).unwrap();
        assert_eq!((a, b), (40, 60));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submitters_all_included() {
        let handle = start();
        let token = TokenId::from(1);
        let mut tasks = Vec::new();

        for _ in 0..4 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                let signer = KeyPair::generate();
                let mut pending = Vec::new();
                for _ in 0..10 {
                    let call = RuntimeCall::AddBalance {
                        token_id: token,
                        address: signer.public_key(),
                        amount: 1,
                    };
                    pending.push(handle.sign_and_submit(&signer, call).await.unwrap());
                }
                let mut roots = Vec::new();
                for p in pending {
                    match p.wait().await.unwrap() {
                        TransactionStatus::Included { root, .. } => roots.push(root),
                        other => panic!("unexpected rejection: {:?}", other),
                    }
                }
                (signer.public_key(), roots)
            }));
        }

        let mut all_roots = HashSet::new();
        for task in tasks {
            let (owner, roots) = task.await.unwrap();
            assert_eq!(handle.query().balance(token, &owner).unwrap(), 10);
            assert_eq!(handle.query().nonce(&owner).unwrap(), 10);
            all_roots.extend(roots);
        }

        // One distinct root per applied request
        assert_eq!(all_roots.len(), 40);
    }

    #[tokio::test]
    async fn test_snapshot_restores_sequencer_state() {
        let handle = start();
        let signer = KeyPair::generate();
        let call = RuntimeCall::AddBalance {
            token_id: TokenId::from(3),
            address: signer.public_key(),
            amount: 12,
        };
        assert!(apply(&handle, &signer, call).await);

        let db = InMemoryStateDb::new();
        handle.query().save_snapshot(&db).unwrap();

        let store = AuthenticatedStore::load_from_db(&db, StoreConfig::default()).unwrap();
        let (restored, _task) = Sequencer::spawn(SequencerConfig::default(), store);

        assert_eq!(restored.query().state_root(), handle.query().state_root());
        assert_eq!(
            restored.query().balance(TokenId::from(3), &signer.public_key()).unwrap(),
            12
        );

        // The nonce carried over, so a replay against the restored state fails
        let replay = SignedTransaction::sign(
            &signer,
            0,
            RuntimeCall::AddBalance {
                token_id: TokenId::from(3),
                address: signer.public_key(),
                amount: 12,
            },
        )
        .unwrap();
        let status = restored.submit(replay).await.unwrap().wait().await.unwrap();
        assert!(!status.is_included());
    }
}
