//! # Cross-Subsystem Properties
//!
//! Randomised checks over many users, roots and credit sequences:
//!
//! 1. **Soundness**: a witness recomputing to any other root never yields an admission
//! 2. **Binding**: a valid witness for someone else's key never yields an admission
//! 3. **Completeness**: the flag holder is always admitted, with a stable commitment
//! 4. **Registry monotonicity**: the counter advances once per registration and
//!    the two mappings stay inverse
//! 5. **Ledger conservation**: an entry equals the sum of its credits and never drops

#[cfg(test)]
mod tests {
    use dp_01_state_store::{AuthenticatedStore, StateAccess};
    use dp_02_order_admission::{
        can_submit_order, eligibility_key, AdmissionError, CanSubmitOrderPublicInput, Order, Side,
        ELIGIBLE,
    };
    use dp_03_token_registry::TokenRegistry;
    use dp_04_balance_ledger::BalanceLedger;
    use rand::Rng;
    use shared_crypto::{KeyPair, PublicKey};
    use shared_types::{Field, PoolKey, TokenId, TokenIdId};

    const USERS: usize = 8;

    fn pool() -> PoolKey {
        PoolKey::from_token_pair(TokenId::from(1), TokenId::from(2))
    }

    fn random_order(user: PublicKey) -> Order {
        let mut rng = rand::thread_rng();
        let side = if rng.gen() { Side::Buy } else { Side::Sell };
        Order::new(user, pool(), side, rng.gen(), rng.gen())
    }

    /// Store where every user in `users` holds the eligibility flag.
    fn eligible_store(users: &[PublicKey]) -> AuthenticatedStore {
        let mut store = AuthenticatedStore::new();
        for user in users {
            store.set(eligibility_key(user), ELIGIBLE).unwrap();
        }
        store
    }

    fn users(n: usize) -> Vec<PublicKey> {
        (0..n).map(|_| KeyPair::generate().public_key()).collect()
    }

    #[test]
    fn soundness_other_root_never_admits() {
        let users = users(USERS);
        let mut store = eligible_store(&users);
        let mut rng = rand::thread_rng();

        for user in &users {
            let witness = store.witness(&eligibility_key(user));
            // Move the root with an unrelated write, keeping the old witness
            store
                .set(Field::from(rng.gen::<u64>()), Field::from(rng.gen::<u64>()))
                .unwrap();

            let input = CanSubmitOrderPublicInput {
                pool_key: pool(),
                state_root: store.root(),
            };
            assert!(matches!(
                can_submit_order(&input, &witness, &random_order(*user)),
                Err(AdmissionError::InvalidStateProof(_))
            ));
        }
    }

    #[test]
    fn soundness_absent_flag_never_admits() {
        let eligible = users(USERS);
        let store = eligible_store(&eligible);
        let outsider = KeyPair::generate().public_key();

        // Honest witness for the outsider proves absence, not the flag
        let witness = store.witness(&eligibility_key(&outsider));
        let input = CanSubmitOrderPublicInput {
            pool_key: pool(),
            state_root: store.root(),
        };

        assert!(matches!(
            can_submit_order(&input, &witness, &random_order(outsider)),
            Err(AdmissionError::InvalidStateProof(_))
        ));
    }

    #[test]
    fn binding_foreign_witness_never_admits() {
        let users = users(USERS);
        let store = eligible_store(&users);
        let input = CanSubmitOrderPublicInput {
            pool_key: pool(),
            state_root: store.root(),
        };

        for pair in users.windows(2) {
            let (owner, impostor) = (pair[0], pair[1]);
            let witness = store.witness(&eligibility_key(&owner));

            match can_submit_order(&input, &witness, &random_order(impostor)) {
                Err(AdmissionError::IdentityMismatch {
                    witness_key,
                    user_key,
                }) => {
                    assert_eq!(witness_key, eligibility_key(&owner));
                    assert_eq!(user_key, eligibility_key(&impostor));
                }
                other => panic!("expected identity mismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn completeness_flag_holder_always_admitted() {
        let users = users(USERS);
        let store = eligible_store(&users);
        let input = CanSubmitOrderPublicInput {
            pool_key: pool(),
            state_root: store.root(),
        };

        for user in &users {
            let witness = store.witness(&eligibility_key(user));
            let order = random_order(*user);

            let first = can_submit_order(&input, &witness, &order).unwrap();
            let second = can_submit_order(&input, &witness, &order).unwrap();

            assert!(first.can_submit);
            assert_eq!(first.order_commitment, order.hash());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn registry_counter_and_inverse_mappings() {
        let mut store = AuthenticatedStore::new();
        let registry = TokenRegistry::new();
        let mut rng = rand::thread_rng();

        // Start from a non-zero counter
        registry.add_token_id(&mut store, TokenId::from(0)).unwrap();
        let c0 = registry.last_token_id_id(&store).unwrap().value();

        let tokens: Vec<TokenId> = (0..20)
            .map(|i| TokenId::from(1_000 + i * 7 + rng.gen_range(0..7)))
            .collect();
        for token in &tokens {
            registry.add_token_id(&mut store, *token).unwrap();
        }

        assert_eq!(
            registry.last_token_id_id(&store).unwrap(),
            TokenIdId(c0 + tokens.len() as u64)
        );
        for token in &tokens {
            let id = registry.token_id_id_of(&store, token).unwrap().unwrap();
            assert_eq!(registry.token_id_of(&store, &id).unwrap(), Some(*token));
        }
    }

    #[test]
    fn ledger_entry_is_sum_of_credits() {
        let mut store = AuthenticatedStore::new();
        let ledger = BalanceLedger::new();
        let mut rng = rand::thread_rng();
        let owners = users(3);
        let tokens = [TokenId::from(1), TokenId::from(2)];
        let mut expected = std::collections::HashMap::new();

        for _ in 0..100 {
            let owner = owners[rng.gen_range(0..owners.len())];
            let token = tokens[rng.gen_range(0..tokens.len())];
            let amount: u128 = rng.gen_range(0..1_000_000);

            let before = ledger.balance(&store, token, &owner).unwrap();
            let after = ledger.add_balance(&mut store, token, &owner, amount).unwrap();
            assert!(after >= before);

            *expected.entry((token, owner)).or_insert(0u128) += amount;
        }

        for ((token, owner), sum) in expected {
            assert_eq!(ledger.balance(&store, token, &owner).unwrap(), sum);
        }
    }

    #[test]
    fn ledger_reads_are_authenticated() {
        let mut store = AuthenticatedStore::new();
        let ledger = BalanceLedger::new();
        let owner = KeyPair::generate().public_key();

        ledger.add_balance(&mut store, TokenId::from(4), &owner, 9).unwrap();

        // Every ledger entry lives in the store and verifies against its root
        for (key, value) in store.entries() {
            let witness = store.witness(&key);
            let (root, witness_key) = store.verify(&witness, Some(value)).unwrap();
            assert_eq!(root, store.root());
            assert_eq!(witness_key, key);
            assert_eq!(store.read(&key), Some(value));
        }
    }
}
