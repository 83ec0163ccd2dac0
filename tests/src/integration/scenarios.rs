//! # Acceptance Scenarios
//!
//! | Scenario | Flow |
//! |----------|------|
//! | A | register three tokens from an empty registry |
//! | B | eligible user proves an order against the current root |
//! | C | same proof against a different root fails |
//! | D | two credits to one entry read back as their sum |

#[cfg(test)]
mod tests {
    use dp_01_state_store::AuthenticatedStore;
    use dp_02_order_admission::{
        can_submit_order, eligibility_key, AdmissionError, CanSubmitOrderPublicInput, Order, Side,
        ELIGIBLE,
    };
    use dp_03_token_registry::TokenRegistry;
    use dp_04_balance_ledger::BalanceLedger;
    use shared_crypto::{KeyPair, PublicKey};
    use shared_types::{Field, PoolKey, TokenId, TokenIdId};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn pool() -> PoolKey {
        PoolKey::from_token_pair(TokenId::from(11), TokenId::from(12))
    }

    fn order_for(user: PublicKey) -> Order {
        Order::new(user, pool(), Side::Sell, 1_000, 37)
    }

    /// Store holding `user`'s eligibility flag next to unrelated entries.
    fn store_with_eligible(user: &PublicKey) -> AuthenticatedStore {
        let mut store = AuthenticatedStore::new();
        store.set(Field::from(1u64), Field::from(100u64)).unwrap();
        store.set(eligibility_key(user), ELIGIBLE).unwrap();
        store.set(Field::from(2u64), Field::from(200u64)).unwrap();
        store
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[test]
    fn scenario_a_sequential_registration() {
        let mut store = AuthenticatedStore::new();
        let registry = TokenRegistry::new();
        let (t1, t2, t3) = (TokenId::from(501), TokenId::from(502), TokenId::from(503));

        registry.add_token_id(&mut store, t1).unwrap();
        registry.add_token_id(&mut store, t2).unwrap();
        registry.add_token_id(&mut store, t3).unwrap();

        assert_eq!(registry.last_token_id_id(&store).unwrap(), TokenIdId(3));
        assert_eq!(
            registry.token_id_id_of(&store, &t2).unwrap(),
            Some(TokenIdId(2))
        );
    }

    #[test]
    fn scenario_b_eligible_order_admitted() {
        let user = KeyPair::generate().public_key();
        let store = store_with_eligible(&user);
        let witness = store.witness(&eligibility_key(&user));
        let order = order_for(user);

        let input = CanSubmitOrderPublicInput {
            pool_key: pool(),
            state_root: store.root(),
        };
        let output = can_submit_order(&input, &witness, &order).unwrap();

        assert_eq!(output.pool_key, pool());
        assert!(output.can_submit);
        assert_eq!(output.order_commitment, order.hash());
    }

    #[test]
    fn scenario_c_wrong_root_rejected() {
        let user = KeyPair::generate().public_key();
        let store = store_with_eligible(&user);
        let witness = store.witness(&eligibility_key(&user));

        let mut other = store_with_eligible(&user);
        other.set(Field::from(3u64), Field::from(300u64)).unwrap();
        assert_ne!(other.root(), store.root());

        let input = CanSubmitOrderPublicInput {
            pool_key: pool(),
            state_root: other.root(),
        };

        assert!(matches!(
            can_submit_order(&input, &witness, &order_for(user)),
            Err(AdmissionError::InvalidStateProof(_))
        ));
    }

    #[test]
    fn scenario_d_credits_accumulate() {
        let mut store = AuthenticatedStore::new();
        let ledger = BalanceLedger::new();
        let addr = KeyPair::generate().public_key();
        let t1 = TokenId::from(1);

        ledger.add_balance(&mut store, t1, &addr, 50).unwrap();
        ledger.add_balance(&mut store, t1, &addr, 25).unwrap();

        assert_eq!(ledger.balance(&store, t1, &addr).unwrap(), 75);
    }
}
