//! # Admission Flow
//!
//! Eligibility granted through the sequencer, proven against committed state
//! and handed to matching:
//!
//! ```text
//! admin ──SetEligibility──→ Sequencer ──root──→ QueryHandle
//!                                                   │ witness
//!                                                   ↓
//! user ──Order──→ OrderAdmissionService ──AdmissionProof──→ submit
//!                                                              │
//!                                                              ↓
//!                                                  ChannelMatchingGateway
//! ```

#[cfg(test)]
mod tests {
    use dp_01_state_store::AuthenticatedStore;
    use dp_02_order_admission::{
        AdmissionError, AdmissionProof, AdmittedOrder, AttestationBackend,
        CanSubmitOrderPublicInput, ChannelMatchingGateway, Order, OrderAdmissionApi,
        OrderAdmissionService, Side,
    };
    use dp_05_sequencer::{QueryHandle, RuntimeCall, Sequencer, SequencerConfig, SequencerHandle};
    use shared_crypto::{KeyPair, PublicKey};
    use shared_types::{PoolKey, TokenId};
    use tokio::sync::mpsc;

    type Service = OrderAdmissionService<AttestationBackend, ChannelMatchingGateway, QueryHandle>;

    struct Fixture {
        admin: KeyPair,
        handle: SequencerHandle,
        service: Service,
        admitted: mpsc::Receiver<AdmittedOrder>,
    }

    fn setup() -> Fixture {
        let admin = KeyPair::generate();
        let config = SequencerConfig {
            admin: Some(admin.public_key()),
            ..SequencerConfig::default()
        };
        let (handle, _task) = Sequencer::spawn(config, AuthenticatedStore::new());
        let (matching, admitted) = ChannelMatchingGateway::new(16);
        let service = OrderAdmissionService::new(
            AttestationBackend::generate(),
            matching,
            handle.query(),
        );

        Fixture {
            admin,
            handle,
            service,
            admitted,
        }
    }

    fn pool() -> PoolKey {
        PoolKey::from_token_pair(TokenId::from(1), TokenId::from(2))
    }

    async fn set_eligibility(fixture: &Fixture, user: PublicKey, eligible: bool) {
        let status = fixture
            .handle
            .sign_and_submit(&fixture.admin, RuntimeCall::SetEligibility { user, eligible })
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert!(status.is_included(), "eligibility change rejected: {:?}", status);
    }

    #[tokio::test]
    async fn test_eligible_order_reaches_matching() {
        let mut fixture = setup();
        let user = KeyPair::generate().public_key();
        set_eligibility(&fixture, user, true).await;

        let order = Order::new(user, pool(), Side::Buy, 10, 99);
        let proof = fixture.service.prove_with_current_state(pool(), &order).unwrap();

        // The artifact survives the wire
        let proof = AdmissionProof::from_json(&proof.to_json().unwrap()).unwrap();
        fixture.service.verify_proof(&proof).unwrap();

        let admitted = fixture.service.submit(&proof).await.unwrap();
        assert_eq!(admitted.order_commitment, order.hash());
        assert_eq!(admitted.state_root, fixture.handle.query().state_root());

        let received = fixture.admitted.recv().await.unwrap();
        assert_eq!(received, admitted);
    }

    #[tokio::test]
    async fn test_ineligible_user_cannot_prove() {
        let fixture = setup();
        let user = KeyPair::generate().public_key();

        let order = Order::new(user, pool(), Side::Sell, 1, 1);

        assert!(matches!(
            fixture.service.prove_with_current_state(pool(), &order),
            Err(AdmissionError::InvalidStateProof(_))
        ));
    }

    #[tokio::test]
    async fn test_revoked_user_cannot_prove() {
        let fixture = setup();
        let user = KeyPair::generate().public_key();
        set_eligibility(&fixture, user, true).await;
        set_eligibility(&fixture, user, false).await;

        let order = Order::new(user, pool(), Side::Buy, 1, 1);

        assert!(fixture.service.prove_with_current_state(pool(), &order).is_err());
        assert!(!fixture.handle.query().is_eligible(&user));
    }

    #[tokio::test]
    async fn test_proof_goes_stale_after_state_moves() {
        let fixture = setup();
        let user = KeyPair::generate().public_key();
        set_eligibility(&fixture, user, true).await;

        let order = Order::new(user, pool(), Side::Buy, 3, 7);
        let proof = fixture.service.prove_with_current_state(pool(), &order).unwrap();

        // Any committed write moves the root
        set_eligibility(&fixture, KeyPair::generate().public_key(), true).await;

        assert!(matches!(
            fixture.service.submit(&proof).await,
            Err(AdmissionError::StaleStateRoot { .. })
        ));

        // Reproving against the new root succeeds; the flag is still there
        let proof = fixture.service.prove_with_current_state(pool(), &order).unwrap();
        fixture.service.submit(&proof).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_admin_cannot_grant_eligibility() {
        let fixture = setup();
        let outsider = KeyPair::generate();

        let status = fixture
            .handle
            .sign_and_submit(
                &outsider,
                RuntimeCall::SetEligibility {
                    user: outsider.public_key(),
                    eligible: true,
                },
            )
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert!(!status.is_included());
        assert!(!fixture.handle.query().is_eligible(&outsider.public_key()));
    }

    #[tokio::test]
    async fn test_batch_proving_keeps_order() {
        let fixture = setup();
        let eligible = KeyPair::generate().public_key();
        let outsider = KeyPair::generate().public_key();
        set_eligibility(&fixture, eligible, true).await;

        let query = fixture.handle.query();
        let requests: Vec<_> = [eligible, outsider, eligible]
            .into_iter()
            .enumerate()
            .map(|(i, user)| {
                let (root, witness) = query.eligibility_witness(&user);
                let input = CanSubmitOrderPublicInput {
                    pool_key: pool(),
                    state_root: root,
                };
                (input, witness, Order::new(user, pool(), Side::Buy, i as u128 + 1, 5))
            })
            .collect();

        let results = fixture.service.prove_batch(&requests);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap().public_output.order_commitment,
            requests[2].2.hash()
        );
    }
}
