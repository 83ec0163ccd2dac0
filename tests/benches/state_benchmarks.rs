//! # Dark-Pool State Benchmarks
//!
//! | Subsystem | Operation | Cost |
//! |-----------|-----------|------|
//! | dp-01 State Store | witness verification | 256 node hashes |
//! | dp-01 State Store | write | 256 node hashes + map updates |
//! | dp-02 Order Admission | circuit + attestation | one verification + commitments |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dp_01_state_store::{verify_witness, AuthenticatedStore, StateAccess};
use dp_02_order_admission::{
    can_submit_order, eligibility_key, AttestationBackend, CanSubmitOrderPublicInput,
    ChannelMatchingGateway, Order, OrderAdmissionApi, OrderAdmissionService, Side, ELIGIBLE,
};
use rand::Rng;
use shared_crypto::KeyPair;
use shared_types::{Field, PoolKey, TokenId};
use std::sync::Arc;
use std::time::Duration;

fn populated_store(entries: usize) -> AuthenticatedStore {
    let mut rng = rand::thread_rng();
    let mut store = AuthenticatedStore::new();
    for _ in 0..entries {
        store
            .set(Field::from(rng.gen::<u128>()), Field::from(rng.gen::<u64>()))
            .unwrap();
    }
    store
}

fn pool() -> PoolKey {
    PoolKey::from_token_pair(TokenId::from(1), TokenId::from(2))
}

// ============================================================================
// DP-01: Witness verification
// ============================================================================

fn bench_witness_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp-01-witness");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 10_000] {
        let mut store = populated_store(size);
        let key = Field::from(0xDEAD_BEEFu64);
        let value = Field::from(42u64);
        store.set(key, value).unwrap();
        let root = store.root();
        let witness = store.witness(&key);
        let absent = store.witness(&Field::from(7u64));

        group.bench_with_input(BenchmarkId::new("verify_present", size), &size, |b, _| {
            b.iter(|| black_box(verify_witness(&root, &witness, Some(value)).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("verify_absent", size), &size, |b, _| {
            b.iter(|| black_box(verify_witness(&root, &absent, None).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("generate", size), &size, |b, _| {
            b.iter(|| black_box(store.witness(&key)))
        });
    }

    group.finish();
}

// ============================================================================
// DP-01: Writes
// ============================================================================

fn bench_store_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp-01-writes");
    group.measurement_time(Duration::from_secs(5));

    for batch in [10usize, 100] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("staged_commit", batch), &batch, |b, &batch| {
            let mut store = populated_store(1_000);
            let mut rng = rand::thread_rng();
            b.iter(|| {
                let mut staged = store.begin();
                for _ in 0..batch {
                    staged
                        .write(Field::from(rng.gen::<u128>()), Some(Field::ONE))
                        .unwrap();
                }
                black_box(staged.commit().unwrap())
            })
        });
    }

    group.finish();
}

// ============================================================================
// DP-02: Admission
// ============================================================================

fn bench_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp-02-admission");
    group.measurement_time(Duration::from_secs(5));

    let users: Vec<_> = (0..64).map(|_| KeyPair::generate().public_key()).collect();
    let mut store = populated_store(1_000);
    for user in &users {
        store.set(eligibility_key(user), ELIGIBLE).unwrap();
    }
    let input = CanSubmitOrderPublicInput {
        pool_key: pool(),
        state_root: store.root(),
    };
    let requests: Vec<_> = users
        .iter()
        .map(|user| {
            (
                input,
                store.witness(&eligibility_key(user)),
                Order::new(*user, pool(), Side::Buy, 10, 20),
            )
        })
        .collect();

    group.bench_function("circuit_single", |b| {
        let (input, witness, order) = &requests[0];
        b.iter(|| black_box(can_submit_order(input, witness, order).is_ok()))
    });

    let (matching, _admitted) = ChannelMatchingGateway::new(1);
    let service = OrderAdmissionService::new(
        AttestationBackend::generate(),
        matching,
        Arc::new(parking_lot::RwLock::new(store)),
    );

    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("prove_batch_64", |b| {
        b.iter(|| black_box(service.prove_batch(&requests)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_witness_verification,
    bench_store_writes,
    bench_admission
);
criterion_main!(benches);
