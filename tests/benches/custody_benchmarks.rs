//! # Provenance-Chain Custody Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | Full delivery (create, 2 extends, close) | < 100µs |
//! | Consumer-to-consumer transfer | < 20µs |
//! | `get_chain` lookup | O(log n) in ledger size |
//! | Authorization predicate | < 1µs, no allocation |
//! | Ledger snapshot | linear in ledger size |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pc_03_custody_chain::algorithms::authorize_step;
use pc_03_custody_chain::{
    ChainRecord, CustodyChainApi, CustodyEntry, OwnershipApi, StepKind,
};
use pc_tests::fixtures::*;
use shared_types::Role;
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("bench runtime")
}

// ============================================================================
// Custody chain writes
// ============================================================================

fn bench_full_delivery(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("pc-03-delivery");
    group.measurement_time(Duration::from_secs(10));

    let net = SupplyNetwork::new();
    let item = net.add_item("Bench");
    rt.block_on(net.register(ALICE, "Alice"));

    group.throughput(Throughput::Elements(1));
    group.bench_function("create_extend_close", |b| {
        b.iter(|| black_box(rt.block_on(net.deliver(item, ALICE))))
    });

    group.finish();
}

fn bench_ownership_transfer(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("pc-03-transfer");

    let net = SupplyNetwork::new();
    let item = net.add_item("Bench");
    rt.block_on(async {
        net.register(ALICE, "Alice").await;
        net.register(BOB, "Bob").await;
    });
    let chain_id = rt.block_on(net.deliver(item, ALICE));

    // Ping-pong so every iteration is a valid transfer.
    let mut at = 1000u64;
    group.bench_function("alice_bob_round_trip", |b| {
        b.iter(|| {
            at += 1;
            rt.block_on(async {
                net.ledger
                    .transfer_ownership(ALICE, chain_id, ALICE, BOB, at)
                    .await
                    .expect("to bob");
                net.ledger
                    .transfer_ownership(BOB, chain_id, BOB, ALICE, at)
                    .await
                    .expect("back to alice");
            })
        })
    });

    group.finish();
}

// ============================================================================
// Reads
// ============================================================================

fn bench_chain_lookup(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("pc-03-lookup");

    for size in [100u64, 1_000, 10_000] {
        let net = SupplyNetwork::new();
        let item = net.add_item("Bench");
        rt.block_on(async {
            for _ in 0..size {
                net.ledger
                    .create_chain(item, MANUFACTURER, 1, DISTRIBUTOR, 2)
                    .await
                    .expect("create");
            }
        });

        group.bench_with_input(BenchmarkId::new("get_chain", size), &size, |b, &size| {
            let mut chain_id = 0;
            b.iter(|| {
                chain_id = chain_id % size + 1;
                black_box(net.ledger.get_chain(chain_id))
            })
        });

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("snapshot", size), &size, |b, _| {
            b.iter(|| black_box(net.ledger.snapshot()))
        });
    }

    group.finish();
}

// ============================================================================
// Authorization predicate
// ============================================================================

fn bench_authorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc-03-authorization");

    let net = SupplyNetwork::new();
    let sequence = Role::ALL.to_vec();
    let record = ChainRecord::open(1, 1, CustodyEntry::handoff(MANUFACTURER, 1, DISTRIBUTOR, 2));

    group.bench_function("authorize_step_allowed", |b| {
        b.iter(|| {
            black_box(authorize_step(
                &record,
                &DISTRIBUTOR,
                StepKind::Extend,
                &sequence,
                net.roles.as_ref(),
            ))
        })
    });

    group.bench_function("authorize_step_forged", |b| {
        b.iter(|| {
            black_box(authorize_step(
                &record,
                &MALLORY,
                StepKind::Extend,
                &sequence,
                net.roles.as_ref(),
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_full_delivery,
    bench_ownership_transfer,
    bench_chain_lookup,
    bench_authorization,
);

criterion_main!(benches);
