//! Benchmark for the external-node table merge.
//!
//! A hub event shared by both networks is conditioned on `k` private causes
//! per side, so the merged hub has `2k` parents and the merge enumerates
//! `2^{2k}` assignments. Run with `cargo bench --bench merge`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bayfuse_core::{assignments, merge, BayesNet};

fn unit(state: &mut u64) -> f64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((*state >> 11) as f64) / ((u64::MAX >> 11) as f64)
}

/// A network where `hub` is conditioned on `arity` fresh causes.
fn hub_network(prefix: &str, arity: usize, seed: u64) -> BayesNet {
    let mut net = BayesNet::default();
    let parents: Vec<String> = (0..arity).map(|i| format!("{prefix}{i}")).collect();
    for parent in &parents {
        net.create_event(parent.clone()).unwrap();
    }
    net.create_event("Hub").unwrap();
    for parent in &parents {
        net.create_dependency(parent, "Hub").unwrap();
    }
    net.finalize_structure().unwrap();

    let mut state = seed | 1;
    for parent in &parents {
        net.event_mut(parent)
            .unwrap()
            .table_mut()
            .unwrap()
            .add_line(unit(&mut state), true, &[])
            .unwrap();
    }
    let rows: Vec<_> = assignments(arity).collect();
    let table = net.event_mut("Hub").unwrap().table_mut().unwrap();
    for row in rows {
        table.add_line(unit(&mut state), true, &row).unwrap();
    }
    net.validate().unwrap();
    net
}

fn bench_merge_external_hub(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_external_hub");
    for arity in [2usize, 4, 6] {
        let first = hub_network("P", arity, arity as u64 + 1);
        let second = hub_network("Q", arity, arity as u64 + 17);

        group.bench_with_input(
            BenchmarkId::from_parameter(arity),
            &(first, second),
            |b, (first, second)| {
                b.iter(|| black_box(merge(black_box(first), black_box(second)).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_merge_external_hub);
criterion_main!(benches);
