use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use devnet_core::graph::{CollabGraph, GraphBuilder};
use devnet_metrics::metrics::{betweenness, closeness, degree};
use devnet_metrics::{CancelToken, ComputeOptions, compute_report};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Erdős–Rényi G(n, p) with a fixed seed.
fn random_graph(n: usize, p: f64, seed: u64) -> CollabGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new();
    let ids: Vec<String> = (0..n).map(|i| format!("dev{i}@example.com")).collect();
    for id in &ids {
        builder.add_node(id);
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(p) {
                let _ = builder.add_edge(&ids[i], &ids[j]);
            }
        }
    }
    builder.build()
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality");
    let token = CancelToken::new();

    for &(n, p) in &[(100_usize, 0.05_f64), (500, 0.01), (1_000, 0.005)] {
        let graph = random_graph(n, p, 0xDE7_u64 + n as u64);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("degree", n), &graph, |b, g| {
            b.iter(|| black_box(degree::degree_centrality(g)));
        });

        for (label, options) in [
            ("sequential", ComputeOptions::sequential()),
            ("parallel", ComputeOptions::default()),
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("betweenness/{label}"), n),
                &graph,
                |b, g| b.iter(|| black_box(betweenness::betweenness_centrality(g, &options, &token))),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("closeness/{label}"), n),
                &graph,
                |b, g| b.iter(|| black_box(closeness::closeness_centrality(g, &options, &token))),
            );
        }

        group.bench_with_input(BenchmarkId::new("report", n), &graph, |b, g| {
            b.iter(|| black_box(compute_report(g, &ComputeOptions::default(), &token)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality);
criterion_main!(benches);
