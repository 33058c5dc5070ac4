//! Property tests for the centrality calculators.

use devnet_core::graph::{CollabGraph, SelfLoopPolicy};
use devnet_metrics::metrics::betweenness::betweenness_centrality;
use devnet_metrics::metrics::degree::degree_centrality;
use devnet_metrics::{CancelToken, ComputeOptions, compute_report};
use proptest::prelude::*;

fn arb_graph() -> impl Strategy<Value = CollabGraph> {
    prop::collection::vec((0_u8..24, 0_u8..24), 0..80).prop_map(|pairs| {
        let edges: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(a, b)| (format!("n{a}"), format!("n{b}")))
            .collect();
        CollabGraph::from_edges(
            edges.iter().map(|(a, b)| (a.as_str(), b.as_str())),
            SelfLoopPolicy::Ignore,
        )
        .expect("ignore policy never fails")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn degree_matches_neighbor_fraction(g in arb_graph()) {
        let dc = degree_centrality(&g);
        prop_assert_eq!(dc.len(), g.node_count());
        if g.node_count() >= 2 {
            #[allow(clippy::cast_precision_loss)]
            let denom = (g.node_count() - 1) as f64;
            for id in g.nodes() {
                #[allow(clippy::cast_precision_loss)]
                let want = g.neighbors(id).unwrap().len() as f64 / denom;
                prop_assert!((dc[id] - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn betweenness_zero_for_tiny_graphs(pairs in prop::collection::vec((0_u8..2, 0_u8..2), 0..6)) {
        let edges: Vec<(String, String)> =
            pairs.into_iter().map(|(a, b)| (format!("n{a}"), format!("n{b}"))).collect();
        let g = CollabGraph::from_edges(
            edges.iter().map(|(a, b)| (a.as_str(), b.as_str())),
            SelfLoopPolicy::Ignore,
        )
        .unwrap();
        prop_assert!(g.node_count() <= 2);
        let bc = betweenness_centrality(&g, &ComputeOptions::default(), &CancelToken::new()).unwrap();
        prop_assert!(bc.values().all(|&v| v == 0.0));
    }

    #[test]
    fn scores_are_normalized(g in arb_graph()) {
        let r = compute_report(&g, &ComputeOptions::default(), &CancelToken::new()).unwrap();
        prop_assert_eq!(r.len(), g.node_count());
        for rec in &r.records {
            for v in [rec.degree, rec.betweenness, rec.closeness] {
                prop_assert!(v.is_finite());
                prop_assert!((-1e-12..=1.0 + 1e-12).contains(&v), "{}: {v}", rec.id);
            }
        }
    }

    #[test]
    fn parallel_equals_sequential(g in arb_graph()) {
        let seq = compute_report(&g, &ComputeOptions::sequential(), &CancelToken::new()).unwrap();
        let par = compute_report(&g, &ComputeOptions::default(), &CancelToken::new()).unwrap();
        prop_assert_eq!(seq, par);
    }
}
