#![no_main]

use devnet_core::graph::{NodeLinkDocument, SelfLoopPolicy};
use devnet_metrics::{CancelToken, ComputeOptions, compute_report};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = NodeLinkDocument::from_reader(data) else {
        return;
    };
    let Ok(graph) = doc.into_graph(SelfLoopPolicy::Ignore) else {
        return;
    };
    if graph.node_count() > 64 {
        return;
    }

    let report = compute_report(&graph, &ComputeOptions::sequential(), &CancelToken::new())
        .expect("untripped token never cancels");
    assert_eq!(report.len(), graph.node_count());
    for rec in &report.records {
        for v in [rec.degree, rec.betweenness, rec.closeness] {
            assert!(v.is_finite() && (-1e-9..=1.0 + 1e-9).contains(&v));
        }
    }
});
