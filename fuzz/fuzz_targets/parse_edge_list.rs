#![no_main]

use devnet_core::graph::{CollabGraph, SelfLoopPolicy, parse_edge_line};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for (idx, line) in text.lines().enumerate() {
        if let Ok(Some(edge)) = parse_edge_line(line, idx + 1) {
            assert!(!edge.source.is_empty() && !edge.target.is_empty());
            assert!(!edge.source.contains(':') && !edge.target.contains(':'));
        }
    }

    if let Ok(graph) = CollabGraph::from_edge_list(data, SelfLoopPolicy::Ignore) {
        let degree_sum: usize = graph.node_indices().map(|idx| graph.degree_of(idx)).sum();
        assert_eq!(degree_sum, 2 * graph.edge_count());
    }
});
