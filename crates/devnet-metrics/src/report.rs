//! Joining the per-metric score maps into report rows.
//!
//! [`assemble_report`] walks the graph's canonical node order once and picks
//! each node's score out of the three maps, so every node gets exactly one
//! row (isolated nodes included). [`compute_report`] runs the three
//! calculators and the join as one step.

use std::io::Write;

use serde::Serialize;
use tracing::{info, instrument};

use devnet_core::graph::CollabGraph;

use crate::exec::{CancelToken, CentralityError, ComputeOptions};
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::closeness::closeness_centrality;
use crate::metrics::degree::degree_centrality;
use crate::metrics::ScoreMap;

/// Header row of the report, in column order.
pub const REPORT_HEADER: [&str; 4] = [
    "email",
    "degree centrality",
    "betweenness centrality",
    "closeness centrality",
];

/// One report row: a node and its three scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRecord {
    #[serde(rename = "email")]
    pub id: String,
    #[serde(rename = "degree centrality")]
    pub degree: f64,
    #[serde(rename = "betweenness centrality")]
    pub betweenness: f64,
    #[serde(rename = "closeness centrality")]
    pub closeness: f64,
}

/// Join three score maps into one record per node, in canonical node order.
///
/// A node missing from a map scores 0 for that metric.
#[must_use]
pub fn assemble_report(
    graph: &CollabGraph,
    degree: &ScoreMap,
    betweenness: &ScoreMap,
    closeness: &ScoreMap,
) -> Vec<CentralityRecord> {
    let score = |map: &ScoreMap, id: &str| map.get(id).copied().unwrap_or(0.0);

    graph
        .nodes()
        .map(|id| CentralityRecord {
            id: id.to_string(),
            degree: score(degree, id),
            betweenness: score(betweenness, id),
            closeness: score(closeness, id),
        })
        .collect()
}

/// The assembled report, ready to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralityReport {
    pub records: Vec<CentralityRecord>,
}

impl CentralityReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the header and one row per record.
    ///
    /// Scores use the shortest representation that round-trips, so a small
    /// value is written as `1e-6` where pandas would write `1e-06`. Both parse
    /// to the same `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`CentralityError::Report`] if the writer fails.
    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<(), CentralityError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(writer);

        // Written explicitly so an empty report still carries its header.
        wtr.write_record(REPORT_HEADER)?;
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Run all three calculators over `graph` and assemble their report.
///
/// # Errors
///
/// Propagates [`CentralityError`] from betweenness or closeness.
#[instrument(skip(graph, cancel), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn compute_report(
    graph: &CollabGraph,
    options: &ComputeOptions,
    cancel: &CancelToken,
) -> Result<CentralityReport, CentralityError> {
    let degree = degree_centrality(graph);
    let betweenness = betweenness_centrality(graph, options, cancel)?;
    let closeness = closeness_centrality(graph, options, cancel)?;

    let records = assemble_report(graph, &degree, &betweenness, &closeness);
    info!(rows = records.len(), "centrality report assembled");
    Ok(CentralityReport { records })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use devnet_core::graph::{GraphBuilder, SelfLoopPolicy};

    fn make(edges: &[(&str, &str)]) -> CollabGraph {
        CollabGraph::from_edges(edges.iter().copied(), SelfLoopPolicy::Ignore).unwrap()
    }

    fn render(report: &CentralityReport, delimiter: u8) -> String {
        let mut buf = Vec::new();
        report.write_csv(&mut buf, delimiter).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn missing_scores_default_to_zero() {
        let g = make(&[("a", "b")]);
        let mut degree = ScoreMap::new();
        degree.insert("a".to_string(), 1.0);
        let records = assemble_report(&g, &degree, &ScoreMap::new(), &ScoreMap::new());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert!((records[0].degree - 1.0).abs() < f64::EPSILON);
        assert!((records[1].degree - 0.0).abs() < f64::EPSILON);
        assert!((records[1].closeness - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn three_path_csv() {
        let g = make(&[("a", "b"), ("b", "c")]);
        let report =
            compute_report(&g, &ComputeOptions::sequential(), &CancelToken::new()).unwrap();
        let text = render(&report, b',');
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "email,degree centrality,betweenness centrality,closeness centrality"
        );
        // a: degree 1/2, closeness 2/3 * 2/2.
        assert_eq!(lines[1], "a,0.5,0.0,0.6666666666666666");
        assert_eq!(lines[2], "b,1.0,1.0,1.0");
        assert_eq!(lines[3], "c,0.5,0.0,0.6666666666666666");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn empty_graph_writes_header_only() {
        let report = compute_report(
            &GraphBuilder::new().build(),
            &ComputeOptions::default(),
            &CancelToken::new(),
        )
        .unwrap();
        assert!(report.is_empty());
        assert_eq!(
            render(&report, b','),
            "email,degree centrality,betweenness centrality,closeness centrality\n"
        );
    }

    #[test]
    fn custom_delimiter() {
        let report =
            compute_report(&make(&[("a", "b")]), &ComputeOptions::sequential(), &CancelToken::new())
                .unwrap();
        let text = render(&report, b'\t');
        assert!(text.starts_with("email\tdegree centrality\t"));
        assert!(text.contains("a\t1.0\t0.0\t1.0"));
    }

    #[test]
    fn small_scores_use_shortest_exponent_form() {
        let report = CentralityReport {
            records: vec![CentralityRecord {
                id: "a".to_string(),
                degree: 1e-6,
                betweenness: 0.0,
                closeness: 0.5,
            }],
        };
        let text = render(&report, b',');
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "a,1e-6,0.0,0.5");
        let degree: f64 = row.split(',').nth(1).unwrap().parse().unwrap();
        assert_eq!(degree, 1e-6);
    }

    #[test]
    fn isolated_nodes_get_a_row() {
        let mut b = GraphBuilder::new();
        b.add_edge("a", "b").unwrap();
        b.add_node("z");
        let report =
            compute_report(&b.build(), &ComputeOptions::sequential(), &CancelToken::new()).unwrap();
        assert_eq!(report.len(), 3);
        let z = &report.records[2];
        assert_eq!(z.id, "z");
        assert_eq!((z.degree, z.betweenness, z.closeness), (0.0, 0.0, 0.0));
    }

    #[test]
    fn cancelled_run_produces_no_report() {
        let token = CancelToken::new();
        token.cancel();
        let err = compute_report(&make(&[("a", "b"), ("b", "c")]), &ComputeOptions::default(), &token)
            .unwrap_err();
        assert!(matches!(err, CentralityError::Cancelled));
    }
}
