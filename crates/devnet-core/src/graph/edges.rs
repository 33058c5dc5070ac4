//! Plain-text edge lists.
//!
//! One edge per line, `<nodeA>:<nodeB>`. This is the format the upstream
//! history miner produces by pairing every two distinct contributors who
//! touched a common file.
//!
//! Parsing is strict: a line without exactly one `:`, or with an empty
//! identifier after trimming, aborts the whole read with
//! [`GraphError::MalformedEdgeLine`]. Fully blank lines are skipped.

use std::io::{self, BufRead, Write};

use tracing::instrument;

use crate::error::GraphError;
use crate::graph::model::{CollabGraph, GraphBuilder, SelfLoopPolicy};

/// Field separator between the two endpoints of an edge line.
pub const SEPARATOR: char = ':';

/// One parsed edge-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// Parse a single edge line. `line_no` is 1-based and only used for errors.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns [`GraphError::MalformedEdgeLine`] if the line does not split into
/// exactly two non-empty identifiers.
pub fn parse_edge_line(line: &str, line_no: usize) -> Result<Option<Edge>, GraphError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let malformed = || GraphError::MalformedEdgeLine {
        line: line_no,
        content: line.to_string(),
    };

    let mut parts = line.split(SEPARATOR);
    let (Some(source), Some(target), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let (source, target) = (source.trim(), target.trim());
    if source.is_empty() || target.is_empty() {
        return Err(malformed());
    }

    Ok(Some(Edge {
        source: source.to_string(),
        target: target.to_string(),
    }))
}

/// Parsed edges of `reader` in line order, blank lines skipped.
///
/// Lines are split on raw `\n` bytes so a line that is not UTF-8 is reported
/// as malformed at its line number rather than as a read failure.
fn edges_from<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Edge, GraphError>> {
    reader
        .split(b'\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line_no = idx + 1;
            let raw = match raw {
                Ok(raw) => raw,
                Err(err) => return Some(Err(GraphError::Io(err))),
            };
            let line = match std::str::from_utf8(&raw) {
                Ok(line) => line,
                Err(_) => {
                    return Some(Err(GraphError::MalformedEdgeLine {
                        line: line_no,
                        content: String::from_utf8_lossy(&raw).into_owned(),
                    }));
                }
            };
            parse_edge_line(line, line_no).transpose()
        })
}

/// Read every edge from `reader`.
///
/// # Errors
///
/// Returns the first [`GraphError::MalformedEdgeLine`], or
/// [`GraphError::Io`] if reading fails.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Vec<Edge>, GraphError> {
    edges_from(reader).collect()
}

/// Write `(u, v)` pairs in edge-list format, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_edge_list<'a, W, I>(mut writer: W, edges: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (u, v) in edges {
        writeln!(writer, "{u}{SEPARATOR}{v}")?;
    }
    writer.flush()
}

impl CollabGraph {
    /// Build a graph directly from an edge-list reader.
    ///
    /// # Errors
    ///
    /// Propagates parse, I/O, and self-loop errors. No partial graph is
    /// returned.
    #[instrument(skip(reader))]
    pub fn from_edge_list<R: BufRead>(
        reader: R,
        policy: SelfLoopPolicy,
    ) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::with_self_loop_policy(policy);
        for edge in edges_from(reader) {
            let edge = edge?;
            builder.add_edge(&edge.source, &edge.target)?;
        }
        Ok(builder.build())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_simple_line() {
        let edge = parse_edge_line("alice@x.org:bob@y.org", 1).unwrap().unwrap();
        assert_eq!(edge.source, "alice@x.org");
        assert_eq!(edge.target, "bob@y.org");
    }

    #[test]
    fn strips_line_endings_and_whitespace() {
        let edge = parse_edge_line(" a : b \r\n", 1).unwrap().unwrap();
        assert_eq!(edge.source, "a");
        assert_eq!(edge.target, "b");
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_edge_line("", 1).unwrap(), None);
        assert_eq!(parse_edge_line("   \r", 2).unwrap(), None);
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = parse_edge_line("alice bob", 7).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedEdgeLine { line: 7, ref content } if content == "alice bob"
        ));
    }

    #[test]
    fn extra_separator_is_malformed() {
        assert!(parse_edge_line("a:b:c", 1).is_err());
    }

    #[test]
    fn empty_identifier_is_malformed() {
        assert!(parse_edge_line(":b", 1).is_err());
        assert!(parse_edge_line("a: ", 1).is_err());
    }

    #[test]
    fn malformed_line_aborts_whole_read() {
        let input = "a:b\nb:c\nbroken\nc:d\n";
        let err = read_edge_list(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, GraphError::MalformedEdgeLine { line: 3, .. }));

        let err = CollabGraph::from_edge_list(Cursor::new(input), SelfLoopPolicy::Ignore)
            .unwrap_err();
        assert!(matches!(err, GraphError::MalformedEdgeLine { line: 3, .. }));
    }

    #[test]
    fn non_utf8_line_is_malformed_not_io() {
        let input: &[u8] = b"a:b\n\xff\xfe:c\n";
        let err = read_edge_list(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, GraphError::MalformedEdgeLine { line: 2, .. }), "{err:?}");

        let err = CollabGraph::from_edge_list(Cursor::new(input), SelfLoopPolicy::Ignore)
            .unwrap_err();
        assert!(matches!(err, GraphError::MalformedEdgeLine { line: 2, .. }));
    }

    #[test]
    fn crlf_lines_parse_after_byte_split() {
        let edges = read_edge_list(Cursor::new("a:b\r\nb:c\r\n")).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].target, "c");
    }

    #[test]
    fn reads_all_edges_with_trailing_newline() {
        let edges = read_edge_list(Cursor::new("a:b\nb:c\n\n")).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].source, "b");
    }

    #[test]
    fn graph_from_edge_list() {
        let g = CollabGraph::from_edge_list(
            Cursor::new("a:b\nb:a\nb:c\nc:c\n"),
            SelfLoopPolicy::Ignore,
        )
        .unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.self_loops_dropped(), 1);
    }

    #[test]
    fn write_then_read_preserves_edges() {
        let mut buf = Vec::new();
        write_edge_list(&mut buf, [("a", "b"), ("c", "d")]).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "a:b\nc:d\n");

        let edges = read_edge_list(Cursor::new(buf)).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].target, "d");
    }
}
