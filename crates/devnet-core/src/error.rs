use std::fmt;

/// Machine-readable error codes for scripting around the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedEdgeLine,
    ConfigParseError,
    UnknownNode,
    DegenerateGraph,
    SelfLoop,
    SerializationError,
    InputReadFailed,
    ReportWriteFailed,
    Cancelled,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedEdgeLine => "E1001",
            Self::ConfigParseError => "E1002",
            Self::UnknownNode => "E2001",
            Self::DegenerateGraph => "E2002",
            Self::SelfLoop => "E2003",
            Self::SerializationError => "E3001",
            Self::InputReadFailed => "E5001",
            Self::ReportWriteFailed => "E5002",
            Self::Cancelled => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedEdgeLine => "Malformed edge-list line",
            Self::ConfigParseError => "Config file parse error",
            Self::UnknownNode => "Node not in graph",
            Self::DegenerateGraph => "Graph has fewer than two nodes",
            Self::SelfLoop => "Self-loop edge rejected",
            Self::SerializationError => "Malformed node-link document",
            Self::InputReadFailed => "Input read failed",
            Self::ReportWriteFailed => "Report write failed",
            Self::Cancelled => "Computation cancelled",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedEdgeLine => {
                Some("Each line must be `<nodeA>:<nodeB>` with non-empty ids and a single `:`.")
            }
            Self::ConfigParseError => {
                Some("Fix the config file named above (`--config`, .devnet/config.toml, or the user config) and retry.")
            }
            Self::UnknownNode => None,
            Self::DegenerateGraph => Some("All scores default to 0 for graphs with 0 or 1 node."),
            Self::SelfLoop => {
                Some("Remove the edge or set `graph.self_loops = \"ignore\"` in the config.")
            }
            Self::SerializationError => {
                Some("Expected an undirected, non-multigraph node-link JSON document.")
            }
            Self::InputReadFailed => Some("Check that the input path exists and is readable."),
            Self::ReportWriteFailed => Some("Check disk space and write permissions."),
            Self::Cancelled => None,
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while building or querying a [`crate::graph::CollabGraph`].
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An edge-list line without exactly one `:` separator, or with an empty id.
    #[error("malformed edge on line {line}: {content:?}")]
    MalformedEdgeLine { line: usize, content: String },

    /// A query against a node absent from the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A `u == u` edge under the `reject` self-loop policy.
    #[error("self-loop edge on node {0}")]
    SelfLoop(String),

    /// A node-link document that is not valid JSON or violates the schema.
    #[error("invalid node-link document: {0}")]
    Serialization(String),

    /// The underlying reader failed.
    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedEdgeLine { .. } => ErrorCode::MalformedEdgeLine,
            Self::UnknownNode(_) => ErrorCode::UnknownNode,
            Self::SelfLoop(_) => ErrorCode::SelfLoop,
            Self::Serialization(_) => ErrorCode::SerializationError,
            Self::Io(_) => ErrorCode::InputReadFailed,
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
