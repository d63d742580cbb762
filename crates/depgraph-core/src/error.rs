use std::fmt;

/// Result alias for graph queries and analyses.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures surfaced by graph queries and analyses.
///
/// Every other operation is total over any graph, including the empty one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A query referenced a node name that is not in the graph.
    #[error("node '{name}' not in graph")]
    NodeNotFound { name: String },

    /// A topological order was requested for a graph that is not a DAG.
    #[error("graph contains a cycle: only {ordered} of {total} nodes could be ordered")]
    Cycle { ordered: usize, total: usize },
}

impl GraphError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NodeNotFound {
            name: name.to_string(),
        }
    }

    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NodeNotFound { .. } => ErrorCode::NodeNotFound,
            Self::Cycle { .. } => ErrorCode::CycleDetected,
        }
    }
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NodeNotFound,
    CycleDetected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NodeNotFound => "E2001",
            Self::CycleDetected => "E2003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NodeNotFound => "Node not found",
            Self::CycleDetected => "Dependency cycle detected",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NodeNotFound => None,
            Self::CycleDetected => {
                Some("Run `dg cycles` to list the loops, then break one edge in each.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
