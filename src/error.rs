//! Typed error taxonomy for graph construction, layout configuration, and
//! iteration-time invariant violations.

use thiserror::Error;

/// Errors surfaced by this crate's construction and iteration entry points.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Attempted to add a node whose id already exists in the graph.
    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    /// Construction was attempted from a graph with no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A link names a node id that isn't present in the graph.
    #[error("link references unknown node '{0}'")]
    UnknownNode(String),

    /// A body was constructed (or would be constructed) with mass <= 0.
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),

    /// A configured force coefficient is NaN or infinite.
    #[error("coefficient must be finite, got {0}")]
    NonFiniteCoefficient(f64),

    /// Integration produced a non-finite position or velocity for a body.
    ///
    /// Reaching this means the distance-floor guards in the force model were
    /// bypassed; it is treated as fatal for the iteration that produced it.
    #[error("non-finite {field} for body '{id}' after integration")]
    NonFinite { id: String, field: &'static str },

    /// `set_positions` was called with a slice whose length doesn't match
    /// the current body count.
    #[error("expected {expected} positions, got {got}")]
    PositionCountMismatch { expected: usize, got: usize },

    /// A graph or position document failed to parse or serialize as JSON.
    #[error("json codec: {0}")]
    Json(#[from] serde_json::Error),

    /// A position document's node count didn't match the target graph.
    #[error("binary codec: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
