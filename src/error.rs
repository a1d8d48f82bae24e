//! Error types for graph, wiring and runner operations.
//!
//! Data-shape problems (empty graphs, cycles, misdeclared predecessors) are ordinary return
//! values, never panics.

use thiserror::Error;

use crate::types::Dependency;

/// Boxed error returned by user code (processors and run hooks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Result type for predecessor wiring
pub type WiringResult<T> = Result<T, WiringError>;

/// Result type for processor runs
pub type RunResult<T> = Result<T, RunError>;

/// Reasons a graph could not be linearized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SortError {
    /// Nothing has been added to the graph.
    #[error("cannot sort an empty graph")]
    Empty,

    /// A lone node that still has dependencies attached.
    #[error("graph has a single node but {dependencies} dependencies")]
    InconsistentSingleton { dependencies: usize },

    /// No total order exists. `remaining` holds every dependency whose ancestor could not be
    /// scheduled, in insertion order.
    #[error("dependency cycle detected: {} dependencies could not be resolved", .remaining.len())]
    Cycle { remaining: Vec<Dependency> },
}

impl SortError {
    /// Dependencies left unresolved by the sort. Empty unless the graph has a cycle.
    pub fn remaining(&self) -> &[Dependency] {
        match self {
            SortError::Cycle { remaining } => remaining,
            SortError::Empty | SortError::InconsistentSingleton { .. } => &[],
        }
    }
}

/// Configuration errors found while wiring a catalog from predecessor declarations.
///
/// Keys are rendered with their `Debug` representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WiringError {
    /// Two catalog items share a key.
    #[error("duplicate item '{key}' in catalog")]
    DuplicateKey { key: String },

    /// An item names a predecessor that is not in the catalog.
    #[error("item '{item}' declares predecessor '{predecessor}', which is not in the catalog")]
    UnknownPredecessor { item: String, predecessor: String },

    /// An item names itself as its predecessor.
    #[error("item '{item}' cannot be its own predecessor")]
    SelfPredecessor { item: String },

    /// Every item declares a predecessor, so nothing can run first.
    #[error("no root item defined")]
    NoRoot,

    /// More than one item lacks a predecessor.
    #[error("multiple root items defined: {}", .roots.join(", "))]
    MultipleRoots { roots: Vec<String> },

    /// The wired graph could not be sorted.
    #[error("could not create execution sequence: {0}")]
    Sort(#[from] SortError),
}

/// Errors that abort a processor run before any item is processed.
///
/// Failures of individual processors are not errors here; they are collected in
/// [`crate::RunReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RunError {
    /// The initialize hook failed.
    #[error("initialization failed: {reason}")]
    Initialize { reason: String },

    /// The processors could not be ordered.
    #[error("could not topologically sort processors: {0}")]
    Sort(#[from] SortError),
}
