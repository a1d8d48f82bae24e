//! Topological Graph Collection
//!
//! A generic, mutable dependency graph with a pluggable equality strategy, Kahn-style
//! topological sorting with precise cycle reports, predecessor-chain wiring and a sequential
//! processor runner built on top.
//!
//! # Features
//!
//! - **Any value type**: nodes hold plain values. Identity is decided by a [`Comparer`], so
//!   values don't need `Hash` or `Ord`, and two graphs over the same type can disagree on what
//!   "the same value" means.
//! - **Set semantics**: adding an equal value twice yields one node; adding the same
//!   dependency twice yields one dependency.
//! - **Deterministic sorting**: ready nodes are taken in insertion order, so a given
//!   construction sequence always sorts the same way.
//! - **Cycle reports**: a failed sort returns the dependencies that could not be resolved,
//!   not just "there is a cycle".
//! - **Predecessor wiring**: [`Catalog`] turns "each item names the item before it" into a
//!   validated execution sequence.
//! - **Processor runner**: [`ProcessorRunner`] sorts a set of processors and runs them in
//!   order with initialize/finalize hooks and stop-on-first-error handling.
//! - **Error handling**: every fallible operation returns a typed error ([`SortError`],
//!   [`WiringError`], [`RunError`]).
//!
//! # Quick Start
//!
//! ```
//! use topograph::TopoGraph;
//!
//! let mut graph = TopoGraph::new();
//!
//! // "compile" depends on "fetch", "test" and "package" depend on "compile"
//! graph.add_dependency("fetch", "compile");
//! graph.add_dependency("compile", "test");
//! graph.add_dependency("compile", "package");
//!
//! let order = graph.sort().unwrap();
//! assert_eq!(order, vec![&"fetch", &"compile", &"test", &"package"]);
//! ```
//!
//! # Core Concepts
//!
//! ## TopoGraph
//!
//! A [`TopoGraph`] owns a set of nodes and a set of dependencies. Register values with
//! [`TopoGraph::add_value`] and constraints with [`TopoGraph::add_dependency`]; the latter
//! registers both values if needed. Removing a node with [`TopoGraph::remove`] also removes
//! every dependency touching it.
//!
//! ## NodeId and Node
//!
//! A [`NodeId`] is a stable handle to a node. [`TopoGraph::node`] turns it into a [`Node`]
//! view that can walk to its ancestors and dependents:
//!
//! ```
//! use topograph::TopoGraph;
//!
//! let mut graph = TopoGraph::new();
//! let compile = graph.add_dependency("fetch", "compile");
//! graph.add_dependency("compile", "test");
//!
//! let node = graph.node(compile).unwrap();
//! let before: Vec<_> = node.ancestors().map(|n| *n.value()).collect();
//! let after: Vec<_> = node.dependents().map(|n| *n.value()).collect();
//!
//! assert_eq!(before, ["fetch"]);
//! assert_eq!(after, ["test"]);
//! ```
//!
//! ## Comparers
//!
//! Every identity decision goes through the graph's [`Comparer`]:
//!
//! ```
//! use topograph::{CaseInsensitive, TopoGraph};
//!
//! let mut graph = TopoGraph::with_comparer(CaseInsensitive);
//! graph.add_dependency("Lexer", "parser");
//! graph.add_dependency("LEXER", "Parser");
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.dependency_count(), 1);
//! ```
//!
//! # Error Handling
//!
//! ```
//! use topograph::{SortError, TopoGraph};
//!
//! let mut graph = TopoGraph::new();
//! graph.add_value("standalone");
//! graph.add_dependency("a", "b");
//! graph.add_dependency("b", "a");
//!
//! match graph.sort() {
//!     Err(SortError::Cycle { remaining }) => assert_eq!(remaining.len(), 2),
//!     other => panic!("expected a cycle, got {other:?}"),
//! }
//!
//! let empty: TopoGraph<&str> = TopoGraph::new();
//! assert_eq!(empty.sort().unwrap_err(), SortError::Empty);
//! ```
//!
//! # Predecessor Wiring
//!
//! Implement [`Sequenced`] for items that declare the item that must directly precede them,
//! collect them in a [`Catalog`] and ask for the [`Catalog::sequence`]. Exactly one item must
//! have no predecessor.
//!
//! # Running Processors
//!
//! See [`ProcessorRunner`] for a complete example. Runner behavior is configured through
//! [`RunnerConfig`]; problems are reported both through the returned errors and to an optional
//! [`Diagnostics`] sink.
//!
//! # Optional Tracing Support
//!
//! The crate provides optional observability through the `tracing` crate with **zero runtime
//! overhead when disabled**. The tracing instrumentation is conditionally compiled using feature
//! flags.
//!
//! ## Enabling Tracing
//!
//! Add the `tracing` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! topograph = { version = "0.1", features = ["tracing"] }
//! tracing-subscriber = "0.3"
//! ```
//!
//! Then initialize a tracing subscriber in your application:
//!
//! ```no_run
//! use tracing_subscriber::{fmt, EnvFilter};
//!
//! fmt()
//!     .with_env_filter(
//!         EnvFilter::try_from_default_env()
//!             .unwrap_or_else(|_| EnvFilter::new("topograph=info"))
//!     )
//!     .init();
//! ```
//!
//! ## Log Levels
//!
//! - **INFO**: processor run start
//! - **DEBUG**: node and dependency changes, sort results, wiring, run summary
//! - **TRACE**: ignored self-dependencies, individual processor execution
//! - **ERROR**: failed processors, aborted runs
//!
//! Control log level with the `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=topograph=info  cargo run
//! RUST_LOG=topograph=debug cargo run
//! RUST_LOG=topograph=trace cargo run
//! ```
//!
//! With the feature enabled, [`TracingDiagnostics`] forwards [`Diagnostics`] messages to the
//! same subscriber.

// Module declarations
mod comparer;
mod config;
mod diagnostics;
mod error;
mod graph;
mod node;
mod runner;
mod sort;
mod types;
mod wiring;

// Public re-exports
pub use comparer::{ByKey, CaseInsensitive, Comparer, DefaultComparer, FnComparer};
pub use config::{FinalizePolicy, RunnerConfig};
pub use diagnostics::{
    CollectingDiagnostics, Diagnostics, NullDiagnostics, Severity, SharedDiagnostics,
};
pub use error::{BoxError, RunError, RunResult, SortError, SortResult, WiringError, WiringResult};
pub use graph::TopoGraph;
pub use node::Node;
pub use runner::{
    FinalizeOutcome, ProcessFailure, Processor, ProcessorRunner, RunReport, SameProcessor,
};
pub use types::{Dependency, NodeId};
pub use wiring::{Catalog, Sequenced};

#[cfg(feature = "tracing")]
pub use diagnostics::TracingDiagnostics;
