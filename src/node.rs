//! Read-only node views.
//!
//! A [`Node`] pairs a value with the graph it lives in. Its neighbours are not stored on the
//! node; they are derived from the owning graph's dependency set on every call, so the
//! dependency set stays the single source of truth.

use std::fmt;

use crate::comparer::Comparer;
use crate::graph::TopoGraph;
use crate::types::NodeId;

/// A node of a [`TopoGraph`], borrowed from it.
///
/// Two nodes are equal when their values are equal under the graph's comparer.
///
/// # Examples
///
/// ```
/// use topograph::TopoGraph;
///
/// let mut graph = TopoGraph::new();
/// graph.add_dependency("lex", "parse");
/// graph.add_dependency("parse", "check");
///
/// let parse = graph.find(&"parse").and_then(|id| graph.node(id)).unwrap();
/// let ancestors: Vec<_> = parse.ancestors().map(|n| *n.value()).collect();
/// let dependents: Vec<_> = parse.dependents().map(|n| *n.value()).collect();
///
/// assert_eq!(ancestors, ["lex"]);
/// assert_eq!(dependents, ["check"]);
/// ```
pub struct Node<'g, T, C> {
    graph: &'g TopoGraph<T, C>,
    id: NodeId,
    value: &'g T,
}

impl<'g, T, C> Node<'g, T, C> {
    pub(crate) fn new(graph: &'g TopoGraph<T, C>, id: NodeId, value: &'g T) -> Self {
        Self { graph, id, value }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'g T {
        self.value
    }

    /// Nodes that must come after this one (one hop).
    pub fn dependents(&self) -> impl Iterator<Item = Node<'g, T, C>> + 'g {
        let graph = self.graph;
        graph
            .dependents(self.id)
            .into_iter()
            .filter_map(move |id| graph.node(id))
    }

    /// Nodes that must come before this one (one hop).
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'g, T, C>> + 'g {
        let graph = self.graph;
        graph
            .ancestors(self.id)
            .into_iter()
            .filter_map(move |id| graph.node(id))
    }

    /// True if nothing has to come before this node.
    pub fn is_root(&self) -> bool {
        self.graph.dependencies().all(|dep| dep.dependent() != self.id)
    }
}

impl<T, C> Clone for Node<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Node<'_, T, C> {}

impl<T, C: Comparer<T>> PartialEq for Node<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.graph.comparer.equals(self.value, other.value)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Node<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", self.value)
            .finish()
    }
}
