//! Graph collection: nodes, dependencies and the queries over them.
//!
//! [`TopoGraph`] owns one set of nodes (unique under its [`Comparer`]) and one set of
//! dependencies (unique ancestor/dependent pairs). Dependencies can only be created through
//! [`TopoGraph::add_dependency`], which registers both ends first, so no dependency ever points
//! at a node outside the graph.
//!
//! Values live in insertion-ordered slots. A [`NodeId`] is the slot index; removing a node
//! empties its slot instead of shifting the others, so ids held by the caller stay valid.
//!
//! Emptied slots are never reused. Lookups by value and the per-sort working vectors scale
//! with every slot ever allocated, not with [`TopoGraph::len`]; under long add/remove churn,
//! rebuild the graph from [`TopoGraph::dependencies`] and [`TopoGraph::values`] to compact it.

use indexmap::IndexSet;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::comparer::{Comparer, DefaultComparer};
use crate::node::Node;
use crate::types::{Dependency, NodeId};

/// A directed graph of values ordered by "depends-on" constraints.
///
/// # Workflow
///
/// 1. Create a graph with [`TopoGraph::new`] (or [`TopoGraph::with_comparer`])
/// 2. Register values with [`TopoGraph::add_value`] and constraints with
///    [`TopoGraph::add_dependency`]
/// 3. Linearize with [`TopoGraph::sort`]
///
/// The graph stays mutable for its whole life; sorting never changes it, so it can be
/// extended and sorted again.
///
/// # Examples
///
/// ```
/// use topograph::TopoGraph;
///
/// let mut graph = TopoGraph::new();
/// graph.add_dependency("fetch", "compile");
/// graph.add_dependency("compile", "link");
///
/// assert_eq!(graph.sort().unwrap(), vec![&"fetch", &"compile", &"link"]);
/// ```
#[derive(Debug, Clone)]
pub struct TopoGraph<T, C = DefaultComparer> {
    pub(crate) slots: Vec<Option<T>>,
    pub(crate) live: usize,
    pub(crate) edges: IndexSet<Dependency>,
    pub(crate) comparer: C,
}

impl<T: PartialEq> TopoGraph<T> {
    /// Create an empty graph that compares values with their own [`PartialEq`].
    pub fn new() -> Self {
        Self::with_comparer(DefaultComparer)
    }
}

impl<T: PartialEq> Default for TopoGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparer<T>> TopoGraph<T, C> {
    /// Create an empty graph that routes every identity decision through `comparer`.
    ///
    /// ```
    /// use topograph::{CaseInsensitive, TopoGraph};
    ///
    /// let mut graph = TopoGraph::with_comparer(CaseInsensitive);
    /// graph.add_dependency("Parse", "check");
    /// graph.add_dependency("parse", "CHECK"); // same dependency
    ///
    /// assert_eq!(graph.len(), 2);
    /// assert_eq!(graph.dependency_count(), 1);
    /// ```
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            edges: IndexSet::new(),
            comparer,
        }
    }

    /// The equality strategy used by this graph.
    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Compare two values with this graph's equality strategy.
    pub fn values_are_equal(&self, a: &T, b: &T) -> bool {
        self.comparer.equals(a, b)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of dependencies.
    pub fn dependency_count(&self) -> usize {
        self.edges.len()
    }

    /// Find the node holding a value equal to `value`.
    pub fn find(&self, value: &T) -> Option<NodeId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.as_ref()
                .filter(|existing| self.comparer.equals(*existing, value))
                .map(|_| NodeId(index))
        })
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Register `value`, returning the existing node if an equal value is already present.
    ///
    /// When the value is already present the argument is dropped and the stored value is kept.
    pub fn add_value(&mut self, value: T) -> NodeId {
        if let Some(existing) = self.find(&value) {
            return existing;
        }

        let id = NodeId(self.slots.len());
        self.slots.push(Some(value));
        self.live += 1;

        #[cfg(feature = "tracing")]
        debug!(node = id.0, node_count = self.live, "added node");

        id
    }

    /// Require `ancestor` to come before `dependent`, registering both values as needed.
    ///
    /// Returns the dependent's node. Adding the same pair twice is a no-op, and so is a
    /// self-dependency: when both values are equal the node is registered but no dependency
    /// is created.
    ///
    /// ```
    /// use topograph::TopoGraph;
    ///
    /// let mut graph = TopoGraph::new();
    /// let node = graph.add_dependency('a', 'a');
    ///
    /// assert_eq!(graph.value(node), Some(&'a'));
    /// assert_eq!(graph.dependency_count(), 0);
    /// ```
    pub fn add_dependency(&mut self, ancestor: T, dependent: T) -> NodeId {
        let ancestor = self.add_value(ancestor);
        let dependent = self.add_value(dependent);

        // Nodes are unique under the comparer, so equal values share an id
        if ancestor == dependent {
            #[cfg(feature = "tracing")]
            trace!(node = ancestor.0, "ignored self-dependency");

            return dependent;
        }

        if self.edges.insert(Dependency::new(ancestor, dependent)) {
            #[cfg(feature = "tracing")]
            debug!(
                ancestor = ancestor.0,
                dependent = dependent.0,
                dependency_count = self.edges.len(),
                "added dependency"
            );
        }

        dependent
    }

    /// True if a dependency `ancestor -> dependent` exists.
    pub fn has_dependency(&self, ancestor: &T, dependent: &T) -> bool {
        match (self.find(ancestor), self.find(dependent)) {
            (Some(a), Some(d)) => self.edges.contains(&Dependency::new(a, d)),
            _ => false,
        }
    }

    /// Remove the node equal to `value` and every dependency touching it.
    ///
    /// Returns `false` if no such node exists.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.find(value) {
            Some(id) => self.remove_node(id).is_some(),
            None => false,
        }
    }

    /// Remove a node by id, returning its value.
    ///
    /// Every dependency where the node is ancestor or dependent goes with it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.live -= 1;

        #[cfg(feature = "tracing")]
        let before = self.edges.len();

        self.edges.retain(|dep| !dep.touches(id));

        #[cfg(feature = "tracing")]
        debug!(
            node = id.0,
            removed_dependencies = before - self.edges.len(),
            "removed node"
        );

        Some(value)
    }

    /// Drop every node and dependency.
    ///
    /// Slots are emptied rather than discarded, so ids handed out before the call stay stale
    /// instead of resolving to values added afterwards.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.edges.clear();
        self.live = 0;
    }
}

impl<T, C> TopoGraph<T, C> {
    /// The value stored at `id`, or `None` if the node was removed.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to the value stored at `id`.
    ///
    /// The value must stay equal (under the graph's comparer) to what it was, otherwise the
    /// graph may end up holding two equal nodes.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// A read-only view of the node at `id`.
    pub fn node(&self, id: NodeId) -> Option<Node<'_, T, C>> {
        self.value(id).map(|value| Node::new(self, id, value))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_, T, C>> + '_ {
        self.live_slots()
            .map(move |(id, value)| Node::new(self, id, value))
    }

    /// All values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.live_slots().map(|(_, value)| value)
    }

    /// All dependencies in insertion order.
    pub fn dependencies(&self) -> impl Iterator<Item = Dependency> + '_ {
        self.edges.iter().copied()
    }

    /// Nodes with no incoming dependency, in insertion order.
    ///
    /// These are the nodes that can be processed first.
    pub fn roots(&self) -> Vec<NodeId> {
        let mut has_ancestor = vec![false; self.slots.len()];
        for dep in &self.edges {
            has_ancestor[dep.dependent.0] = true;
        }

        self.live_slots()
            .map(|(id, _)| id)
            .filter(|id| !has_ancestor[id.0])
            .collect()
    }

    /// Nodes with no outgoing dependency, in insertion order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut has_dependent = vec![false; self.slots.len()];
        for dep in &self.edges {
            has_dependent[dep.ancestor.0] = true;
        }

        self.live_slots()
            .map(|(id, _)| id)
            .filter(|id| !has_dependent[id.0])
            .collect()
    }

    /// Direct ancestors of `id`: nodes with a dependency into it.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|dep| dep.dependent == id)
            .map(|dep| dep.ancestor)
            .collect()
    }

    /// Direct dependents of `id`: nodes with a dependency from it.
    pub fn dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|dep| dep.ancestor == id)
            .map(|dep| dep.dependent)
            .collect()
    }

    pub(crate) fn live_slots(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (NodeId(index), value)))
    }
}

impl<T, C> FromIterator<(T, T)> for TopoGraph<T, C>
where
    C: Comparer<T> + Default,
{
    /// Build a graph from `(ancestor, dependent)` pairs.
    fn from_iter<I: IntoIterator<Item = (T, T)>>(pairs: I) -> Self {
        let mut graph = Self::with_comparer(C::default());
        graph.extend(pairs);
        graph
    }
}

impl<T, C: Comparer<T>> Extend<(T, T)> for TopoGraph<T, C> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, pairs: I) {
        for (ancestor, dependent) in pairs {
            self.add_dependency(ancestor, dependent);
        }
    }
}
