//! Topological sort (Kahn's algorithm) and cycle reporting.
//!
//! Sorting works on a private copy of the in-degree counts and dependencies; the graph
//! itself is never modified, so it can keep growing and be sorted again.
//!
//! ## Tie-break
//!
//! Whenever several nodes are ready at once, the one inserted first is taken first. The
//! frontier is a min-heap keyed on [`NodeId`], and ids grow with insertion. This makes the
//! order reproducible for a given construction sequence, but any order that respects every
//! dependency is correct; callers should rely on dependency order only.
//!
//! ## Failure report
//!
//! When no total order exists, [`SortError::Cycle`] carries every dependency whose ancestor
//! never became ready: the dependencies inside cycles plus those leading out of a cycle into
//! nodes that were blocked by it. Dependencies among nodes that could be scheduled are never
//! reported.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::error::{SortError, SortResult};
use crate::graph::TopoGraph;
use crate::types::NodeId;

impl<T, C> TopoGraph<T, C> {
    /// Order the values so every ancestor precedes its dependents.
    ///
    /// # Errors
    ///
    /// - [`SortError::Empty`] if the graph has no nodes
    /// - [`SortError::InconsistentSingleton`] if the only node has dependencies attached
    /// - [`SortError::Cycle`] if the dependencies contain a cycle
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph::{SortError, TopoGraph};
    ///
    /// let mut graph = TopoGraph::new();
    /// graph.add_dependency('a', 'b');
    /// graph.add_dependency('b', 'c');
    /// assert_eq!(graph.sort().unwrap(), vec![&'a', &'b', &'c']);
    ///
    /// graph.add_dependency('c', 'a');
    /// let err = graph.sort().unwrap_err();
    /// assert!(matches!(err, SortError::Cycle { .. }));
    /// assert_eq!(err.remaining().len(), 3);
    /// ```
    pub fn sort(&self) -> SortResult<Vec<&T>> {
        let order = self.sort_ids()?;

        Ok(order.into_iter().filter_map(|id| self.value(id)).collect())
    }

    /// Like [`TopoGraph::sort`], but returns node ids.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self),
            fields(nodes = self.live, dependencies = self.edges.len())
        )
    )]
    pub fn sort_ids(&self) -> SortResult<Vec<NodeId>> {
        match self.live {
            0 => return Err(SortError::Empty),
            1 if !self.edges.is_empty() => {
                return Err(SortError::InconsistentSingleton {
                    dependencies: self.edges.len(),
                })
            }
            _ => {}
        }

        // Working copy: in-degrees and outgoing adjacency, both indexed by slot
        let slot_count = self.slots.len();
        let mut in_degree = vec![0usize; slot_count];
        let mut outgoing: Vec<Vec<NodeId>> = vec![Vec::new(); slot_count];

        for dep in &self.edges {
            in_degree[dep.dependent.0] += 1;
            outgoing[dep.ancestor.0].push(dep.dependent);
        }

        // Initial frontier: live nodes with no incoming dependency
        let mut frontier: BinaryHeap<Reverse<NodeId>> = self
            .live_slots()
            .map(|(id, _)| id)
            .filter(|id| in_degree[id.0] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.live);
        let mut scheduled = vec![false; slot_count];

        while let Some(Reverse(node)) = frontier.pop() {
            order.push(node);
            scheduled[node.0] = true;

            // Removing the node deletes its outgoing dependencies from the working copy
            for &dependent in &outgoing[node.0] {
                let degree = &mut in_degree[dependent.0];
                *degree -= 1;
                if *degree == 0 {
                    frontier.push(Reverse(dependent));
                }
            }
        }

        if order.len() < self.live {
            // Dependencies are only deleted when their ancestor is scheduled
            let remaining: Vec<_> = self
                .edges
                .iter()
                .filter(|dep| !scheduled[dep.ancestor.0])
                .copied()
                .collect();

            #[cfg(feature = "tracing")]
            debug!(
                sorted = order.len(),
                remaining = remaining.len(),
                "dependency cycle detected"
            );

            return Err(SortError::Cycle { remaining });
        }

        #[cfg(feature = "tracing")]
        debug!(sorted = order.len(), "topological order computed");

        Ok(order)
    }

    /// True unless the dependencies contain a cycle.
    pub fn is_acyclic(&self) -> bool {
        !matches!(self.sort_ids(), Err(SortError::Cycle { .. }))
    }
}
