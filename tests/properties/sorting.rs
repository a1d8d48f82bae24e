//! Sort totality and cycle reporting on generated graphs

use std::collections::HashSet;

use proptest::prelude::*;
use topograph::{NodeId, SortError, TopoGraph};

use crate::common::assert_topological;

/// Forward-only edges (`a < b`), which can never form a cycle.
fn dag(n: usize, pairs: &[(usize, usize)]) -> TopoGraph<usize> {
    let mut graph = TopoGraph::new();
    for value in 0..n {
        graph.add_value(value);
    }
    for &(a, b) in pairs {
        let (a, b) = (a % n, b % n);
        if a < b {
            graph.add_dependency(a, b);
        }
    }
    graph
}

/// Every node reachable from `start`, including `start` itself.
fn reachable(graph: &TopoGraph<usize>, start: &[NodeId]) -> HashSet<NodeId> {
    let mut seen: HashSet<NodeId> = start.iter().copied().collect();
    let mut stack: Vec<NodeId> = start.to_vec();
    while let Some(id) = stack.pop() {
        for next in graph.dependents(id) {
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn acyclic_graphs_sort_completely(
        n in 1usize..30,
        pairs in prop::collection::vec((0usize..30, 0usize..30), 0..80),
    ) {
        let graph = dag(n, &pairs);

        let order = graph.sort_ids().unwrap();
        prop_assert_eq!(order.len(), n);
        assert_topological(&graph, &order);

        let values = graph.sort().unwrap();
        prop_assert_eq!(values.len(), n);
        prop_assert!(graph.is_acyclic());
    }

    #[test]
    fn cycles_are_always_reported(
        n in 2usize..30,
        k in 2usize..30,
        pairs in prop::collection::vec((0usize..30, 0usize..30), 0..80),
    ) {
        let k = k.min(n);
        let mut graph = dag(n, &pairs);

        // Close a ring over the first k values
        for i in 0..k {
            graph.add_dependency(i, (i + 1) % k);
        }

        let err = graph.sort_ids().unwrap_err();
        let SortError::Cycle { remaining } = &err else {
            panic!("expected a cycle, got {err:?}");
        };
        prop_assert!(!remaining.is_empty());

        let ring: Vec<NodeId> = (0..k).filter_map(|v| graph.find(&v)).collect();
        for i in 0..k {
            let edge = (ring[i], ring[(i + 1) % k]);
            prop_assert!(
                remaining.iter().any(|d| (d.ancestor(), d.dependent()) == edge),
                "ring edge missing from residual"
            );
        }

        // Nothing outside the cycle's downstream closure is ever reported
        let blocked = reachable(&graph, &ring);
        for dep in remaining {
            prop_assert!(blocked.contains(&dep.ancestor()));
        }
    }

    #[test]
    fn sorting_never_mutates(
        n in 1usize..20,
        pairs in prop::collection::vec((0usize..20, 0usize..20), 0..40),
    ) {
        let mut graph = TopoGraph::new();
        for value in 0..n {
            graph.add_value(value);
        }
        for &(a, b) in &pairs {
            graph.add_dependency(a % n, b % n);
        }

        let nodes = graph.len();
        let deps: Vec<_> = graph.dependencies().collect();

        let first = graph.sort_ids();
        let second = graph.sort_ids();

        prop_assert_eq!(first, second);
        prop_assert_eq!(graph.len(), nodes);
        prop_assert_eq!(graph.dependencies().collect::<Vec<_>>(), deps);
    }
}
