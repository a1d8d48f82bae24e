//! Wide and dense graphs

use topograph::TopoGraph;

use crate::common::assert_topological;

#[test]
fn test_wide_fan_out() {
    let mut graph = TopoGraph::new();
    for leaf in 1..=5_000u32 {
        graph.add_dependency(0, leaf);
    }

    assert_eq!(graph.roots().len(), 1);
    assert_eq!(graph.leaves().len(), 5_000);

    let order = graph.sort().unwrap();
    assert_eq!(order[0], &0);
    // Leaves come out in insertion order
    assert!(order.windows(2).skip(1).all(|w| w[0] < w[1]));
}

#[test]
fn test_wide_fan_in() {
    let mut graph = TopoGraph::new();
    for source in 0..5_000u32 {
        graph.add_dependency(source, u32::MAX);
    }

    assert_eq!(graph.roots().len(), 5_000);
    assert_eq!(graph.sort().unwrap().last(), Some(&&u32::MAX));
}

#[test]
fn test_layered_dense_graph() {
    // Every node of a layer depends on every node of the previous layer
    let layers = 20u32;
    let width = 20u32;
    let mut graph = TopoGraph::new();
    for layer in 1..layers {
        for from in 0..width {
            for to in 0..width {
                graph.add_dependency((layer - 1, from), (layer, to));
            }
        }
    }

    assert_eq!(graph.len(), (layers * width) as usize);
    assert_eq!(graph.dependency_count(), ((layers - 1) * width * width) as usize);

    let order = graph.sort_ids().unwrap();
    assert_topological(&graph, &order);
}

#[test]
fn test_removing_every_other_node() {
    let mut graph = crate::common::chain(1_000);
    for value in (1..1_000).step_by(2) {
        assert!(graph.remove(&value));
    }

    // Nothing is left connected
    assert_eq!(graph.len(), 500);
    assert_eq!(graph.dependency_count(), 0);
    assert_eq!(graph.roots().len(), 500);
    assert_eq!(graph.sort().unwrap().len(), 500);
}
