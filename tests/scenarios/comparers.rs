//! Graphs whose identity is decided by a non-default comparer

use topograph::{ByKey, CaseInsensitive, Comparer, FnComparer, TopoGraph};

use crate::common::assert_topological;

#[derive(Debug, Clone)]
struct Package {
    name: &'static str,
    version: u32,
}

fn pkg(name: &'static str, version: u32) -> Package {
    Package { name, version }
}

#[test]
fn test_packages_identified_by_name() {
    let mut graph = TopoGraph::with_comparer(ByKey::new(|p: &Package| p.name));
    graph.add_dependency(pkg("libc", 2), pkg("serde", 1));
    graph.add_dependency(pkg("serde", 3), pkg("serde_json", 1));
    graph.add_dependency(pkg("libc", 9), pkg("serde_json", 4));

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.dependency_count(), 3);

    // The first registration wins
    let serde = graph.find(&pkg("serde", 0)).unwrap();
    assert_eq!(graph.value(serde).map(|p| p.version), Some(1));

    let names: Vec<_> = graph.sort().unwrap().iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["libc", "serde", "serde_json"]);
}

#[test]
fn test_case_insensitive_removal() {
    let mut graph: TopoGraph<String, CaseInsensitive> = TopoGraph::with_comparer(CaseInsensitive);
    graph.add_dependency("Lexer".to_string(), "Parser".to_string());
    graph.add_dependency("parser".to_string(), "Checker".to_string());

    assert!(graph.has_dependency(&"LEXER".to_string(), &"parser".to_string()));
    assert!(graph.remove(&"PARSER".to_string()));

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.dependency_count(), 0);
    assert_eq!(graph.roots().len(), 2);
}

#[test]
fn test_closure_comparer_groups_values() {
    // Values in the same decade are the same node
    let decade = FnComparer::new(|a: &u32, b: &u32| a / 10 == b / 10);
    assert!(Comparer::<u32>::equals(&decade, &31, &39));

    let mut graph = TopoGraph::with_comparer(decade);
    graph.add_dependency(12, 25);
    graph.add_dependency(27, 31);
    graph.add_dependency(19, 38);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.dependency_count(), 3);
    assert!(graph.values_are_equal(&12, &17));

    let order = graph.sort_ids().unwrap();
    assert_topological(&graph, &order);
    assert_eq!(graph.sort().unwrap(), vec![&12, &25, &31]);
}

#[test]
fn test_comparer_by_reference() {
    let shared = CaseInsensitive;
    let mut first = TopoGraph::with_comparer(&shared);
    let mut second = TopoGraph::with_comparer(&shared);

    first.add_dependency("a", "B");
    second.add_dependency("A", "b");

    assert!(first.values_are_equal(&"A", &"a"));
    assert_eq!(first.sort().unwrap(), vec![&"a", &"B"]);
    assert_eq!(second.sort().unwrap(), vec![&"A", &"b"]);
}
