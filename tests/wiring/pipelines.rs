//! Catalogs of pipeline stages that name their predecessor

use std::sync::Arc;

use topograph::{Catalog, CollectingDiagnostics, Sequenced, Severity, SortError, WiringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Lex,
    Parse,
    Resolve,
    Typeck,
    Codegen,
}

#[derive(Debug)]
struct CompilerPass(Pass);

impl Sequenced for CompilerPass {
    type Key = Pass;

    fn key(&self) -> Pass {
        self.0
    }

    fn predecessor(&self) -> Option<Pass> {
        match self.0 {
            Pass::Lex => None,
            Pass::Parse => Some(Pass::Lex),
            Pass::Resolve => Some(Pass::Parse),
            Pass::Typeck => Some(Pass::Resolve),
            Pass::Codegen => Some(Pass::Typeck),
        }
    }
}

#[derive(Debug, Clone)]
struct Stage {
    name: String,
    after: Option<String>,
}

impl Stage {
    fn new(name: &str, after: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            after: after.map(str::to_string),
        }
    }
}

impl Sequenced for Stage {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn predecessor(&self) -> Option<String> {
        self.after.clone()
    }
}

#[test]
fn test_compiler_passes_in_any_registration_order() {
    let catalog: Catalog<CompilerPass> = [
        Pass::Codegen,
        Pass::Resolve,
        Pass::Lex,
        Pass::Typeck,
        Pass::Parse,
    ]
    .into_iter()
    .map(CompilerPass)
    .collect();

    let order: Vec<Pass> = catalog.sequence().unwrap().iter().map(|p| p.0).collect();

    assert_eq!(
        order,
        [
            Pass::Lex,
            Pass::Parse,
            Pass::Resolve,
            Pass::Typeck,
            Pass::Codegen
        ]
    );
}

#[test]
fn test_missing_pass_is_reported() {
    let catalog: Catalog<CompilerPass> = [Pass::Lex, Pass::Parse, Pass::Typeck]
        .into_iter()
        .map(CompilerPass)
        .collect();

    let err = catalog.sequence().unwrap_err();
    assert_eq!(
        err,
        WiringError::UnknownPredecessor {
            item: "Typeck".to_string(),
            predecessor: "Resolve".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "item 'Typeck' declares predecessor 'Resolve', which is not in the catalog"
    );
}

#[test]
fn test_branching_stages() {
    let mut catalog = Catalog::new();
    catalog.extend([
        Stage::new("extract", None),
        Stage::new("validate", Some("extract")),
        Stage::new("report", Some("validate")),
        Stage::new("archive", Some("validate")),
    ]);

    let names: Vec<&str> = catalog
        .sequence()
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    assert_eq!(names, ["extract", "validate", "report", "archive"]);
}

#[test]
fn test_two_entry_points_are_rejected() {
    let sink = Arc::new(CollectingDiagnostics::new());
    let mut catalog = Catalog::with_diagnostics(sink.clone());
    catalog.add(Stage::new("extract", None));
    catalog.add(Stage::new("import", None));
    catalog.add(Stage::new("validate", Some("extract")));

    let err = catalog.sequence().unwrap_err();

    assert_eq!(
        err.to_string(),
        "multiple root items defined: \"extract\", \"import\""
    );
    assert_eq!(sink.entries(), vec![(Severity::Error, err.to_string())]);

    // Fixing the catalog makes the next call succeed
    catalog.remove(&"import".to_string());
    assert_eq!(catalog.sequence().unwrap().len(), 2);
    assert_eq!(sink.infos().len(), 1);
}

#[test]
fn test_ring_without_entry_point() {
    let mut catalog = Catalog::new();
    catalog.add(Stage::new("a", Some("c")));
    catalog.add(Stage::new("b", Some("a")));
    catalog.add(Stage::new("c", Some("b")));

    assert_eq!(catalog.sequence().unwrap_err(), WiringError::NoRoot);
}

#[test]
fn test_detached_ring_behind_root() {
    let mut catalog = Catalog::new();
    catalog.add(Stage::new("start", None));
    catalog.add(Stage::new("next", Some("start")));
    catalog.add(Stage::new("x", Some("y")));
    catalog.add(Stage::new("y", Some("x")));

    let err = catalog.sequence().unwrap_err();
    assert!(matches!(err, WiringError::Sort(SortError::Cycle { .. })));
    assert!(err
        .to_string()
        .starts_with("could not create execution sequence"));
}
