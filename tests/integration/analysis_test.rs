//! Integration tests for the dead-function analysis
//!
//! These tests drive the complete pipeline over in-code program models and
//! over snapshot fixtures on disk.

use deadfunc::loader::{
    DynamicCall, FuncDecl, InterfaceDef, LoadedProgram, Package, SourceFile, TypeDef,
};
use deadfunc::{Analyzer, AnalysisError, Settings, SnapshotLoader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn settings() -> Settings {
    Settings {
        tests: false,
        filter: String::new(),
        working_dir: PathBuf::from("/work"),
    }
}

fn decl(name: &str, symbol: &str, line: u32) -> FuncDecl {
    FuncDecl {
        name: name.to_string(),
        symbol: symbol.to_string(),
        line,
        column: 1,
        ..Default::default()
    }
}

fn file(path: &str, decls: Vec<FuncDecl>) -> SourceFile {
    SourceFile {
        path: PathBuf::from(path),
        decls,
        ..Default::default()
    }
}

fn single_module(packages: Vec<Package>) -> LoadedProgram {
    LoadedProgram {
        modules: vec!["app".to_string()],
        packages,
    }
}

#[test]
fn test_unused_helper_is_reported_once() {
    // main calls used; helper is declared and never called.
    let mut main = decl("main", "app.main", 3);
    main.calls = vec!["app.used".to_string()];

    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file(
            "/work/app/main.go",
            vec![main, decl("used", "app.used", 8), decl("helper", "app.helper", 13)],
        )],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();

    assert_eq!(report.len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.func, "helper");
    assert_eq!(issue.file, PathBuf::from("app/main.go"));
    assert_eq!(issue.line, 13);
}

#[test]
fn test_generated_file_is_never_reported() {
    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![
            file("/work/app/main.go", vec![decl("main", "app.main", 3)]),
            SourceFile {
                path: PathBuf::from("/work/app/gen.go"),
                header: vec!["// Code generated by protoc-gen-go. DO NOT EDIT.".to_string()],
                decls: vec![decl("helper", "app.helper", 9)],
            },
        ],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_interface_method_of_unconstructed_type_is_live() {
    // T is never constructed, but I appears as a parameter type in main,
    // so T.M must be assumed callable through I.
    let mut main = decl("main", "app.main", 3);
    main.interfaces = vec!["app.I".to_string()];

    let mut methods = HashMap::new();
    methods.insert("M".to_string(), "(app.T).M".to_string());

    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file(
            "/work/app/main.go",
            vec![main, decl("M", "(app.T).M", 11)],
        )],
        types: vec![TypeDef {
            name: "T".to_string(),
            implements: vec!["app.I".to_string()],
            methods,
        }],
        interfaces: vec![InterfaceDef {
            name: "app.I".to_string(),
            methods: vec!["M".to_string()],
        }],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_dynamic_call_reaches_implementations() {
    let mut main = decl("main", "app.main", 3);
    main.dynamic_calls = vec![DynamicCall {
        interface: "app.I".to_string(),
        method: "M".to_string(),
    }];

    let mut methods = HashMap::new();
    methods.insert("M".to_string(), "(app.T).M".to_string());

    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file(
            "/work/app/main.go",
            vec![main, decl("M", "(app.T).M", 11), decl("helper", "app.helper", 20)],
        )],
        types: vec![TypeDef {
            name: "T".to_string(),
            implements: vec!["app.I".to_string()],
            methods,
        }],
        interfaces: vec![InterfaceDef {
            name: "app.I".to_string(),
            methods: vec!["M".to_string()],
        }],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();

    // The interface method is live; the plain helper is not.
    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].func, "helper");
}

#[test]
fn test_filter_restricts_report_to_matching_packages() {
    let program = single_module(vec![
        Package {
            path: "app".to_string(),
            is_main: true,
            files: vec![file(
                "/work/app/main.go",
                vec![decl("main", "app.main", 3), decl("dead", "app.dead", 8)],
            )],
            ..Default::default()
        },
        Package {
            path: "app/internal/util".to_string(),
            files: vec![file(
                "/work/app/internal/util/util.go",
                vec![decl("alsoDead", "app/internal/util.alsoDead", 4)],
            )],
            ..Default::default()
        },
    ]);

    let mut narrow = settings();
    narrow.filter = "^app/internal".to_string();

    let report = Analyzer::new(narrow).analyze(&program).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].func, "alsoDead");
}

#[test]
fn test_no_entry_points_is_fatal_with_no_issues() {
    let program = single_module(vec![Package {
        path: "app/util".to_string(),
        files: vec![file(
            "/work/app/util/util.go",
            vec![decl("helper", "app/util.helper", 4)],
        )],
        ..Default::default()
    }]);

    let err = Analyzer::new(settings()).analyze(&program).unwrap_err();
    assert!(matches!(err, AnalysisError::NoEntryPoints));
}

#[test]
fn test_generic_instantiations_collapse_to_one_issue() {
    let mut map_decl = decl("Map", "app.Map", 17);
    map_decl.instantiations = vec!["int".to_string(), "string".to_string()];

    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file(
            "/work/app/main.go",
            vec![decl("main", "app.main", 3), map_decl],
        )],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].func, "Map");
}

#[test]
fn test_declared_init_is_never_reported() {
    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file(
            "/work/app/main.go",
            vec![decl("main", "app.main", 3), decl("init", "app.init#1", 8)],
        )],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_unreached_package_functions_are_reported() {
    // app/util is imported by nothing reachable; its helper is dead, and
    // the default filter still covers it because it sits under the module.
    let program = single_module(vec![
        Package {
            path: "app".to_string(),
            is_main: true,
            files: vec![file("/work/app/main.go", vec![decl("main", "app.main", 3)])],
            ..Default::default()
        },
        Package {
            path: "app/util".to_string(),
            files: vec![file(
                "/work/app/util/util.go",
                vec![decl("helper", "app/util.helper", 4)],
            )],
            ..Default::default()
        },
    ]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].func, "helper");
}

#[test]
fn test_no_packages_is_fatal() {
    let program = LoadedProgram::default();
    let err = Analyzer::new(settings()).analyze(&program).unwrap_err();
    assert!(matches!(err, AnalysisError::NoPackages));
}

#[test]
fn test_compile_errors_are_fatal() {
    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        errors: vec!["undefined: x".to_string()],
        ..Default::default()
    }]);

    let err = Analyzer::new(settings()).analyze(&program).unwrap_err();
    assert!(matches!(err, AnalysisError::PackageErrors(_)));
}

#[test]
fn test_bad_filter_is_fatal_before_analysis() {
    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file("/work/app/main.go", vec![decl("main", "app.main", 3)])],
        ..Default::default()
    }]);

    let mut bad = settings();
    bad.filter = "^app[".to_string();

    let err = Analyzer::new(bad).analyze(&program).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidFilter(_)));
}

#[test]
fn test_multiple_modules_require_explicit_filter() {
    let program = LoadedProgram {
        modules: vec!["app".to_string(), "tool".to_string()],
        packages: vec![Package {
            path: "app".to_string(),
            is_main: true,
            files: vec![file("/work/app/main.go", vec![decl("main", "app.main", 3)])],
            ..Default::default()
        }],
    };

    let err = Analyzer::new(settings()).analyze(&program).unwrap_err();
    assert!(matches!(err, AnalysisError::MultipleModules(_)));
}

#[test]
fn test_dead_at_supports_diagnostic_placement() {
    let program = single_module(vec![Package {
        path: "app".to_string(),
        is_main: true,
        files: vec![file(
            "/work/app/main.go",
            vec![decl("main", "app.main", 3), decl("helper", "app.helper", 13)],
        )],
        ..Default::default()
    }]);

    let report = Analyzer::new(settings()).analyze(&program).unwrap();

    let issue = report.dead_at(Path::new("app/main.go"), 13).unwrap();
    assert_eq!(issue.message(), "func 'helper' is unused");
    assert!(report.dead_at(Path::new("app/main.go"), 3).is_none());
}

#[test]
fn test_snapshot_fixture_end_to_end() {
    let fixture = fixtures_path().join("dead_helper.json");
    let loader = SnapshotLoader::new(fixture);

    let report = Analyzer::new(settings()).run(&loader).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].func, "helper");
    assert_eq!(report.issues()[0].line, 13);
}

#[test]
fn test_snapshot_fixture_with_tests_included() {
    // The fixture's test package declares a helper that nothing calls; it
    // only shows up when test packages are loaded.
    let fixture = fixtures_path().join("dead_helper.json");
    let loader = SnapshotLoader::new(fixture);

    let mut with_tests = settings();
    with_tests.tests = true;

    let report = Analyzer::new(with_tests).run(&loader).unwrap();

    let funcs: Vec<&str> = report.issues().iter().map(|i| i.func.as_str()).collect();
    assert!(funcs.contains(&"helper"));
    assert!(funcs.contains(&"testOnlyHelper"));
}

#[test]
fn test_clean_fixture_reports_nothing() {
    let fixture = fixtures_path().join("clean.json");
    let loader = SnapshotLoader::new(fixture);

    let report = Analyzer::new(settings()).run(&loader).unwrap();
    assert!(report.is_empty());
}
