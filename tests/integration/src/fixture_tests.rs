//! Golden-file tests using test-fixtures/workspaces
//!
//! Each fixture is a small workspace with a configuration file in one of the
//! supported formats. Resolved plans are compared against
//! test-fixtures/expected/.

use plan_core::{ConfigErrorKind, ConfigResolver, Selectors};
use plan_fs::{DocumentCache, NormalizedPath, find_config_file};
use plan_meta::ConfigDocument;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn fixture_config(workspace: &str) -> NormalizedPath {
    let dir = fixtures_dir().join("workspaces").join(workspace);
    find_config_file(&dir)
        .unwrap_or_else(|e| panic!("No configuration in fixture {}: {}", dir.display(), e))
}

fn load_expected(name: &str) -> Value {
    let path = fixtures_dir().join("expected").join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read expected output {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap()
}

#[test]
fn monorepo_prod_plan_matches_golden_file() {
    let config_path = fixture_config("monorepo");
    let cache = DocumentCache::default();
    let selectors = Selectors::new("/ws").env("prod");

    let plan = ConfigResolver::new()
        .resolve_file(&cache, &config_path, &selectors)
        .unwrap();

    let mut actual = serde_json::to_value(&plan).unwrap();
    for task in actual["tasks"].as_array_mut().unwrap() {
        let origin = task
            .as_object_mut()
            .unwrap()
            .remove("configPath")
            .unwrap();
        assert_eq!(origin, Value::String(config_path.to_string()));
    }

    assert_eq!(actual, load_expected("monorepo-prod.json"));
}

#[test]
fn monorepo_is_discovered_as_jsonc() {
    let config_path = fixture_config("monorepo");
    assert_eq!(config_path.file_name(), Some("taskplan.jsonc"));
}

#[test]
fn yaml_workspace_inherits_and_skips() {
    let config_path = fixture_config("yaml");
    let plan = ConfigResolver::new()
        .resolve_file(
            &DocumentCache::default(),
            &config_path,
            &Selectors::for_config_file(&config_path),
        )
        .unwrap();

    let order: Vec<String> = plan
        .tasks
        .iter()
        .map(|t| format!("{}:{}", t.project_name, t.task_name))
        .collect();
    assert_eq!(order, vec!["lib:build", "app:build", "app:bundle", "lib:docs"]);
    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].task_name, "docs");

    let app_build = &plan.tasks[1];
    assert_eq!(app_build.project_root, config_path.parent().unwrap().join("crates/app"));
    assert_eq!(app_build.options()["outputPath"], "target/lib");
}

#[test]
fn yaml_workspace_release_override() {
    let config_path = fixture_config("yaml");
    let tasks = ConfigResolver::new()
        .resolve_file(
            &DocumentCache::default(),
            &config_path,
            &Selectors::for_config_file(&config_path).env("release").task("build"),
        )
        .unwrap()
        .tasks;

    assert_eq!(tasks.len(), 2);
    for task in &tasks {
        assert_eq!(task.options()["optimize"], true);
    }
}

#[test]
fn cross_file_extends_is_rejected() {
    let config_path = fixture_config("cross-file");
    let err = ConfigResolver::new()
        .resolve_file(
            &DocumentCache::default(),
            &config_path,
            &Selectors::for_config_file(&config_path),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ConfigErrorKind::ProjectNotFound);
    let message = err.to_string();
    assert!(message.contains("../monorepo/taskplan.jsonc"), "got: {message}");
    assert!(message.contains("another configuration file"), "got: {message}");
}

#[rstest]
#[case("monorepo", &["shared", "web", "api"])]
#[case("yaml", &["lib", "app"])]
#[case("cross-file", &["app"])]
fn fixtures_are_valid_and_keep_project_order(#[case] workspace: &str, #[case] expected: &[&str]) {
    let config_path = fixture_config(workspace);
    let cache = DocumentCache::default();
    let raw = cache.get(&config_path).unwrap();

    ConfigResolver::new().validate(&raw).unwrap();
    let document = ConfigDocument::from_value(&raw).unwrap();
    let names: Vec<&str> = document.project_names().collect();
    assert_eq!(names, expected);
}
