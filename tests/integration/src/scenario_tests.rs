//! Multi-step scenarios across the loader, cache and resolver
//!
//! These exercise a resolution session the way the CLI runs one: discover
//! the configuration, load it once, resolve against several selectors.

use plan_core::{ConfigErrorKind, ConfigResolver, ProjectSelection, Selectors};
use plan_fs::{DocumentCache, DocumentLoader, FsDocumentLoader, NormalizedPath, find_config_file};
use plan_test_utils::{TestWorkspace, documents};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Barrier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Filesystem loader that counts reads.
#[derive(Default)]
struct CountingLoader {
    reads: AtomicUsize,
}

impl DocumentLoader for CountingLoader {
    fn load(&self, path: &NormalizedPath) -> plan_fs::Result<Value> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        FsDocumentLoader.load(path)
    }
}

#[test]
fn discover_then_resolve_every_environment() {
    let workspace = TestWorkspace::new();
    workspace.write_config(&documents::monorepo());
    let nested = workspace.create_dir("packages/api/src");

    let config_path = find_config_file(&nested.to_native()).unwrap();
    assert_eq!(config_path.file_name(), Some("taskplan.json"));

    let cache = DocumentCache::new(CountingLoader::default());
    let resolver = ConfigResolver::new();
    let base = Selectors::for_config_file(&config_path).project("api");

    let default = resolver.resolve_file(&cache, &config_path, &base).unwrap();
    let prod = resolver
        .resolve_file(&cache, &config_path, &base.clone().env("prod"))
        .unwrap();

    let names = |plan: &plan_core::ResolutionPlan| -> Vec<String> {
        plan.tasks.iter().map(|t| t.task_name.clone()).collect()
    };
    assert_eq!(names(&default), vec!["lint", "build"]);
    assert_eq!(names(&prod), vec!["lint", "build", "deploy"]);
    assert_eq!(default.skipped[0].task_name, "deploy");
    assert!(prod.skipped.is_empty());

    assert_eq!(cache.loader().reads.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_sessions_share_one_read() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_config(&documents::monorepo());

    let cache = DocumentCache::new(CountingLoader::default());
    let resolver = ConfigResolver::new();
    let barrier = Barrier::new(8);
    let envs = ["dev", "prod"];

    thread::scope(|scope| {
        for i in 0..8 {
            let (cache, resolver, barrier, config_path) = (&cache, &resolver, &barrier, &config_path);
            scope.spawn(move || {
                let selectors = Selectors::for_config_file(config_path).env(envs[i % 2]);
                barrier.wait();
                let plan = resolver.resolve_file(cache, config_path, &selectors).unwrap();
                assert!(!plan.tasks.is_empty());
            });
        }
    });

    assert_eq!(cache.loader().reads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn corrected_file_can_be_retried_after_parse_failure() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_file("taskplan.json", "{ \"projects\": { ");

    let cache = DocumentCache::default();
    let resolver = ConfigResolver::new();
    let selectors = Selectors::for_config_file(&config_path);

    let err = resolver.resolve_file(&cache, &config_path, &selectors).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Load);
    assert!(!cache.contains(&config_path));

    workspace.write_config(&json!({"projects": {"app": {"tasks": {"build": {}}}}}));
    let plan = resolver.resolve_file(&cache, &config_path, &selectors).unwrap();
    assert_eq!(plan.tasks.len(), 1);
}

#[test]
fn session_keeps_the_document_it_loaded() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_config(&json!({"projects": {"app": {"tasks": {"build": {}}}}}));

    let cache = DocumentCache::default();
    let resolver = ConfigResolver::new();
    let selectors = Selectors::for_config_file(&config_path);
    assert_eq!(resolver.resolve_file(&cache, &config_path, &selectors).unwrap().tasks.len(), 1);

    workspace.write_config(&json!({"projects": {}}));
    assert_eq!(resolver.resolve_file(&cache, &config_path, &selectors).unwrap().tasks.len(), 1);

    let fresh = DocumentCache::default();
    assert!(resolver.resolve_file(&fresh, &config_path, &selectors).unwrap().is_empty());
}

#[test]
fn schema_error_lists_every_issue_with_paths() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_config(&json!({
        "projects": {
            "web": {"root": false, "tasks": {"build": {"priority": 1.5}}},
            "api": {"extends": "", "tasks": {"lint": {"handler": 7, "envOverrides": []}}}
        }
    }));

    let err = ConfigResolver::new()
        .resolve_file(&DocumentCache::default(), &config_path, &Selectors::for_config_file(&config_path))
        .unwrap_err();

    match err {
        plan_core::ConfigError::SchemaInvalid { issues } => {
            let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
            assert_eq!(
                paths,
                vec![
                    "/projects/web/root",
                    "/projects/web/tasks/build/priority",
                    "/projects/api/extends",
                    "/projects/api/tasks/lint/handler",
                    "/projects/api/tasks/lint/envOverrides",
                ]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn named_selection_reports_all_missing_projects() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_config(&documents::monorepo());

    let selectors = Selectors::for_config_file(&config_path)
        .projects(ProjectSelection::from_names(["web", "docs", "mobile"]));
    let err = ConfigResolver::new()
        .resolve_file(&DocumentCache::default(), &config_path, &selectors)
        .unwrap_err();

    assert_eq!(err.kind(), ConfigErrorKind::ProjectNotFound);
    assert_eq!(err.to_string(), "Project not found: docs, mobile");
}
