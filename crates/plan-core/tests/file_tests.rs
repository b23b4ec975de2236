//! Resolution of configuration files through a document cache

use std::sync::atomic::{AtomicUsize, Ordering};

use plan_core::{ConfigErrorKind, ConfigResolver, Selectors};
use plan_fs::{DocumentCache, DocumentLoader, FsDocumentLoader, NormalizedPath};
use plan_test_utils::{TestWorkspace, documents};
use serde_json::{Value, json};

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
fn resolves_file_relative_to_its_directory() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_config(&documents::monorepo());

    let cache = DocumentCache::default();
    let selectors = Selectors::for_config_file(&config_path).project("web");
    let plan = ConfigResolver::new()
        .resolve_file(&cache, &config_path, &selectors)
        .unwrap();

    let root = workspace.root_path();
    assert_eq!(plan.tasks.len(), 2);
    for task in &plan.tasks {
        assert_eq!(task.workspace_root, root);
        assert_eq!(task.project_root, root.join("packages/web"));
        assert_eq!(task.config_path.as_ref(), Some(&config_path));
    }
    assert_eq!(plan.skipped.len(), 1);
}

#[test]
fn repeated_resolution_reads_file_once() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_config(&documents::extends_with_prod_override());

    let cache = DocumentCache::new(CountingLoader::default());
    let resolver = ConfigResolver::new();
    let base = Selectors::for_config_file(&config_path);

    let dev = resolver.resolve_file(&cache, &config_path, &base.clone().env("dev")).unwrap();
    let prod = resolver.resolve_file(&cache, &config_path, &base.env("prod")).unwrap();

    assert_eq!(cache.loader().reads.load(Ordering::SeqCst), 1);
    assert_eq!(dev.tasks.iter().map(|t| t.priority).collect::<Vec<_>>(), vec![1, 1]);
    assert_eq!(prod.tasks.iter().map(|t| t.priority).collect::<Vec<_>>(), vec![1, 9]);
}

#[test]
fn jsonc_file_with_comments_resolves() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_file(
        "taskplan.jsonc",
        r#"{
            // shared defaults
            "projects": {
                "app": {
                    "root": "app",
                    "tasks": {
                        /* the build */
                        "build": { "outputPath": "dist", },
                    },
                },
            },
        }"#,
    );

    let plan = ConfigResolver::new()
        .resolve_file(&DocumentCache::default(), &config_path, &Selectors::for_config_file(&config_path))
        .unwrap();
    assert_eq!(plan.tasks[0].options()["outputPath"], json!("dist"));
}

#[test]
fn yaml_file_resolves() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_file(
        "taskplan.yaml",
        "projects:\n  app:\n    tasks:\n      lint:\n        handler: ./lint.js\n        priority: 2\n",
    );

    let plan = ConfigResolver::new()
        .resolve_file(&DocumentCache::default(), &config_path, &Selectors::for_config_file(&config_path))
        .unwrap();
    assert_eq!(plan.tasks[0].handler(), Some("./lint.js"));
    assert_eq!(plan.tasks[0].priority, 2);
}

#[test]
fn missing_file_is_a_load_error() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.path("taskplan.json");

    let err = ConfigResolver::new()
        .resolve_file(&DocumentCache::default(), &config_path, &Selectors::for_config_file(&config_path))
        .unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Load);
}

#[test]
fn malformed_file_is_a_load_error() {
    let workspace = TestWorkspace::new();
    let config_path = workspace.write_file("taskplan.json", "{ \"projects\": ");

    let err = ConfigResolver::new()
        .resolve_file(&DocumentCache::default(), &config_path, &Selectors::for_config_file(&config_path))
        .unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Load);
}
