//! [`TestWorkspace`] builder for taskplan test scenarios.

use std::fs;
use std::path::Path;

use plan_fs::NormalizedPath;
use serde_json::Value;
use tempfile::TempDir;

/// A temporary workspace directory with helpers for writing configuration
/// files and asserting on the result.
///
/// # Example
///
/// ```rust,no_run
/// use plan_test_utils::TestWorkspace;
/// use serde_json::json;
///
/// let workspace = TestWorkspace::new();
/// let config = workspace.write_config(&json!({"projects": {"app": {}}}));
/// assert!(config.is_file());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonical root, as the resolver would see it.
    pub fn root_path(&self) -> NormalizedPath {
        NormalizedPath::canonicalize(self.root()).unwrap()
    }

    /// Canonical path of `relative` under the root.
    pub fn path(&self, relative: &str) -> NormalizedPath {
        self.root_path().join(relative)
    }

    /// Write `document` as pretty JSON to `taskplan.json`.
    pub fn write_config(&self, document: &Value) -> NormalizedPath {
        let content = serde_json::to_string_pretty(document).unwrap();
        self.write_file("taskplan.json", &content)
    }

    /// Write raw text to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> NormalizedPath {
        let full_path = self.root().join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self.path(relative)
    }

    /// Create `relative` as a directory.
    pub fn create_dir(&self, relative: &str) -> NormalizedPath {
        fs::create_dir_all(self.root().join(relative)).unwrap();
        self.path(relative)
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
