//! Error types for plan-core
//!
//! Every failure of a resolution call is a [`ConfigError`]. Errors carry the
//! structured detail (names, cycle, validation issues) a presentation layer
//! needs; the engine itself never prints.

use std::fmt;

use plan_meta::ValidationIssue;

/// Result type for plan-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while resolving a configuration document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The raw document failed structural validation
    #[error("Configuration failed validation with {} issue(s): {}", .issues.len(), join_issues(.issues))]
    SchemaInvalid { issues: Vec<ValidationIssue> },

    /// A requested or `extends`-referenced project does not exist
    #[error("{}", describe_missing_projects(.names, .extended_by.as_deref()))]
    ProjectNotFound {
        names: Vec<String>,
        /// Project whose `extends` named the missing project
        extended_by: Option<String>,
    },

    /// An `extends` chain revisits a project
    #[error("Circular extends chain: {}", .cycle.join(" -> "))]
    CircularExtends { cycle: Vec<String> },

    /// The requested task does not exist on the resolved project
    #[error("Task '{task}' not found in project '{project}'")]
    TaskNotFound { project: String, task: String },

    /// A non-skipped custom task has no handler
    #[error("Custom task '{task}' in project '{project}' has no handler")]
    MissingHandler { project: String, task: String },

    /// The selected environment's override entry is not an object
    #[error(
        "envOverrides.{env} of task '{task}' in project '{project}' must be an object, found {found}"
    )]
    InvalidOverrideTarget {
        project: String,
        task: String,
        env: String,
        found: String,
    },

    /// The document could not be loaded
    #[error(transparent)]
    Load(#[from] plan_fs::Error),
}

/// Fieldless view of [`ConfigError`] for matching on the taxonomy alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    SchemaInvalid,
    ProjectNotFound,
    CircularExtends,
    TaskNotFound,
    MissingHandler,
    InvalidOverrideTarget,
    Load,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::SchemaInvalid { .. } => ConfigErrorKind::SchemaInvalid,
            Self::ProjectNotFound { .. } => ConfigErrorKind::ProjectNotFound,
            Self::CircularExtends { .. } => ConfigErrorKind::CircularExtends,
            Self::TaskNotFound { .. } => ConfigErrorKind::TaskNotFound,
            Self::MissingHandler { .. } => ConfigErrorKind::MissingHandler,
            Self::InvalidOverrideTarget { .. } => ConfigErrorKind::InvalidOverrideTarget,
            Self::Load(_) => ConfigErrorKind::Load,
        }
    }

    pub(crate) fn project_not_found(name: &str, extended_by: Option<&str>) -> Self {
        Self::ProjectNotFound {
            names: vec![name.to_string()],
            extended_by: extended_by.map(str::to_string),
        }
    }
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ValidationIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_missing_projects(names: &[String], extended_by: Option<&str>) -> String {
    let mut message = format!("Project not found: {}", names.join(", "));
    if let Some(child) = extended_by {
        message.push_str(&format!(" (extended by '{child}')"));
        if names.iter().any(|n| looks_like_file_path(n)) {
            message.push_str("; extending a project from another configuration file is not supported");
        }
    }
    message
}

/// `extends` values that read as paths rather than project names.
pub(crate) fn looks_like_file_path(name: &str) -> bool {
    name.contains('/')
        || name.contains('\\')
        || [".json", ".jsonc", ".yaml", ".yml", ".toml"]
            .iter()
            .any(|ext| name.ends_with(ext))
}
