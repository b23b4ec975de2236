//! Resolution of a configuration document into an ordered task plan
//!
//! [`ConfigResolver`] runs the whole pipeline in one pass:
//! validate, select projects, resolve `extends`, select tasks, apply
//! environment overrides, attach workspace context, drop skipped tasks and
//! order the rest by priority. Any failure aborts the call; there are no
//! partial results.

use std::collections::HashSet;
use std::convert::Infallible;
use std::str::FromStr;

use plan_fs::{DocumentCache, DocumentLoader, NormalizedPath};
use plan_meta::{ConfigDocument, SchemaValidator, StructuralValidator, TaskCategory, ValidationIssue};
use serde::Serialize;
use serde_json::Value;

use crate::context::{WorkspaceContext, attach_context};
use crate::inherit::resolve_project;
use crate::select::{ALL, TaskSelection, select_tasks};
use crate::task::{MergedTask, ResolvedTaskConfig};
use crate::{ConfigError, Result};

/// Which projects of a document to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectSelection {
    #[default]
    All,
    Named(Vec<String>),
}

impl ProjectSelection {
    /// Build a selection from names given on a command line.
    ///
    /// No names, or any name equal to `all`, selects every project.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || names.iter().any(|n| n.trim() == ALL) {
            Self::All
        } else {
            Self::Named(names)
        }
    }
}

impl FromStr for ProjectSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_names(
            s.split(',').map(str::trim).filter(|n| !n.is_empty()),
        ))
    }
}

/// Run-time inputs of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub workspace_root: NormalizedPath,
    pub env: Option<String>,
    pub projects: ProjectSelection,
    pub task: TaskSelection,
}

impl Selectors {
    /// Select every task of every project in `workspace_root`, with no
    /// environment.
    pub fn new(workspace_root: impl Into<NormalizedPath>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            env: None,
            projects: ProjectSelection::All,
            task: TaskSelection::All,
        }
    }

    /// Selectors whose workspace root is the directory holding `config_path`.
    pub fn for_config_file(config_path: &NormalizedPath) -> Self {
        let root = config_path
            .parent()
            .unwrap_or_else(|| NormalizedPath::new("."));
        Self::new(root)
    }

    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn projects(mut self, projects: ProjectSelection) -> Self {
        self.projects = projects;
        self
    }

    /// Add one named project to the selection.
    pub fn project(mut self, name: impl Into<String>) -> Self {
        match &mut self.projects {
            ProjectSelection::Named(names) => names.push(name.into()),
            ProjectSelection::All => self.projects = ProjectSelection::Named(vec![name.into()]),
        }
        self
    }

    pub fn task(mut self, task: impl Into<TaskSelection>) -> Self {
        self.task = task.into();
        self
    }
}

/// A task that resolved but is excluded from execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedTask {
    pub project_name: String,
    pub task_name: String,
    pub category: TaskCategory,
}

/// Output of a resolution: the ordered tasks to run and the tasks skipped.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolutionPlan {
    pub tasks: Vec<ResolvedTaskConfig>,
    pub skipped: Vec<SkippedTask>,
}

impl ResolutionPlan {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Resolves configuration documents against [`Selectors`].
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver<V = StructuralValidator> {
    validator: V,
}

impl ConfigResolver<StructuralValidator> {
    /// Create a resolver using the built-in structural validator.
    pub fn new() -> Self {
        Self {
            validator: StructuralValidator::new(),
        }
    }
}

impl<V: SchemaValidator> ConfigResolver<V> {
    /// Create a resolver with a custom schema validator.
    pub fn with_validator(validator: V) -> Self {
        Self { validator }
    }

    /// Validate a raw document, failing with every issue found.
    pub fn validate(&self, document: &Value) -> Result<()> {
        let issues = self.validator.validate(document);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::SchemaInvalid { issues })
        }
    }

    /// Resolve `document` to the ordered list of tasks to execute.
    ///
    /// # Example
    ///
    /// ```
    /// use plan_core::{ConfigResolver, Selectors};
    /// use serde_json::json;
    ///
    /// let document = json!({
    ///     "projects": {
    ///         "base": { "tasks": { "build": { "priority": 1 } } },
    ///         "child": {
    ///             "extends": "base",
    ///             "tasks": { "build": { "envOverrides": { "prod": { "priority": 9 } } } }
    ///         }
    ///     }
    /// });
    ///
    /// let selectors = Selectors::new("/workspace").env("prod").project("child");
    /// let tasks = ConfigResolver::new().resolve(&document, None, &selectors)?;
    ///
    /// assert_eq!(tasks.len(), 1);
    /// assert_eq!(tasks[0].priority, 9);
    /// # Ok::<(), plan_core::ConfigError>(())
    /// ```
    pub fn resolve(
        &self,
        document: &Value,
        config_path: Option<&NormalizedPath>,
        selectors: &Selectors,
    ) -> Result<Vec<ResolvedTaskConfig>> {
        self.resolve_plan(document, config_path, selectors)
            .map(|plan| plan.tasks)
    }

    /// Resolve `document`, also reporting the tasks that were skipped.
    pub fn resolve_plan(
        &self,
        document: &Value,
        config_path: Option<&NormalizedPath>,
        selectors: &Selectors,
    ) -> Result<ResolutionPlan> {
        // Step 1: validate
        self.validate(document)?;
        let document = ConfigDocument::from_value(document).map_err(|e| {
            tracing::debug!(error = %e, "Validated document does not fit the typed model");
            ConfigError::SchemaInvalid {
                issues: vec![ValidationIssue::new("", e.to_string())],
            }
        })?;

        // Step 2: target projects
        let targets = target_projects(&document, &selectors.projects)?;
        tracing::debug!(projects = targets.len(), task = %selectors.task, env = ?selectors.env, "Resolving configuration");

        let env = selectors.env.as_deref();
        let context = WorkspaceContext {
            workspace_root: &selectors.workspace_root,
            config_path,
            environment: env,
        };

        let mut plan = ResolutionPlan::default();
        for name in &targets {
            // Step 3: inheritance
            let project = resolve_project(&document.projects, name)?;

            // Step 4: task selection
            for selected in select_tasks(&project, &selectors.task)? {
                // Step 5: overrides
                let effective = selected.with_env(&project.name, env)?;

                if effective.definition.skip() {
                    tracing::debug!(project = %project.name, task = %effective.name, "Skipping task");
                    plan.skipped.push(SkippedTask {
                        project_name: project.name.clone(),
                        task_name: effective.name,
                        category: effective.category,
                    });
                    continue;
                }

                // Step 6: context
                let merged = MergedTask::from_selected(&project.name, effective)?;
                plan.tasks.push(attach_context(merged, &project, &context));
            }
        }

        // Step 7: stable priority order
        plan.tasks.sort_by_key(|task| task.priority);

        tracing::debug!(
            tasks = plan.tasks.len(),
            skipped = plan.skipped.len(),
            "Resolution complete"
        );
        Ok(plan)
    }

    /// Load `path` through `cache` and resolve it.
    pub fn resolve_file<L: DocumentLoader>(
        &self,
        cache: &DocumentCache<L>,
        path: &NormalizedPath,
        selectors: &Selectors,
    ) -> Result<ResolutionPlan> {
        let document = cache.get(path)?;
        self.resolve_plan(&document, Some(path), selectors)
    }
}

/// Expand the project selection against the document.
///
/// Named projects keep the caller's order with duplicates dropped; every
/// missing name is reported in a single error.
fn target_projects(document: &ConfigDocument, selection: &ProjectSelection) -> Result<Vec<String>> {
    match selection {
        ProjectSelection::All => Ok(document.project_names().map(str::to_string).collect()),
        ProjectSelection::Named(names) => {
            let mut seen = HashSet::new();
            let unique: Vec<String> = names
                .iter()
                .filter(|name| seen.insert(name.as_str()))
                .cloned()
                .collect();

            let missing: Vec<String> = unique
                .iter()
                .filter(|name| document.project(name).is_none())
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(ConfigError::ProjectNotFound {
                    names: missing,
                    extended_by: None,
                });
            }
            Ok(unique)
        }
    }
}
