//! Task selection on a resolved project

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use plan_meta::{BUILD_TASK_NAME, TaskCategory, TaskDefinition};

use crate::inherit::ResolvedProject;
use crate::merge::apply_env_overrides;
use crate::{ConfigError, Result};

/// Keyword selecting every task or every project.
pub const ALL: &str = "all";

/// Which tasks of a project to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskSelection {
    #[default]
    All,
    Named(String),
}

impl FromStr for TaskSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            ALL => Self::All,
            name => Self::Named(name.to_string()),
        })
    }
}

impl From<&str> for TaskSelection {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(selection) => selection,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for TaskSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskSelection::All => write!(f, "{}", ALL),
            TaskSelection::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A task picked from a project, tagged with its category.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTask {
    pub name: String,
    pub category: TaskCategory,
    pub definition: TaskDefinition,
}

impl SelectedTask {
    fn new(name: &str, definition: &TaskDefinition) -> Self {
        Self {
            name: name.to_string(),
            category: TaskCategory::for_task_name(name),
            definition: definition.clone(),
        }
    }

    /// Replace the definition with its effective form for `env`.
    pub fn with_env(mut self, project: &str, env: Option<&str>) -> Result<Self> {
        self.definition = apply_env_overrides(&self.definition, env).map_err(|e| {
            ConfigError::InvalidOverrideTarget {
                project: project.to_string(),
                task: self.name.clone(),
                env: e.env,
                found: e.found.to_string(),
            }
        })?;
        Ok(self)
    }

    /// Handler of a custom task that is going to run; fails with
    /// [`ConfigError::MissingHandler`] when it has none.
    pub fn handler(&self, project: &str) -> Result<&str> {
        self.definition
            .handler()
            .ok_or_else(|| self.missing_handler(project))
    }

    fn missing_handler(&self, project: &str) -> ConfigError {
        ConfigError::MissingHandler {
            project: project.to_string(),
            task: self.name.clone(),
        }
    }
}

/// Pick the requested tasks of `project`.
///
/// For [`TaskSelection::All`] the `build` task comes first, followed by the
/// custom tasks in declaration order. A custom task called `all` can only
/// be reached this way.
pub fn select_tasks(project: &ResolvedProject, selection: &TaskSelection) -> Result<Vec<SelectedTask>> {
    let selected = match selection {
        TaskSelection::Named(name) => {
            let definition = project
                .tasks
                .get(name)
                .ok_or_else(|| ConfigError::TaskNotFound {
                    project: project.name.clone(),
                    task: name.clone(),
                })?;
            vec![SelectedTask::new(name, definition)]
        }
        TaskSelection::All => {
            let build = project
                .tasks
                .get(BUILD_TASK_NAME)
                .map(|definition| SelectedTask::new(BUILD_TASK_NAME, definition));
            build
                .into_iter()
                .chain(
                    project
                        .tasks
                        .iter()
                        .filter(|(name, _)| name.as_str() != BUILD_TASK_NAME)
                        .map(|(name, definition)| SelectedTask::new(name, definition)),
                )
                .collect()
        }
    };

    tracing::debug!(
        project = %project.name,
        selection = %selection,
        count = selected.len(),
        "Selected tasks"
    );
    Ok(selected)
}
