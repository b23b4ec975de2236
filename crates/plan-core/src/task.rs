//! Fully resolved task configuration

use plan_fs::NormalizedPath;
use plan_meta::{OptionMap, TaskCategory};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::select::SelectedTask;

/// What a task is, with the options handed to it.
///
/// Dispatch on the variant rather than on the task name: the built-in build
/// task takes options only, a custom task also names its handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum TaskKind {
    Build { options: OptionMap },
    Custom { handler: String, options: OptionMap },
}

impl TaskKind {
    pub fn category(&self) -> TaskCategory {
        match self {
            TaskKind::Build { .. } => TaskCategory::Build,
            TaskKind::Custom { .. } => TaskCategory::Custom,
        }
    }

    pub fn options(&self) -> &OptionMap {
        match self {
            TaskKind::Build { options } | TaskKind::Custom { options, .. } => options,
        }
    }

    pub fn handler(&self) -> Option<&str> {
        match self {
            TaskKind::Build { .. } => None,
            TaskKind::Custom { handler, .. } => Some(handler),
        }
    }
}

/// A non-skipped task after overrides, typed by its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTask {
    pub name: String,
    pub kind: TaskKind,
    pub priority: i64,
    /// Always false once a task is typed; skipped tasks are reported
    /// separately
    pub skip: bool,
}

impl MergedTask {
    /// Type an effective task definition.
    ///
    /// Skipped tasks are filtered out before this point, so a custom task
    /// without a handler fails with `MissingHandler`.
    pub fn from_selected(project: &str, task: SelectedTask) -> Result<Self> {
        let options = task.definition.options();
        let kind = match task.category {
            TaskCategory::Build => TaskKind::Build { options },
            TaskCategory::Custom => TaskKind::Custom {
                handler: task.handler(project)?.to_string(),
                options,
            },
        };

        Ok(Self {
            priority: task.definition.priority(),
            skip: task.definition.skip(),
            kind,
            name: task.name,
        })
    }
}

/// One task ready for execution, with its run-time context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTaskConfig {
    pub project_name: String,
    pub task_name: String,

    #[serde(flatten)]
    pub kind: TaskKind,

    pub priority: i64,
    /// Always false in a [`crate::ResolutionPlan`]; kept for consumers that
    /// build configs directly
    pub skip: bool,

    /// Environment whose overrides were applied
    pub environment: Option<String>,

    pub workspace_root: NormalizedPath,
    pub project_root: NormalizedPath,

    /// Configuration file the task came from; `None` for documents passed in
    /// directly
    pub config_path: Option<NormalizedPath>,
}

impl ResolvedTaskConfig {
    pub fn category(&self) -> TaskCategory {
        self.kind.category()
    }

    pub fn options(&self) -> &OptionMap {
        self.kind.options()
    }

    pub fn handler(&self) -> Option<&str> {
        self.kind.handler()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigErrorKind;
    use plan_meta::TaskDefinition;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn selected(name: &str, value: Value) -> SelectedTask {
        SelectedTask {
            name: name.to_string(),
            category: TaskCategory::for_task_name(name),
            definition: serde_json::from_value::<TaskDefinition>(value).unwrap(),
        }
    }

    #[test]
    fn build_task_keeps_options_without_reserved_keys() {
        let merged =
            MergedTask::from_selected("app", selected("build", json!({"out": "dist", "priority": 2})))
                .unwrap();
        assert_eq!(merged.priority, 2);
        assert_eq!(merged.kind.category(), TaskCategory::Build);
        assert_eq!(Value::Object(merged.kind.options().clone()), json!({"out": "dist"}));
    }

    #[test]
    fn custom_task_carries_handler() {
        let merged =
            MergedTask::from_selected("app", selected("lint", json!({"handler": " ./lint.js ", "fix": true})))
                .unwrap();
        assert_eq!(merged.kind.handler(), Some("./lint.js"));
        assert_eq!(Value::Object(merged.kind.options().clone()), json!({"fix": true}));
    }

    #[test]
    fn custom_task_without_handler_is_rejected() {
        let err = MergedTask::from_selected("app", selected("lint", json!({}))).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::MissingHandler);
    }

    #[test]
    fn blank_handler_counts_as_missing() {
        let err = MergedTask::from_selected("app", selected("lint", json!({"handler": "  "}))).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::MissingHandler);
        assert_eq!(err.to_string(), MergedTask::from_selected("app", selected("lint", json!({}))).unwrap_err().to_string());
    }

    #[test]
    fn serializes_flat_camel_case() {
        let config = ResolvedTaskConfig {
            project_name: "app".into(),
            task_name: "lint".into(),
            kind: TaskKind::Custom {
                handler: "./lint.js".into(),
                options: OptionMap::new(),
            },
            priority: 0,
            skip: false,
            environment: None,
            workspace_root: NormalizedPath::new("/ws"),
            project_root: NormalizedPath::new("/ws/app"),
            config_path: None,
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "projectName": "app",
                "taskName": "lint",
                "category": "custom",
                "handler": "./lint.js",
                "options": {},
                "priority": 0,
                "skip": false,
                "environment": null,
                "workspaceRoot": "/ws",
                "projectRoot": "/ws/app",
                "configPath": null
            })
        );
    }
}
