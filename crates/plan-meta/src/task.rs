//! Raw task definitions and their reserved keys
//!
//! A task is an open bag of options. A handful of keys are reserved and
//! read by the resolver instead of being handed to the task handler.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Insertion-ordered option object.
pub type OptionMap = serde_json::Map<String, Value>;

/// Name of the built-in build task. Every other task key is a custom task.
pub const BUILD_TASK_NAME: &str = "build";

/// Per-environment partial option objects.
pub const ENV_OVERRIDES_KEY: &str = "envOverrides";

/// Run ordering, ascending. Missing means 0.
pub const PRIORITY_KEY: &str = "priority";

/// Exclude the task from execution while still resolving it.
pub const SKIP_KEY: &str = "skip";

/// Module or executable that performs a custom task.
pub const HANDLER_KEY: &str = "handler";

/// Keys that never reach the task's option set.
pub const RESERVED_TASK_KEYS: [&str; 4] = [ENV_OVERRIDES_KEY, PRIORITY_KEY, SKIP_KEY, HANDLER_KEY];

/// Whether a task is the built-in build task or a custom one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Build,
    Custom,
}

impl TaskCategory {
    /// Category implied by a task key.
    pub fn for_task_name(name: &str) -> Self {
        if name == BUILD_TASK_NAME {
            Self::Build
        } else {
            Self::Custom
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskCategory::Build => write!(f, "build"),
            TaskCategory::Custom => write!(f, "custom"),
        }
    }
}

/// A task as written in the configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDefinition(OptionMap);

impl TaskDefinition {
    pub fn new(fields: OptionMap) -> Self {
        Self(fields)
    }

    /// Raw field lookup, reserved keys included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &OptionMap {
        &self.0
    }

    pub fn into_map(self) -> OptionMap {
        self.0
    }

    /// The `envOverrides` value, whatever its shape.
    pub fn env_overrides(&self) -> Option<&Value> {
        self.0.get(ENV_OVERRIDES_KEY).filter(|v| !v.is_null())
    }

    /// `priority`, defaulting to 0.
    pub fn priority(&self) -> i64 {
        self.0.get(PRIORITY_KEY).and_then(Value::as_i64).unwrap_or(0)
    }

    /// `skip`, defaulting to false.
    pub fn skip(&self) -> bool {
        self.0.get(SKIP_KEY).and_then(Value::as_bool).unwrap_or(false)
    }

    /// `handler`, if present and not blank.
    pub fn handler(&self) -> Option<&str> {
        self.0
            .get(HANDLER_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Option set handed to the task: every field except the reserved keys.
    pub fn options(&self) -> OptionMap {
        self.0
            .iter()
            .filter(|(key, _)| !RESERVED_TASK_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<OptionMap> for TaskDefinition {
    fn from(fields: OptionMap) -> Self {
        Self(fields)
    }
}
