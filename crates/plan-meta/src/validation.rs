//! Structural validation of raw configuration documents
//!
//! Validation runs on the untyped tree, before anything is merged, and
//! reports every problem it finds rather than stopping at the first. Option
//! bags are open: unknown keys are never an error.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::task::{ENV_OVERRIDES_KEY, HANDLER_KEY, PRIORITY_KEY, SKIP_KEY};

/// One validation failure, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value, e.g. `/projects/app/tasks/build/priority`
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Checks a raw document against the configuration schema.
///
/// An empty result means the document is valid.
pub trait SchemaValidator {
    fn validate(&self, document: &Value) -> Vec<ValidationIssue>;
}

/// Built-in validator for the fixed configuration schema.
///
/// `envOverrides` must be an object. Reserved fields inside an object entry
/// are checked like the task's own; an entry that is not an object is only
/// an error once its environment is selected.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralValidator;

impl StructuralValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_project(&self, path: &str, project: &Value, issues: &mut Vec<ValidationIssue>) {
        let Some(project) = project.as_object() else {
            issues.push(ValidationIssue::new(path, "project must be an object"));
            return;
        };

        match project.get("extends") {
            None | Some(Value::Null) => {}
            Some(Value::String(name)) if name.trim().is_empty() => {
                issues.push(ValidationIssue::new(
                    pointer(path, "extends"),
                    "extends must not be empty",
                ));
            }
            Some(Value::String(_)) => {}
            Some(other) => issues.push(type_issue(pointer(path, "extends"), "a string", other)),
        }

        if let Some(root) = project.get("root").filter(|v| !v.is_null() && !v.is_string()) {
            issues.push(type_issue(pointer(path, "root"), "a string", root));
        }

        match project.get("tasks") {
            None | Some(Value::Null) => {}
            Some(Value::Object(tasks)) => {
                let tasks_path = pointer(path, "tasks");
                for (name, task) in tasks {
                    self.check_task(&pointer(&tasks_path, name), task, issues);
                }
            }
            Some(other) => issues.push(type_issue(pointer(path, "tasks"), "an object", other)),
        }
    }

    fn check_task(&self, path: &str, task: &Value, issues: &mut Vec<ValidationIssue>) {
        let Some(task) = task.as_object() else {
            issues.push(ValidationIssue::new(path, "task must be an object"));
            return;
        };
        check_reserved_fields(path, task, issues);

        let overrides_path = pointer(path, ENV_OVERRIDES_KEY);
        match task.get(ENV_OVERRIDES_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Object(overrides)) => {
                for (env, entry) in overrides {
                    if let Some(entry) = entry.as_object() {
                        check_reserved_fields(&pointer(&overrides_path, env), entry, issues);
                    }
                }
            }
            Some(other) => issues.push(type_issue(overrides_path, "an object", other)),
        }
    }
}

impl SchemaValidator for StructuralValidator {
    fn validate(&self, document: &Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let Some(root) = document.as_object() else {
            issues.push(type_issue(String::new(), "an object", document));
            return issues;
        };

        if let Some(schema) = root.get("$schema").filter(|v| !v.is_null() && !v.is_string()) {
            issues.push(type_issue(pointer("", "$schema"), "a string", schema));
        }

        match root.get("projects") {
            None => issues.push(ValidationIssue::new("/projects", "projects is required")),
            Some(Value::Object(projects)) => {
                for (name, project) in projects {
                    self.check_project(&pointer("/projects", name), project, &mut issues);
                }
            }
            Some(other) => issues.push(type_issue("/projects".to_string(), "an object", other)),
        }

        tracing::trace!(issues = issues.len(), "Validated configuration document");
        issues
    }
}

fn check_reserved_fields(path: &str, task: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    if let Some(priority) = task.get(PRIORITY_KEY).filter(|v| !v.is_null()) {
        if priority.is_u64() && priority.as_i64().is_none() {
            issues.push(ValidationIssue::new(
                pointer(path, PRIORITY_KEY),
                "priority is out of range",
            ));
        } else if priority.as_i64().is_none() {
            issues.push(type_issue(pointer(path, PRIORITY_KEY), "an integer", priority));
        }
    }
    if let Some(skip) = task.get(SKIP_KEY).filter(|v| !v.is_null() && !v.is_boolean()) {
        issues.push(type_issue(pointer(path, SKIP_KEY), "a boolean", skip));
    }
    if let Some(handler) = task.get(HANDLER_KEY).filter(|v| !v.is_null() && !v.is_string()) {
        issues.push(type_issue(pointer(path, HANDLER_KEY), "a string", handler));
    }
}

fn type_issue(path: String, expected: &str, found: &Value) -> ValidationIssue {
    ValidationIssue::new(path, format!("expected {}, found {}", expected, value_kind(found)))
}

/// JSON type name of a value, as used in validation messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Append an escaped segment to a JSON pointer (RFC 6901).
fn pointer(base: &str, segment: &str) -> String {
    format!("{}/{}", base, segment.replace('~', "~0").replace('/', "~1"))
}
