//! Configuration document types
//!
//! The document maps project names to project definitions:
//!
//! ```json
//! {
//!   "$schema": "./node_modules/taskplan/schema.json",
//!   "projects": {
//!     "base": { "tasks": { "build": { "outputPath": "dist" } } },
//!     "app": {
//!       "extends": "base",
//!       "root": "packages/app",
//!       "tasks": {
//!         "build": { "envOverrides": { "prod": { "minify": true } } },
//!         "lint": { "handler": "./tools/lint.js", "priority": 1 }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Maps keep declaration order, which later decides task ordering.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::task::{OptionMap, TaskDefinition};
use crate::{Error, Result};

/// A whole configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Editor schema hint, ignored by resolution
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project definitions keyed by project name
    #[serde(default)]
    pub projects: IndexMap<String, ProjectDefinition>,
}

impl ConfigDocument {
    /// Convert an untyped (already validated) document into typed form.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::InvalidDocument {
            message: e.to_string(),
        })
    }

    /// Project names in declaration order.
    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn project(&self, name: &str) -> Option<&ProjectDefinition> {
        self.projects.get(name)
    }
}

/// A single project as written in the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectDefinition {
    /// Name of another project in the same document to inherit from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Project directory, relative to the workspace root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Tasks keyed by task name; `build` is the built-in build task
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub tasks: IndexMap<String, TaskDefinition>,

    /// Any other project-level fields, carried through inheritance
    #[serde(flatten)]
    pub extra: OptionMap,
}

impl ProjectDefinition {
    pub fn task(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.get(name)
    }
}

/// `null` reads as the empty value, matching what the validator accepts.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
