//! Configuration data model and schema validation for taskplan.
//!
//! This crate holds the one canonical set of types describing a
//! configuration document (projects, tasks, reserved task keys) and the
//! structural validator that runs before any resolution work.

pub mod document;
pub mod error;
pub mod task;
pub mod validation;

pub use document::{ConfigDocument, ProjectDefinition};
pub use error::{Error, Result};
pub use task::{
    BUILD_TASK_NAME, ENV_OVERRIDES_KEY, HANDLER_KEY, OptionMap, PRIORITY_KEY, RESERVED_TASK_KEYS,
    SKIP_KEY, TaskCategory, TaskDefinition,
};
pub use validation::{SchemaValidator, StructuralValidator, ValidationIssue, value_kind};
