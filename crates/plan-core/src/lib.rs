//! Configuration resolution engine for taskplan
//!
//! Turns a configuration document and a set of run-time [`Selectors`] into
//! an ordered list of [`ResolvedTaskConfig`]s:
//!
//! - [`merge`] - field-by-field option merging and environment overrides
//! - [`inherit`] - `extends` chains with cycle detection
//! - [`select`] - picking `build` and custom tasks from a project
//! - [`context`] - workspace and project paths for each task
//! - [`resolver`] - the pipeline tying these together
//!
//! The engine performs no console output; failures are returned as
//! [`ConfigError`] values for the caller to present.

pub mod context;
pub mod error;
pub mod inherit;
pub mod merge;
pub mod resolver;
pub mod select;
pub mod task;

pub use context::{WorkspaceContext, attach_context};
pub use error::{ConfigError, ConfigErrorKind, Result};
pub use inherit::{ResolvedProject, resolve_project};
pub use merge::{InvalidOverride, merge_options, resolve_effective_options};
pub use resolver::{ConfigResolver, ProjectSelection, ResolutionPlan, Selectors, SkippedTask};
pub use select::{SelectedTask, TaskSelection, select_tasks};
pub use task::{MergedTask, ResolvedTaskConfig, TaskKind};
