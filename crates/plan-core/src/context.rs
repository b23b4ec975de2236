//! Run-time context attached to each resolved task

use plan_fs::NormalizedPath;

use crate::inherit::ResolvedProject;
use crate::task::{MergedTask, ResolvedTaskConfig};

/// Where a resolution runs: the workspace, the source file and the
/// selected environment.
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceContext<'a> {
    pub workspace_root: &'a NormalizedPath,
    pub config_path: Option<&'a NormalizedPath>,
    pub environment: Option<&'a str>,
}

/// Attach workspace and project paths to a merged task.
///
/// The project root is the project's `root` resolved against the workspace
/// root, or the workspace root itself when unset. Option values are not
/// inspected.
pub fn attach_context(
    task: MergedTask,
    project: &ResolvedProject,
    context: &WorkspaceContext<'_>,
) -> ResolvedTaskConfig {
    ResolvedTaskConfig {
        project_name: project.name.clone(),
        task_name: task.name,
        kind: task.kind,
        priority: task.priority,
        skip: task.skip,
        environment: context.environment.map(str::to_string),
        workspace_root: context.workspace_root.clone(),
        project_root: project.project_root(context.workspace_root),
        config_path: context.config_path.cloned(),
    }
}
