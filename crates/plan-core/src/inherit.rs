//! Project inheritance through `extends`
//!
//! A project may name one other project of the same document as its parent.
//! The chain is walked from the requested project up to the first project
//! without `extends`, then folded from that root back down so that each
//! descendant's fields win over its ancestors'.

use std::collections::HashSet;

use indexmap::IndexMap;
use plan_fs::NormalizedPath;
use plan_meta::{OptionMap, ProjectDefinition, TaskDefinition};

use crate::merge::{merge_options, merge_task_definitions};
use crate::{ConfigError, Result};

/// A project with its whole `extends` chain merged in.
///
/// Carries no `extends`: the chain it was built from is kept in [`chain`]
/// for diagnostics only.
///
/// [`chain`]: ResolvedProject::chain
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedProject {
    pub name: String,

    /// Project directory relative to the workspace root, if any link set one
    pub root: Option<String>,

    /// Tasks in inherited order: ancestor tasks first, then new ones
    pub tasks: IndexMap<String, TaskDefinition>,

    /// Merged project-level fields other than `extends`, `root` and `tasks`
    pub extra: OptionMap,

    /// Project names from the root ancestor down to this project
    pub chain: Vec<String>,
}

impl ResolvedProject {
    /// Absolute project directory for `workspace_root`.
    pub fn project_root(&self, workspace_root: &NormalizedPath) -> NormalizedPath {
        NormalizedPath::resolve(workspace_root, self.root.as_deref().unwrap_or("."))
    }

    fn apply(&mut self, definition: &ProjectDefinition) {
        if let Some(root) = &definition.root {
            self.root = Some(root.clone());
        }

        self.extra = merge_options(&self.extra, &definition.extra);

        for (name, task) in &definition.tasks {
            let merged = match self.tasks.get(name) {
                Some(inherited) => merge_task_definitions(inherited, task),
                None => task.clone(),
            };
            self.tasks.insert(name.clone(), merged);
        }
    }
}

/// Resolve `start` against every project of the document.
///
/// Fails with [`ConfigError::ProjectNotFound`] when `start` or an ancestor
/// is missing, and with [`ConfigError::CircularExtends`] when the chain
/// revisits a project. The reported cycle starts and ends at the first
/// repeated project, e.g. `b -> c -> b` for `a -> b -> c -> b`.
pub fn resolve_project(
    projects: &IndexMap<String, ProjectDefinition>,
    start: &str,
) -> Result<ResolvedProject> {
    let chain = collect_chain(projects, start)?;
    tracing::debug!(project = start, depth = chain.len(), "Resolved extends chain");

    let mut resolved = ResolvedProject {
        name: start.to_string(),
        ..Default::default()
    };
    for (name, definition) in chain.iter().rev() {
        resolved.apply(definition);
        resolved.chain.push((*name).to_string());
    }

    Ok(resolved)
}

/// Walk `extends` from `start`, leaf first.
fn collect_chain<'a>(
    projects: &'a IndexMap<String, ProjectDefinition>,
    start: &'a str,
) -> Result<Vec<(&'a str, &'a ProjectDefinition)>> {
    let mut chain: Vec<(&str, &ProjectDefinition)> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = start;
    let mut extended_by: Option<&str> = None;

    loop {
        if !visited.insert(current) {
            let first = chain
                .iter()
                .position(|(name, _)| *name == current)
                .unwrap_or_default();
            let mut cycle: Vec<String> = chain[first..]
                .iter()
                .map(|(name, _)| (*name).to_string())
                .collect();
            cycle.push(current.to_string());
            return Err(ConfigError::CircularExtends { cycle });
        }

        let definition = projects
            .get(current)
            .ok_or_else(|| ConfigError::project_not_found(current, extended_by))?;
        chain.push((current, definition));

        match definition.extends.as_deref().map(str::trim) {
            Some(parent) if !parent.is_empty() => {
                extended_by = Some(current);
                current = parent;
            }
            _ => break,
        }
    }

    Ok(chain)
}
