//! Projects command: list projects, extends chains and tasks

use std::path::Path;

use colored::Colorize;
use plan_core::{ConfigResolver, ResolvedProject, resolve_project};
use plan_fs::DocumentCache;
use plan_meta::ConfigDocument;
use serde::Serialize;

use crate::context::locate_config;
use crate::error::Result;

/// One row of the project listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub root: Option<String>,
    pub chain: Vec<String>,
    pub tasks: Vec<String>,
}

impl From<ResolvedProject> for ProjectSummary {
    fn from(project: ResolvedProject) -> Self {
        Self {
            tasks: project.tasks.keys().cloned().collect(),
            name: project.name,
            root: project.root,
            chain: project.chain,
        }
    }
}

/// Summaries of every project in declaration order.
pub fn project_summaries(document: &ConfigDocument) -> Result<Vec<ProjectSummary>> {
    document
        .project_names()
        .map(|name| {
            resolve_project(&document.projects, name)
                .map(ProjectSummary::from)
                .map_err(Into::into)
        })
        .collect()
}

/// Run the projects command
pub fn run_projects(cwd: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let config_path = locate_config(cwd, config)?;
    let cache = DocumentCache::default();
    let raw = cache.get(&config_path)?;

    ConfigResolver::new().validate(&raw)?;
    let document = ConfigDocument::from_value(&raw)?;
    let summaries = project_summaries(&document)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("{}", "No projects defined.".yellow());
        return Ok(());
    }

    println!("{}", "Projects".bold());
    println!();
    for summary in &summaries {
        let extends = if summary.chain.len() > 1 {
            format!(" extends {}", summary.chain[..summary.chain.len() - 1].join(" <- "))
        } else {
            String::new()
        };
        println!(
            "  {}{} {}",
            summary.name.green(),
            extends.dimmed(),
            summary.root.as_deref().unwrap_or(".").dimmed()
        );
        if summary.tasks.is_empty() {
            println!("    {}", "(no tasks)".dimmed());
        } else {
            println!("    tasks: {}", summary.tasks.join(", "));
        }
    }

    Ok(())
}
