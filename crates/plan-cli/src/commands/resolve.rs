//! Resolve command: print the ordered task plan

use std::path::Path;

use colored::Colorize;
use plan_core::{ConfigResolver, ProjectSelection, ResolutionPlan, Selectors};
use plan_fs::DocumentCache;

use crate::cli::ResolveArgs;
use crate::context::{locate_config, workspace_root};
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(cwd: &Path, config: Option<&Path>, args: &ResolveArgs) -> Result<()> {
    let config_path = locate_config(cwd, config)?;
    let root = workspace_root(cwd, args.workspace_root.as_deref(), &config_path);

    let mut selectors = Selectors::new(root)
        .projects(ProjectSelection::from_names(args.projects.iter().cloned()))
        .task(args.task.as_str());
    if let Some(env) = args.env.as_deref().filter(|e| !e.trim().is_empty()) {
        selectors = selectors.env(env);
    }

    let cache = DocumentCache::default();
    let plan = ConfigResolver::new().resolve_file(&cache, &config_path, &selectors)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let env_label = selectors
        .env
        .as_deref()
        .map(|env| format!(" (env: {})", env.cyan()))
        .unwrap_or_default();
    println!(
        "{} {}{}",
        "Plan for".bold(),
        config_path.as_str().dimmed(),
        env_label
    );
    println!();

    for line in plan_lines(&plan) {
        println!("{line}");
    }

    Ok(())
}

/// Human-readable plan, one task per line, followed by the skipped tasks.
pub fn plan_lines(plan: &ResolutionPlan) -> Vec<String> {
    let mut lines = Vec::new();

    if plan.tasks.is_empty() {
        lines.push(format!("  {}", "No tasks to run.".yellow()));
    }

    for (index, task) in plan.tasks.iter().enumerate() {
        let label = format!("{}:{}", task.project_name, task.task_name);
        let handler = task
            .handler()
            .map(|h| format!(" -> {}", h))
            .unwrap_or_default();
        lines.push(format!(
            "  {:>2}. {:<24} {:<6} priority {:<3} {}{}",
            index + 1,
            label.green(),
            task.category(),
            task.priority,
            task.project_root.as_str().dimmed(),
            handler
        ));
    }

    if !plan.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", "Skipped:".dimmed()));
        for skipped in &plan.skipped {
            lines.push(format!(
                "  {}:{} ({})",
                skipped.project_name, skipped.task_name, skipped.category
            ));
        }
    }

    lines
}
