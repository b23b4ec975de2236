//! Validate command: structural checks on the configuration file

use std::path::Path;

use colored::Colorize;
use plan_core::{ConfigError, ConfigResolver};
use plan_fs::DocumentCache;
use serde_json::json;

use crate::context::locate_config;
use crate::error::{CliError, Result};

/// Run the validate command
///
/// Prints every issue and fails when the document is invalid.
pub fn run_validate(cwd: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let config_path = locate_config(cwd, config)?;
    let cache = DocumentCache::default();
    let document = cache.get(&config_path)?;

    let issues = match ConfigResolver::new().validate(&document) {
        Ok(()) => Vec::new(),
        Err(ConfigError::SchemaInvalid { issues }) => issues,
        Err(other) => return Err(other.into()),
    };

    if json {
        let report = json!({
            "config": config_path,
            "valid": issues.is_empty(),
            "issues": issues,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if issues.is_empty() {
        println!("{} {} is valid", "OK".green().bold(), config_path);
    } else {
        println!("{} {}", "Invalid:".red().bold(), config_path);
        for issue in &issues {
            println!("  {} {}", issue.path.yellow(), issue.message);
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} validation issue(s) in {}",
            issues.len(),
            config_path
        )))
    }
}
