//! Configuration file and workspace root detection
//!
//! Like git, commands work from any directory below the workspace: without
//! `--config` the nearest `taskplan.*` file up the tree is used.

use std::path::Path;

use plan_fs::{NormalizedPath, find_config_file};

use crate::error::Result;

/// Locate the configuration file for a command run in `cwd`.
///
/// An explicit path is taken relative to `cwd` and must exist.
pub fn locate_config(cwd: &Path, explicit: Option<&Path>) -> Result<NormalizedPath> {
    let path = match explicit {
        Some(path) => NormalizedPath::canonicalize(cwd.join(path))?,
        None => find_config_file(cwd)?,
    };
    tracing::debug!(config = %path, "Using configuration file");
    Ok(path)
}

/// Workspace root for a run: the explicit directory relative to `cwd`, or
/// the directory holding the configuration file.
pub fn workspace_root(cwd: &Path, explicit: Option<&Path>, config_path: &NormalizedPath) -> NormalizedPath {
    match explicit {
        Some(dir) => NormalizedPath::new(cwd).join(&dir.to_string_lossy()),
        None => config_path
            .parent()
            .unwrap_or_else(|| NormalizedPath::new(cwd)),
    }
}
