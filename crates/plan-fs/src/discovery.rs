//! Configuration file discovery
//!
//! Walks up from a starting directory until a directory containing one of
//! the [`ConfigFile`] names is found, so commands work from anywhere inside
//! a workspace.

use std::path::Path;

use crate::{ConfigFile, Error, NormalizedPath, Result};

/// Find the nearest configuration file at or above `start`.
pub fn find_config_file(start: &Path) -> Result<NormalizedPath> {
    let mut current = Some(start);

    while let Some(dir) = current {
        for candidate in ConfigFile::ALL {
            let path = dir.join(candidate.as_str());
            if path.is_file() {
                tracing::debug!(path = %path.display(), "Found configuration file");
                return Ok(NormalizedPath::new(path));
            }
        }
        current = dir.parent();
    }

    Err(Error::ConfigNotFound {
        start: start.to_path_buf(),
        candidates: ConfigFile::ALL
            .iter()
            .map(ConfigFile::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
