//! Well-known configuration file names.

use std::path::Path;

/// Configuration file names recognised by discovery, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFile {
    /// `taskplan.json` (comments allowed)
    Json,
    /// `taskplan.jsonc`
    Jsonc,
    /// `taskplan.yaml`
    Yaml,
}

impl ConfigFile {
    /// All candidates, in the order discovery tries them.
    pub const ALL: [ConfigFile; 3] = [ConfigFile::Json, ConfigFile::Jsonc, ConfigFile::Yaml];

    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "taskplan.json",
            Self::Jsonc => "taskplan.jsonc",
            Self::Yaml => "taskplan.yaml",
        }
    }
}

impl AsRef<Path> for ConfigFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ConfigFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
