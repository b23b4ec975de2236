//! Format-aware configuration document loading
//!
//! Documents are returned as untyped [`serde_json::Value`] trees; typing
//! happens after schema validation, further up the stack.

use std::fmt;
use std::fs;

use serde_json::Value;

use crate::jsonc::strip_jsonc;
use crate::{Error, NormalizedPath, Result};

/// Source format of a configuration document, detected from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` / `.jsonc`, comments and trailing commas allowed
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl DocumentFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "json" | "jsonc" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_native(),
                extension: extension.to_string(),
            }),
        }
    }

    /// Parse document text in this format.
    pub fn parse(&self, path: &NormalizedPath, content: &str) -> Result<Value> {
        let parsed: std::result::Result<Value, String> = match self {
            Self::Json => serde_json::from_str(&strip_jsonc(content)).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: self.to_string(),
            message,
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
            Self::Toml => write!(f, "TOML"),
        }
    }
}

/// Reads and parses a configuration document.
pub trait DocumentLoader {
    /// Load the document at `path` as an untyped tree.
    fn load(&self, path: &NormalizedPath) -> Result<Value>;
}

/// Loads documents from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentLoader;

impl FsDocumentLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for FsDocumentLoader {
    fn load(&self, path: &NormalizedPath) -> Result<Value> {
        let format = DocumentFormat::from_path(path)?;
        let native = path.to_native();
        let content = fs::read_to_string(&native).map_err(|e| Error::io(&native, e))?;
        tracing::trace!(%path, %format, bytes = content.len(), "Parsing configuration document");
        format.parse(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_case_insensitively() {
        let detect = |p: &str| DocumentFormat::from_path(&NormalizedPath::new(p)).unwrap();
        assert_eq!(detect("a/taskplan.JSON"), DocumentFormat::Json);
        assert_eq!(detect("taskplan.jsonc"), DocumentFormat::Json);
        assert_eq!(detect("taskplan.yml"), DocumentFormat::Yaml);
        assert_eq!(detect("taskplan.toml"), DocumentFormat::Toml);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = DocumentFormat::from_path(&NormalizedPath::new("taskplan.ini")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension, .. } if extension == "ini"));
    }

    #[test]
    fn parse_error_names_format() {
        let path = NormalizedPath::new("taskplan.json");
        let err = DocumentFormat::Json.parse(&path, "{ nope").unwrap_err();
        assert!(err.to_string().contains("JSON"), "got: {err}");
    }
}
