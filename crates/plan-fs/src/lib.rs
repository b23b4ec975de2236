//! Filesystem layer for taskplan
//!
//! Provides normalized path handling, format-aware configuration document
//! loading (JSON with comments, YAML, TOML) and a session-scoped document
//! cache that loads each configuration path at most once.

pub mod cache;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod jsonc;
pub mod loader;
pub mod path;

pub use cache::DocumentCache;
pub use constants::ConfigFile;
pub use discovery::find_config_file;
pub use error::{Error, Result};
pub use loader::{DocumentFormat, DocumentLoader, FsDocumentLoader};
pub use path::NormalizedPath;
