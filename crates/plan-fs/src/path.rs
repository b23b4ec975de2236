//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Paths are cleaned lexically on construction: duplicate separators and
/// `.` components are dropped and `..` pops the previous component. A `..`
/// that would climb above the root of an absolute path is discarded; leading
/// `..` components of a relative path are kept. Nothing touches the
/// filesystem, so the result is stable for paths that do not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str),
        }
    }

    /// Canonicalize an existing path on disk, resolving symlinks.
    ///
    /// Uses `dunce` so Windows paths come back without the `\\?\` prefix.
    pub fn canonicalize(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dunce::canonicalize(path)
            .map(Self::new)
            .map_err(|e| Error::io(path, e))
    }

    /// Resolve `relative` against `base`.
    ///
    /// An absolute `relative` is returned as-is (normalized); otherwise it is
    /// joined onto `base` and cleaned.
    pub fn resolve(base: &NormalizedPath, relative: &str) -> Self {
        base.join(relative)
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is rooted (`/x`, `//server/share`, `C:/x`).
    pub fn is_absolute(&self) -> bool {
        let (prefix, _) = split_prefix(&self.inner);
        prefix.ends_with('/')
    }

    /// Join this path with a segment.
    ///
    /// Mirrors [`Path::join`]: an absolute segment replaces the whole path.
    pub fn join(&self, segment: &str) -> Self {
        let segment = Self::new(segment);
        if segment.is_absolute() {
            return segment;
        }
        if segment.inner == "." {
            return self.clone();
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment.inner)),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let (prefix, body) = split_prefix(&self.inner);
        if body.is_empty() || body == "." {
            return None;
        }
        match body.rfind('/') {
            Some(idx) => Some(Self {
                inner: format!("{}{}", prefix, &body[..idx]),
            }),
            None if prefix.is_empty() => Some(Self {
                inner: ".".to_string(),
            }),
            None => Some(Self {
                inner: prefix.to_string(),
            }),
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let (_, body) = split_prefix(&self.inner);
        match body.rsplit('/').next() {
            Some("") | Some(".") | Some("..") | None => None,
            Some(name) => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Split a slash-normalized path into its root prefix and the remainder.
///
/// Prefixes: `//` (network share), `/`, `C:/`, `C:` (drive-relative) or empty.
fn split_prefix(path: &str) -> (&str, &str) {
    if path.starts_with("//") && !path.starts_with("///") {
        return path.split_at(2);
    }
    if path.starts_with('/') {
        return path.split_at(1);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.get(2) == Some(&b'/') {
            return path.split_at(3);
        }
        return path.split_at(2);
    }
    ("", path)
}

fn clean(raw: &str) -> String {
    let slashed = raw.replace('\\', "/");
    let (prefix, rest) = split_prefix(&slashed);
    let rooted = prefix.ends_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (prefix.is_empty(), body.is_empty()) {
        (true, true) => ".".to_string(),
        _ => format!("{prefix}{body}"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for NormalizedPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
