//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A lexically normalized path using forward slashes internally.
///
/// Backslashes are converted to `/`, repeated separators collapse,
/// `.` segments are dropped and `..` segments consume their parent.
/// An absolute path never climbs above its root. Normalization is
/// purely lexical: symlinks are not followed and nothing is read
/// from disk.
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
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Canonicalize an existing directory or file through the filesystem.
    ///
    /// Used for base directories supplied by the environment (current
    /// directory, config file location) so that resolution starts from a
    /// real absolute path. Uses `dunce` to avoid `\\?\` prefixes on Windows.
    pub fn canonical(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(canonical))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is anchored at a filesystem root.
    ///
    /// Recognizes `/...`, network paths (`//server/share`) and Windows
    /// drive paths (`C:/...`).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || drive_prefix(&self.inner).is_some()
    }

    /// Join this path with a segment and normalize the result.
    ///
    /// An absolute segment replaces the base, as with `Path::join`.
    pub fn join(&self, segment: &str) -> Self {
        let segment = NormalizedPath::new(segment);
        if segment.is_absolute() {
            return segment;
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment.inner)
        } else {
            format!("{}/{}", self.inner, segment.inner)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Anchor this path at `base` unless it is already absolute.
    ///
    /// Idempotent: an absolute normalized path is returned unchanged.
    pub fn absolutize(&self, base: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            base.join(&self.inner)
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: clean(&trimmed[..idx]),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
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

    /// Check if this appears to be a network path (`//server/share`).
    pub fn is_network_path(&self) -> bool {
        self.inner.starts_with("//")
    }
}

/// Returns the `X:` prefix of a Windows drive path, if any.
fn drive_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/')
    {
        Some(&s[..2])
    } else {
        None
    }
}

/// Lexically collapse separators, `.` and `..` in a forward-slash path.
fn clean(raw: &str) -> String {
    let (prefix, rest) = if let Some(drive) = drive_prefix(raw) {
        (format!("{drive}/"), &raw[2..])
    } else if raw.starts_with("//") && !raw.starts_with("///") {
        ("//".to_string(), &raw[2..])
    } else if raw.starts_with('/') {
        ("/".to_string(), raw)
    } else {
        (String::new(), raw)
    };
    let rooted = !prefix.is_empty();

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `..` at the root stays at the root
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if rooted {
        format!("{prefix}{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
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

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
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
