//! Packaged resource resolution.
//!
//! Design documents travel alongside the client code, and depending on how
//! the application ships they end up in one of two places: a loose directory
//! tree (development checkout, exploded deployment) or entries inside a
//! packaged zip archive (release bundle). [`BundledResourceProvider`] hides
//! which of the two shapes is present behind the [`ResourceProvider`] trait.
//!
//! # Path convention
//!
//! Logical paths are relative to the provider's anchor, use `/` separators,
//! end with `/` when enumerating, and never start with one. Returned entry
//! names are bare (no path prefix).

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{CouchError, Result};

/// Platform line terminator re-inserted between lines by
/// [`ResourceProvider::read_file`].
#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";

/// Access to packaged artifacts, independent of backing storage.
pub trait ResourceProvider: Send + Sync {
    /// List the immediate child entry names under `path`. Not recursive.
    ///
    /// Names are deduplicated; a path that does not resolve to any known
    /// resource root yields an empty list, not an error.
    fn list_resources(&self, path: &str) -> Result<Vec<String>>;

    /// Read the full text content of the resource at `path`.
    ///
    /// Content is reconstructed line by line with [`LINE_SEP`] re-inserted
    /// after every line, so a file lacking a trailing newline gains one.
    /// Fails with [`CouchError::ResourceNotFound`] if the resource cannot
    /// be opened.
    fn read_file(&self, path: &str) -> Result<String>;
}

/// The resolved backing of a logical resource path.
enum ResourceRoot {
    /// Loose files under a directory.
    Directory(PathBuf),
    /// Entries inside a zip archive, addressed by name prefix.
    Archive { archive: PathBuf, prefix: String },
}

/// A [`ResourceProvider`] anchored at a root path.
///
/// If the anchor is a directory, logical paths resolve to loose files under
/// it. If the anchor is a file, it is opened as a zip archive and logical
/// paths address entries by name. Both modes produce identical results for
/// identical layouts.
pub struct BundledResourceProvider {
    anchor: PathBuf,
}

impl BundledResourceProvider {
    /// `anchor` is the resolution root: a directory, or a zip archive file.
    pub fn new(anchor: impl Into<PathBuf>) -> Self {
        Self {
            anchor: anchor.into(),
        }
    }

    fn resolve(&self, path: &str) -> Option<ResourceRoot> {
        if self.anchor.is_dir() {
            Some(ResourceRoot::Directory(self.anchor.join(path)))
        } else if self.anchor.is_file() {
            Some(ResourceRoot::Archive {
                archive: self.anchor.clone(),
                prefix: path.to_string(),
            })
        } else {
            None
        }
    }
}

impl ResourceProvider for BundledResourceProvider {
    fn list_resources(&self, path: &str) -> Result<Vec<String>> {
        match self.resolve(path) {
            Some(ResourceRoot::Directory(dir)) => {
                if !dir.is_dir() {
                    return Ok(Vec::new());
                }
                list_directory(&dir)
            }
            Some(ResourceRoot::Archive { archive, prefix }) => list_archive(&archive, &prefix),
            None => Ok(Vec::new()),
        }
    }

    fn read_file(&self, path: &str) -> Result<String> {
        match self.resolve(path) {
            Some(ResourceRoot::Directory(file)) => {
                let mut stream = match File::open(&file) {
                    Ok(stream) => stream,
                    Err(_) => return Err(CouchError::ResourceNotFound(path.to_string())),
                };
                let mut raw = String::new();
                stream
                    .read_to_string(&mut raw)
                    .map_err(|e| CouchError::Resource(format!("{}: {}", path, e)))?;
                Ok(rejoin_lines(&raw))
            }
            Some(ResourceRoot::Archive { archive, prefix }) => {
                let stream = File::open(&archive)
                    .map_err(|e| CouchError::Resource(format!("{}: {}", archive.display(), e)))?;
                let mut zip = zip::ZipArchive::new(stream)
                    .map_err(|e| CouchError::Resource(format!("{}: {}", archive.display(), e)))?;
                let mut entry = match zip.by_name(&prefix) {
                    Ok(entry) => entry,
                    Err(_) => return Err(CouchError::ResourceNotFound(path.to_string())),
                };
                let mut raw = String::new();
                entry
                    .read_to_string(&mut raw)
                    .map_err(|e| CouchError::Resource(format!("{}: {}", path, e)))?;
                Ok(rejoin_lines(&raw))
            }
            None => Err(CouchError::ResourceNotFound(path.to_string())),
        }
    }
}

/// One OS directory listing, sorted for determinism.
fn list_directory(dir: &Path) -> Result<Vec<String>> {
    let mut names = BTreeSet::new();
    let entries =
        std::fs::read_dir(dir).map_err(|e| CouchError::Resource(format!("{}: {}", dir.display(), e)))?;
    for entry in entries {
        let entry = entry.map_err(|e| CouchError::Resource(e.to_string()))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names.into_iter().collect())
}

/// Brute-force scan over every entry in the archive, filtered by prefix.
///
/// Nested entries collapse to their first path segment, so
/// `docs/sub/c.js` contributes `sub` when listing `docs/`. The archive
/// handle lives only for the duration of the call.
fn list_archive(archive: &Path, prefix: &str) -> Result<Vec<String>> {
    let stream = File::open(archive)
        .map_err(|e| CouchError::Resource(format!("{}: {}", archive.display(), e)))?;
    let zip = zip::ZipArchive::new(stream)
        .map_err(|e| CouchError::Resource(format!("{}: {}", archive.display(), e)))?;

    let mut names = BTreeSet::new();
    for name in zip.file_names() {
        let rest = match name.strip_prefix(prefix) {
            Some(rest) => rest,
            None => continue,
        };
        let entry = match rest.find('/') {
            Some(idx) => &rest[..idx],
            None => rest,
        };
        if !entry.is_empty() {
            names.insert(entry.to_string());
        }
    }
    Ok(names.into_iter().collect())
}

/// Rebuild text with [`LINE_SEP`] after every line.
///
/// Appends a trailing terminator even when the source had none; callers
/// depend on that exact behavior.
fn rejoin_lines(raw: &str) -> String {
    let mut content = String::with_capacity(raw.len() + LINE_SEP.len());
    for line in raw.lines() {
        content.push_str(line);
        content.push_str(LINE_SEP);
    }
    content
}
