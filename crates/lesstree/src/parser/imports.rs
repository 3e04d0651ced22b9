//! Import loading.
//!
//! `@import` statements are resolved through an [`ImportLoader`], which maps
//! the path written in the stylesheet to a canonical path and its source.
//! The canonical path is what cycle detection compares.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TreeError;

/// Resolves `@import` targets to source text.
pub trait ImportLoader {
    /// Loads `path` as written in a file located at `from` (`None` for the
    /// root source). Returns the canonical path and the file contents.
    fn load(&mut self, path: &str, from: Option<&str>) -> Result<(String, String), TreeError>;
}

/// Rejects every import.
pub struct NoImports;

impl ImportLoader for NoImports {
    fn load(&mut self, path: &str, _from: Option<&str>) -> Result<(String, String), TreeError> {
        Err(TreeError::ImportUnavailable(path.to_string()))
    }
}

/// Reads imports from the filesystem, relative to the importing file.
///
/// A path without an extension gets `.less` appended, as LESS does.
/// Returned paths are canonical.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Creates a loader resolving root-level imports against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImportLoader for FsLoader {
    fn load(&mut self, path: &str, from: Option<&str>) -> Result<(String, String), TreeError> {
        let base = match from.and_then(|f| Path::new(f).parent()) {
            Some(dir) => dir.to_path_buf(),
            None => self.root.clone(),
        };
        let mut target = base.join(path);
        if target.extension().is_none() {
            target.set_extension("less");
        }
        let source = fs::read_to_string(&target)?;
        // `a/../a/b.less` and `a/b.less` must compare equal for cycle detection
        let canonical = fs::canonicalize(&target)?;
        Ok((canonical.to_string_lossy().into_owned(), source))
    }
}

/// Serves imports from an in-memory map of path → source.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, builder style.
    pub fn with_file(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.files.insert(path.into(), source.into());
        self
    }
}

impl ImportLoader for MemoryLoader {
    fn load(&mut self, path: &str, _from: Option<&str>) -> Result<(String, String), TreeError> {
        let candidates = [path.to_string(), format!("{}.less", path)];
        candidates
            .into_iter()
            .find_map(|candidate| {
                self.files
                    .get(&candidate)
                    .map(|source| (candidate.clone(), source.clone()))
            })
            .ok_or_else(|| TreeError::ImportUnavailable(path.to_string()))
    }
}
