//! Path resolution and file reading for the loader.
//!
//! Responsibilities:
//! - Resolve caller-supplied paths against the loader's root path.
//! - Read and decode file contents.
//!
//! Does NOT handle:
//! - Parsing (see `parser`).
//! - Hook dispatch or iteration order (see `builder.rs`).

use std::fs;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use super::error::LoadError;
use crate::types::TextEncoding;

/// Join `path` onto `root` and normalize `.` and `..` lexically.
///
/// Paths are always concatenated onto the root: an absolute `path` has its
/// root stripped rather than replacing `root`.
pub(crate) fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative).clean()
}

/// Read the file at `path` and decode it with `encoding`.
pub(crate) fn read_text(path: &Path, encoding: TextEncoding) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    encoding.decode(bytes).ok_or_else(|| LoadError::Decode {
        path: path.to_path_buf(),
        encoding,
    })
}
