//! Tests for the env file loader.
//!
//! Responsibilities:
//! - Test multi-file layering, root path resolution, and missing files.
//! - Test file and line hook skip/stop behavior across files.
//! - Test read and decode error propagation.
//!
//! Invariants:
//! - Every test writes its files into its own `tempfile::TempDir`; no test
//!   touches the current directory or process environment.

use std::fs;
use std::path::Path;


/// Write `contents` to `name` inside `dir`, creating parent directories.
pub fn write_env(dir: &Path, name: &str, contents: impl AsRef<[u8]>) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(path, contents).expect("Failed to write fixture file");
}

/// Build a `ConfigMap` from string pairs.
pub fn map(pairs: &[(&str, &str)]) -> crate::types::ConfigMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
