//! Error types for env file loading.
//!
//! Responsibilities:
//! - Define error variants for failures reading or decoding env files.
//!
//! Does NOT handle:
//! - Parse errors: parsing is total and malformed lines are skipped.
//!
//! Invariants:
//! - Every variant carries the resolved path of the file involved.
//! - Errors NEVER include file contents, so values cannot leak into messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::TextEncoding;

/// Errors that can occur while loading env files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file exists but could not be read.
    #[error("Failed to read env file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid in the configured encoding.
    #[error("Failed to decode env file at {path} as {encoding}")]
    Decode {
        path: PathBuf,
        encoding: TextEncoding,
    },
}

impl LoadError {
    /// The resolved path of the file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Read { path, .. } | LoadError::Decode { path, .. } => path,
        }
    }
}
