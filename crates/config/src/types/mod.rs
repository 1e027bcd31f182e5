//! Shared types for parsing and loading env files.
//!
//! Responsibilities:
//! - Define the ordered `ConfigMap` produced by parsing.
//! - Define the `HookAction` decision returned by per-line and per-file hooks.
//! - Define file decoding options (`FileOptions`, `TextEncoding`).
//!
//! Does NOT handle:
//! - Parsing or expansion logic (see `parser` and `expand`).
//! - File I/O (see `loader`).

mod encoding;
mod hook;

pub use encoding::{FileOptions, TextEncoding};
pub use hook::{FileVisit, HookAction};

/// Flat, insertion-ordered mapping of configuration keys to string values.
pub type ConfigMap = indexmap::IndexMap<String, String>;
