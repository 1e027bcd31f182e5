//! Dotenv-style configuration parsing with variable interpolation.
//!
//! This crate reads `KEY=value` text, strips quoting, expands `$NAME` and
//! `${NAME}` references against earlier keys and static replacements, and
//! produces a flat, ordered mapping of keys to string values. Files can be
//! layered so later files see and override keys from earlier ones.

pub mod constants;
mod expand;
mod loader;
mod parser;
pub mod types;

pub use expand::{VarLookup, replace_vars};
pub use loader::{EnvLoader, FileHook, LoadError, load_config};
pub use parser::{LineHook, ParseOptions, parse_config};
pub use types::{ConfigMap, FileOptions, FileVisit, HookAction, TextEncoding};
