//! Env file loader.
//!
//! Responsibilities:
//! - Resolve paths against a root directory and read files in order.
//! - Report each file to an optional per-file hook before reading it.
//! - Fold every loaded file through the line parser into one mapping.
//!
//! Does NOT handle:
//! - Line grammar or expansion (see `parser` and `expand`).
//! - Writing results to the process environment.
//!
//! Invariants / Assumptions:
//! - Options are passed per loader; there are no process-wide defaults.
//! - Read and decode failures propagate; parse problems never do.

mod builder;
mod error;
mod file;

#[cfg(test)]
mod tests;

pub use builder::{EnvLoader, FileHook, load_config};
pub use error::LoadError;
