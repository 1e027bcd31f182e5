//! Centralized constants for the envfile crate.
//!
//! Default values used by the parser and loader, kept in one place to avoid
//! magic numbers in the algorithms.

// =============================================================================
// Loader Defaults
// =============================================================================

/// Default base directory that relative file paths are resolved against.
pub const DEFAULT_ROOT_PATH: &str = "./";

// =============================================================================
// Expansion Bounds
// =============================================================================

/// Maximum number of variable substitutions performed on a single
/// escape-delimited segment of a value.
///
/// Replacement text is re-scanned for references, so a replacement that
/// refers to itself (`A=x$A`) would otherwise never reach a fixed point.
pub const MAX_SUBSTITUTIONS: usize = 1024;
