//! Line parser for env text.
//!
//! Responsibilities:
//! - Split text into lines and keep those matching the `KEY=value` grammar.
//! - Detect quoting, strip one layer of quotes, and expand `\n` in quoted values.
//! - Expand variable references against static replacements overlaid by the
//!   keys parsed so far.
//! - Consult the per-line hook before writing each key.
//!
//! Does NOT handle:
//! - Reading files or resolving paths (see `loader`).
//! - Reference resolution details (see `expand`).
//!
//! Invariants:
//! - Parsing is total: lines that do not match the grammar are skipped.
//! - A seed mapping is copied, never mutated.
//! - An empty right-hand side yields an empty string, never an absent key.
//! - Keys parsed earlier win over static replacements during expansion.

mod line;
mod overlay;


use crate::expand::{VarLookup, replace_vars};
use crate::types::{ConfigMap, HookAction};

use overlay::Overlay;

/// Per-line hook: receives each key and its final value.
pub type LineHook<'a> = Box<dyn FnMut(&str, &str) -> HookAction + 'a>;

/// Options for [`parse_config`].
#[derive(Default)]
pub struct ParseOptions<'a> {
    config: Option<&'a ConfigMap>,
    replacements: Option<&'a dyn VarLookup>,
    each: Option<LineHook<'a>>,
}

impl<'a> ParseOptions<'a> {
    /// Create empty options: no seed, no replacements, no hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the result with a copy of `config`.
    pub fn with_config(mut self, config: &'a ConfigMap) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve references that no parsed key provides from `replacements`.
    pub fn with_replacements(mut self, replacements: &'a dyn VarLookup) -> Self {
        self.replacements = Some(replacements);
        self
    }

    /// Call `each` with every parsed key and value before it is written.
    pub fn with_each(mut self, each: impl FnMut(&str, &str) -> HookAction + 'a) -> Self {
        self.each = Some(Box::new(each));
        self
    }
}

/// Parse env text into a config mapping.
///
/// # Example
///
/// ```
/// use envfile::{ParseOptions, parse_config};
///
/// let config = parse_config("HOST=localhost\nURL=\"http://${HOST}:8080\"", ParseOptions::new());
/// assert_eq!(config["URL"], "http://localhost:8080");
/// ```
pub fn parse_config(text: &str, options: ParseOptions<'_>) -> ConfigMap {
    let ParseOptions {
        config,
        replacements,
        mut each,
    } = options;
    let mut config = config.cloned().unwrap_or_default();

    match each.as_mut() {
        Some(hook) => parse_into(text, &mut config, replacements, &mut **hook),
        None => parse_into(text, &mut config, replacements, &mut continue_each),
    }
    config
}

/// Parse `text` line by line, writing accepted keys into `config`.
pub(crate) fn parse_into<F>(
    text: &str,
    config: &mut ConfigMap,
    replacements: Option<&dyn VarLookup>,
    each: &mut F,
) where
    F: FnMut(&str, &str) -> HookAction + ?Sized,
{
    for line in text.split('\n') {
        let Some((key, raw)) = line::match_line(line) else {
            continue;
        };

        let value = if raw.is_empty() {
            String::new()
        } else {
            let quoted = line::is_quoted(raw);
            let expanded = replace_vars(raw, &Overlay::new(config, replacements));
            if quoted {
                line::unquote(&expanded)
            } else {
                expanded
            }
        };

        let action = each(key, &value);
        if action.skips() {
            tracing::trace!(key, "Line hook skipped key");
        } else {
            tracing::trace!(key, "Parsed key");
            config.insert(key.to_string(), value);
        }
        if action.stops() {
            tracing::trace!(key, "Line hook stopped parsing");
            break;
        }
    }
}

pub(crate) fn continue_each(_key: &str, _value: &str) -> HookAction {
    HookAction::Continue
}
