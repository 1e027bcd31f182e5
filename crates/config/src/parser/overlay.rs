//! Replacement lookup layered over the mapping being built.

use crate::expand::VarLookup;
use crate::types::ConfigMap;

/// Resolves names from the in-progress config first, then from static
/// replacements.
pub(crate) struct Overlay<'a> {
    config: &'a ConfigMap,
    fallback: Option<&'a dyn VarLookup>,
}

impl<'a> Overlay<'a> {
    pub(crate) fn new(config: &'a ConfigMap, fallback: Option<&'a dyn VarLookup>) -> Self {
        Self { config, fallback }
    }
}

impl VarLookup for Overlay<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.config
            .get(name)
            .map(String::as_str)
            .or_else(|| self.fallback.and_then(|fallback| fallback.lookup(name)))
    }
}
