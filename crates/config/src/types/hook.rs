//! Hook decision types.

use std::path::Path;

/// Decision returned by a per-line or per-file hook.
///
/// Skipping suppresses the current entry (a key write for line hooks, the
/// file read for file hooks). Stopping ends iteration after the current entry
/// has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookAction {
    /// Handle the entry normally and keep going.
    #[default]
    Continue,
    /// Drop the entry and keep going.
    Skip,
    /// Handle the entry normally, then stop.
    Stop,
    /// Drop the entry, then stop.
    SkipAndStop,
}

impl HookAction {
    /// Whether the current entry should be dropped.
    pub fn skips(self) -> bool {
        matches!(self, HookAction::Skip | HookAction::SkipAndStop)
    }

    /// Whether iteration should end after the current entry.
    pub fn stops(self) -> bool {
        matches!(self, HookAction::Stop | HookAction::SkipAndStop)
    }
}

/// A file about to be loaded, as reported to a per-file hook.
#[derive(Debug, Clone, Copy)]
pub struct FileVisit<'a> {
    /// Whether the resolved file exists.
    pub exists: bool,
    /// The path as supplied by the caller.
    pub path: &'a Path,
    /// The path resolved against the loader's root path.
    pub full_path: &'a Path,
}
