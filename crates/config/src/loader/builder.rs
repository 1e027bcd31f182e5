//! Env file loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `EnvLoader` holding the seed mapping, static
//!   replacements, file options, root path, and hooks.
//! - Fold files, in the order given, through the line parser into one mapping.
//!
//! Does NOT handle:
//! - Line grammar, quoting, or expansion (see `parser` and `expand`).
//! - Path normalization and decoding details (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Missing files are reported to the file hook and otherwise ignored.
//! - Later files see, and may overwrite, keys from earlier files.
//! - A stop from the file hook ends iteration after the current file; a stop
//!   from the line hook only ends the current file.
//! - A file that exists but cannot be read or decoded aborts the load.

use std::path::{Path, PathBuf};

use super::error::LoadError;
use super::file::{read_text, resolve_path};
use crate::constants::DEFAULT_ROOT_PATH;
use crate::parser::{LineHook, continue_each, parse_into};
use crate::types::{ConfigMap, FileOptions, FileVisit, HookAction, TextEncoding};

/// Per-file hook: receives each file before it is read.
pub type FileHook<'a> = Box<dyn FnMut(&FileVisit<'_>) -> HookAction + 'a>;

/// Loader that builds a config mapping from one or more env files.
pub struct EnvLoader<'a> {
    root_path: PathBuf,
    config: ConfigMap,
    replacements: ConfigMap,
    file_options: FileOptions,
    each: Option<LineHook<'a>>,
    each_file: Option<FileHook<'a>>,
}

impl Default for EnvLoader<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> EnvLoader<'a> {
    /// Create a loader rooted at the current directory with UTF-8 decoding.
    pub fn new() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_ROOT_PATH),
            config: ConfigMap::new(),
            replacements: ConfigMap::new(),
            file_options: FileOptions::default(),
            each: None,
            each_file: None,
        }
    }

    /// Resolve file paths relative to `root`.
    pub fn with_root_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = root.into();
        self
    }

    /// Start from `config` instead of an empty mapping.
    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self
    }

    /// Static values for references that no parsed key provides.
    pub fn with_replacements(mut self, replacements: ConfigMap) -> Self {
        self.replacements = replacements;
        self
    }

    /// Set the file decoding options.
    pub fn with_file_options(mut self, options: FileOptions) -> Self {
        self.file_options = options;
        self
    }

    /// Decode files with `encoding`.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.file_options.encoding = encoding;
        self
    }

    /// Call `each` with every parsed key and value before it is written.
    pub fn with_each(mut self, each: impl FnMut(&str, &str) -> HookAction + 'a) -> Self {
        self.each = Some(Box::new(each));
        self
    }

    /// Call `each_file` with every file before it is read.
    pub fn with_each_file(
        mut self,
        each_file: impl FnMut(&FileVisit<'_>) -> HookAction + 'a,
    ) -> Self {
        self.each_file = Some(Box::new(each_file));
        self
    }

    /// Root path that file paths are resolved against.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Current file decoding options.
    pub fn file_options(&self) -> FileOptions {
        self.file_options
    }

    /// Load `paths` in order and return the accumulated mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but:
    /// - cannot be read (`LoadError::Read`)
    /// - is not valid in the configured encoding (`LoadError::Decode`)
    ///
    /// Missing files are silently ignored.
    pub fn load<I>(mut self, paths: I) -> Result<ConfigMap, LoadError>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut config = std::mem::take(&mut self.config);

        for path in paths {
            let path = path.as_ref();
            let full_path = resolve_path(&self.root_path, path);
            let exists = full_path.exists();

            let visit = FileVisit {
                exists,
                path,
                full_path: &full_path,
            };
            let action = match self.each_file.as_mut() {
                Some(hook) => hook(&visit),
                None => HookAction::Continue,
            };

            if exists && !action.skips() {
                let text = read_text(&full_path, self.file_options.encoding)?;
                self.parse_text(&text, &mut config);
                tracing::debug!(
                    path = %full_path.display(),
                    keys = config.len(),
                    "Loaded env file"
                );
            } else {
                tracing::debug!(
                    path = %full_path.display(),
                    exists,
                    skipped = action.skips(),
                    "Env file not loaded"
                );
            }

            if action.stops() {
                tracing::debug!(path = %full_path.display(), "File hook stopped loading");
                break;
            }
        }

        Ok(config)
    }

    /// Parse in-memory `text` with this loader's seed, replacements, and line
    /// hook.
    pub fn parse(mut self, text: &str) -> ConfigMap {
        let mut config = std::mem::take(&mut self.config);
        self.parse_text(text, &mut config);
        config
    }

    fn parse_text(&mut self, text: &str, config: &mut ConfigMap) {
        match self.each.as_mut() {
            Some(hook) => parse_into(text, config, Some(&self.replacements), &mut **hook),
            None => parse_into(text, config, Some(&self.replacements), &mut continue_each),
        }
    }
}

/// Load `paths` relative to the current directory with default options.
///
/// `paths` is any iterable of paths. A single path is passed as a one-element
/// array (`[".env"]`) or as `Some(path)`; a bare `&str` is not accepted.
///
/// # Example
///
/// ```no_run
/// let config = envfile::load_config([".env", ".env.local"])?;
/// println!("{:?}", config.get("DATABASE_URL"));
/// # Ok::<(), envfile::LoadError>(())
/// ```
pub fn load_config<I>(paths: I) -> Result<ConfigMap, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    EnvLoader::new().load(paths)
}
