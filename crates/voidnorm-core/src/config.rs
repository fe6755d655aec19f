//! Run configuration — skip sets, encoding chain and write mode
//!
//! A `WalkConfig` is built by the caller and passed to the walker; nothing
//! is read from process-wide state during a run.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crate::encoding::{TextEncoding, DEFAULT_ENCODINGS};
use crate::error::{Error, Result};

/// Directory names skipped when the caller does not override them
pub const DEFAULT_SKIP_DIRS: [&str; 3] = ["extern", "libs", "thirdparty"];

/// File name suffixes eligible for normalization (case-sensitive)
pub const SOURCE_EXTENSIONS: [&str; 3] = [".c", ".cpp", ".h"];

/// Returns true if `file_name` ends with one of `SOURCE_EXTENSIONS`
pub fn is_source_file(file_name: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Make `path` absolute against the current directory and resolve `.`/`..`
/// lexically. Symlinks are not followed.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(clean(&joined))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn path_key(absolute: &Path) -> String {
    clean(absolute).to_string_lossy().to_lowercase()
}

/// Exclusions by directory base name and by absolute file path
///
/// Both sets are compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipSet {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl SkipSet {
    /// Build a skip set. Relative file paths are resolved against the
    /// current directory.
    ///
    /// # Errors
    /// Returns `Environment` if the current directory cannot be determined.
    pub fn new<D, F>(dirs: D, files: F) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<Path>,
    {
        let dirs = dirs
            .into_iter()
            .map(|d| d.as_ref().to_lowercase())
            .collect();
        let files = files
            .into_iter()
            .map(|f| {
                let f = f.as_ref();
                absolute_path(f)
                    .map(|abs| path_key(&abs))
                    .map_err(|e| Error::environment(f, e.to_string()))
            })
            .collect::<Result<_>>()?;
        Ok(Self { dirs, files })
    }

    /// Skip set that excludes nothing
    pub fn empty() -> Self {
        Self {
            dirs: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }

    /// True if a directory with this base name must be pruned
    pub fn skips_dir(&self, name: &str) -> bool {
        self.dirs.contains(&name.to_lowercase())
    }

    /// True if the file at this absolute path must be left alone
    pub fn skips_file(&self, absolute: &Path) -> bool {
        !self.files.is_empty() && self.files.contains(&path_key(absolute))
    }
}

impl Default for SkipSet {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            files: BTreeSet::new(),
        }
    }
}

/// Whether matching files are rewritten or only reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Write,
    DryRun,
}

/// Everything one walk needs
#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub root: PathBuf,
    pub skip: SkipSet,
    pub encodings: Vec<TextEncoding>,
    pub mode: WriteMode,
}

impl WalkConfig {
    /// Walk `root` with the default skip set, encoding chain and write mode
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip: SkipSet::default(),
            encodings: DEFAULT_ENCODINGS.to_vec(),
            mode: WriteMode::Write,
        }
    }

    pub fn with_skip(mut self, skip: SkipSet) -> Self {
        self.skip = skip;
        self
    }

    /// Replace the decoding chain; an empty chain keeps the default
    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        if !encodings.is_empty() {
            self.encodings = encodings;
        }
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }
}
