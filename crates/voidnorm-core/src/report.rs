//! Run report — what the walker did, in visit order

use std::path::PathBuf;

use serde::Serialize;

use crate::encoding::TextEncoding;

/// Result of processing one candidate file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// No match; the file was not written
    Unchanged { encoding: TextEncoding },
    /// Matches replaced and the file rewritten as UTF-8
    Rewritten {
        substitutions: usize,
        encoding: TextEncoding,
    },
    /// Matches found in a dry run; nothing written
    WouldRewrite {
        substitutions: usize,
        encoding: TextEncoding,
    },
}

impl FileOutcome {
    pub fn substitutions(&self) -> usize {
        match self {
            FileOutcome::Unchanged { .. } => 0,
            FileOutcome::Rewritten { substitutions, .. }
            | FileOutcome::WouldRewrite { substitutions, .. } => *substitutions,
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        match self {
            FileOutcome::Unchanged { encoding }
            | FileOutcome::Rewritten { encoding, .. }
            | FileOutcome::WouldRewrite { encoding, .. } => *encoding,
        }
    }
}

/// One reported event of a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WalkEntry {
    SkippedDir {
        path: PathBuf,
    },
    SkippedFile {
        path: PathBuf,
    },
    Processed {
        path: PathBuf,
        outcome: FileOutcome,
    },
    Failed {
        path: PathBuf,
        message: String,
    },
}

impl WalkEntry {
    pub fn path(&self) -> &std::path::Path {
        match self {
            WalkEntry::SkippedDir { path }
            | WalkEntry::SkippedFile { path }
            | WalkEntry::Processed { path, .. }
            | WalkEntry::Failed { path, .. } => path.as_path(),
        }
    }
}

/// Ordered record of a whole walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    pub root: PathBuf,
    pub entries: Vec<WalkEntry>,
}

impl WalkReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, entry: WalkEntry) {
        self.entries.push(entry);
    }

    /// Candidate files that were read and normalized
    pub fn files_scanned(&self) -> usize {
        self.processed().count()
    }

    /// Files rewritten, or that would be rewritten in a dry run
    pub fn files_changed(&self) -> usize {
        self.processed().filter(|o| o.substitutions() > 0).count()
    }

    /// Total substitutions across all files
    pub fn substitutions(&self) -> usize {
        self.processed().map(FileOutcome::substitutions).sum()
    }

    /// Entries that could not be read, decoded, written or traversed
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, WalkEntry::Failed { .. }))
            .count()
    }

    fn processed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.entries.iter().filter_map(|e| match e {
            WalkEntry::Processed { outcome, .. } => Some(outcome),
            _ => None,
        })
    }

    /// JSON rendering with totals alongside the entries
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "root": self.root,
            "files_scanned": self.files_scanned(),
            "files_changed": self.files_changed(),
            "substitutions": self.substitutions(),
            "failures": self.failures(),
            "entries": self.entries,
        })
    }
}
