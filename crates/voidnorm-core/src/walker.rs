//! Tree walker and in-place file rewriter
//!
//! Visits every directory under the root, prunes skipped directories before
//! touching any of their files, and normalizes each eligible source file.
//! A file is written back only when at least one substitution was made.
//!
//! # Failure containment
//!
//! Per-file problems (unreadable, undecodable, unwritable) and unreadable
//! subdirectories are recorded in the report and the walk moves on. Only a
//! missing or unreadable root aborts the run.

use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::config::{absolute_path, is_source_file, WalkConfig, WriteMode};
use crate::encoding::{decode_with_fallback, TextEncoding};
use crate::error::{Error, Result};
use crate::normalizer::normalize;
use crate::report::{FileOutcome, WalkEntry, WalkReport};

// ── Public API ─────────────────────────────────────────────

/// Walk `config.root` and normalize every eligible file
///
/// # Errors
/// Returns `Environment` if the root does not exist, is not a directory or
/// cannot be listed. Everything else is recorded in the returned report.
pub fn walk(config: &WalkConfig) -> Result<WalkReport> {
    let root = absolute_path(&config.root)
        .map_err(|e| Error::environment(&config.root, e.to_string()))?;
    let metadata = fs::metadata(&root).map_err(|e| Error::environment(&root, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(Error::environment(&root, "not a directory"));
    }

    let mut report = WalkReport::new(&root);
    let mut entries = WalkDir::new(&root).sort_by_file_name().into_iter();

    while let Some(next) = entries.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(Error::environment(&root, err.to_string()));
            }
            Err(err) => {
                let path = err.path().unwrap_or(root.as_path()).to_path_buf();
                let failure = Error::Walk {
                    path: path.clone(),
                    message: err.to_string(),
                };
                log::warn!("{}", failure);
                report.push(WalkEntry::Failed {
                    path,
                    message: failure.to_string(),
                });
                continue;
            }
        };

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if config.skip.skips_dir(&name) {
                log::debug!("skipping directory {}", entry.path().display());
                report.push(WalkEntry::SkippedDir {
                    path: entry.path().to_path_buf(),
                });
                entries.skip_current_dir();
            }
            continue;
        }

        if !is_candidate(&entry) {
            continue;
        }

        let path = entry.path();
        if config.skip.skips_file(path) {
            log::debug!("skipping file {}", path.display());
            report.push(WalkEntry::SkippedFile {
                path: path.to_path_buf(),
            });
            continue;
        }

        match process_file(path, &config.encodings, config.mode) {
            Ok(outcome) => report.push(WalkEntry::Processed {
                path: path.to_path_buf(),
                outcome,
            }),
            Err(err) => {
                log::warn!("{}", err);
                report.push(WalkEntry::Failed {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }

    log::info!(
        "{} files scanned, {} changed, {} substitutions under {}",
        report.files_scanned(),
        report.files_changed(),
        report.substitutions(),
        root.display()
    );
    Ok(report)
}

/// Normalize a single file in place, bypassing traversal and skip sets
///
/// # Errors
/// Returns `Io` if the file cannot be read or written, `Decode` if no
/// encoding in `encodings` accepts its bytes.
pub fn process_file(path: &Path, encodings: &[TextEncoding], mode: WriteMode) -> Result<FileOutcome> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let (text, encoding) = decode_with_fallback(&bytes, encodings).ok_or_else(|| Error::Decode {
        path: path.to_path_buf(),
    })?;

    let result = normalize(&text);
    if !result.is_changed() {
        return Ok(FileOutcome::Unchanged { encoding });
    }

    match mode {
        WriteMode::Write => {
            fs::write(path, result.text.as_bytes()).map_err(|e| Error::io(path, e))?;
            log::info!(
                "simplified {} empty parameter list(s) in {} (read as {})",
                result.count,
                path.display(),
                encoding
            );
            Ok(FileOutcome::Rewritten {
                substitutions: result.count,
                encoding,
            })
        }
        WriteMode::DryRun => Ok(FileOutcome::WouldRewrite {
            substitutions: result.count,
            encoding,
        }),
    }
}

// Symlinked files are processed through their target; symlinked
// directories are never descended into.
fn is_candidate(entry: &DirEntry) -> bool {
    let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
    is_file && is_source_file(&entry.file_name().to_string_lossy())
}
