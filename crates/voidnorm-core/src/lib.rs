//! voidnorm core - empty parameter list normalization for C/C++ trees
//!
//! Rewrites `(void)`, `( void )` and `( )` to `()` in every `.c`, `.cpp`
//! and `.h` file under a root directory, in place.
//!
//! # Architecture
//!
//! ```text
//! WalkConfig → walker ─┬─ skip directory / skip file
//!                      └─ read → decode (encoding chain) → normalizer → write if changed
//!                                                                        ↓
//!                                                                    WalkReport
//! ```
//!
//! # Guarantees
//!
//! - **Idempotent**: a second run over a normalized tree writes nothing
//! - **Write-only-on-change**: files without a match are never opened for writing
//! - **Contained failures**: one bad file never stops the walk

pub mod config;
pub mod encoding;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod walker;

pub use config::{SkipSet, WalkConfig, WriteMode, DEFAULT_SKIP_DIRS, SOURCE_EXTENSIONS};
pub use encoding::{TextEncoding, DEFAULT_ENCODINGS};
pub use error::{Error, Result};
pub use normalizer::{normalize, Substitution};
pub use report::{FileOutcome, WalkEntry, WalkReport};
pub use walker::{process_file, walk};
