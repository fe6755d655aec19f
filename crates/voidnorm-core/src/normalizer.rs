//! Empty parameter list normalizer
//!
//! Rewrites `(void)`, `( void )`, `(VOID)` and `( )` to the canonical `()`.
//! The rule is purely textual: matches inside comments, string literals and
//! macros are rewritten as well.
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize(&normalize(x).text).count == 0`
//! - **Canonical-form invariant**: a bare `()` is never matched or counted
//! - **Total**: every input, including the empty string, is valid

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Canonical empty parameter list
pub const CANONICAL: &str = "()";

// `(\s*void\s*)` or `(\s+)`; the second arm needs at least one space so
// the canonical form never matches. Whitespace also covers the ASCII
// separators U+001C..U+001F, and the `i` of `void` also matches the
// dotless `ı` under case folding.
const EMPTY_PARAMS_PATTERN: &str =
    r"(?i)\([\s\x1C-\x1F]*vo[iı]d[\s\x1C-\x1F]*\)|\([\s\x1C-\x1F]+\)";

fn empty_params() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMPTY_PARAMS_PATTERN).expect("pattern is valid"))
}

/// Outcome of one normalization pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub text: String,
    pub count: usize,
}

impl Substitution {
    /// Returns true if at least one parameter list was rewritten
    pub fn is_changed(&self) -> bool {
        self.count > 0
    }
}

/// Normalize every empty parameter list in `source` to `()`
///
/// Matches are non-overlapping and found leftmost-first. A count of zero
/// means the text is returned as-is and callers must not rewrite the file.
pub fn normalize(source: &str) -> Substitution {
    let mut text = String::with_capacity(source.len());
    let mut count = 0;
    let mut last = 0;

    for m in empty_params().find_iter(source) {
        text.push_str(&source[last..m.start()]);
        text.push_str(CANONICAL);
        last = m.end();
        count += 1;
    }
    text.push_str(&source[last..]);

    Substitution { text, count }
}
