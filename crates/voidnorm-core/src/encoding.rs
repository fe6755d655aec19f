//! Text decoding with an ordered fallback chain
//!
//! Files are decoded with the first encoding in the chain that accepts the
//! bytes. Rewritten files are always written back as UTF-8.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Supported source encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "latin1")]
    Latin1,
    #[serde(rename = "windows-1252")]
    Windows1252,
}

/// Decoding order used unless the caller configures another chain
pub const DEFAULT_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    /// Canonical label, as accepted by `FromStr`
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes`, returning `None` if they are not valid in this encoding
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Windows1252 => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "windows-1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            other => Err(format!(
                "unknown encoding '{}' (expected utf-8, latin1 or windows-1252)",
                other
            )),
        }
    }
}

/// Decode with the first encoding in `chain` that accepts `bytes`
pub fn decode_with_fallback(bytes: &[u8], chain: &[TextEncoding]) -> Option<(String, TextEncoding)> {
    chain.iter().find_map(|&encoding| match encoding.decode(bytes) {
        Some(text) => Some((text, encoding)),
        None => {
            log::debug!("input is not valid {}", encoding);
            None
        }
    })
}
