//! The standard operating procedure every review is measured against.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Immutable SOP text plus a content fingerprint for versioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopDocument {
    text: String,
    fingerprint: String,
}

impl SopDocument {
    /// Wraps SOP text, computing its SHA-256 fingerprint.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let fingerprint = fingerprint_of(&text);
        Self { text, fingerprint }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercase hex SHA-256 of the text.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// First 12 hex digits, enough to tell SOP revisions apart in logs.
    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..12]
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn fingerprint_of(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}
