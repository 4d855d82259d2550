// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Optional cleaning of crawled page text before it enters the
// document store. The crawler usually cleans already; this exists
// for raw dumps and for reproducing the crawler's strictest mode.
//
// Modes:
//   None   — text passes through untouched
//   Basic  — Unicode whitespace variants and control characters
//            become spaces, runs of whitespace collapse to one
//            space, edges are trimmed
//   Strict — Basic, then everything that is not an ASCII letter
//            or whitespace is removed (digits and punctuation too)
//
// Strict destroys course numbers, so course-code scoping cannot
// match documents cleaned this way. It is off by default.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

use serde::{Deserialize, Serialize};

/// How aggressively to clean page text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanMode {
    #[default]
    None,
    Basic,
    Strict,
}

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean `text` according to `mode`.
    pub fn clean_with(&self, text: &str, mode: CleanMode) -> String {
        match mode {
            CleanMode::None   => text.to_string(),
            CleanMode::Basic  => self.clean(text),
            CleanMode::Strict => self.clean_strict(text),
        }
    }

    /// Normalise whitespace and strip control characters.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Normalise individual characters ───────────────────────────
        let normalised: String = text
            .chars()
            .map(|c| match c {
                // Non-breaking, zero-width and BOM → regular space
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                // Any control character (tabs and newlines included) → space
                c if c.is_control() => ' ',
                c => c,
            })
            .collect();

        // ── Step 2: Collapse whitespace runs and trim ─────────────────────────
        // Pages are stored as single flat strings, so newlines are not kept.
        collapse_whitespace(&normalised)
    }

    /// Keep only ASCII letters and whitespace, then collapse whitespace.
    pub fn clean_strict(&self, text: &str) -> String {
        let letters: String = text
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();
        collapse_whitespace(&letters)
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
