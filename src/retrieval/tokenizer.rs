// ============================================================
// Layer 5 — Term Tokenizer
// ============================================================
// One tokenization policy shared by the ranker: split on
// whitespace, optionally lowercase. No stemming and no
// punctuation stripping, so "4447?" and "4447" are different
// terms. Crawled text may already have lost punctuation and
// casing, and nothing here relies on either.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct TermTokenizer {
    lowercase: bool,
}

impl TermTokenizer {
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|t| if self.lowercase { t.to_lowercase() } else { t.to_string() })
            .collect()
    }
}

impl Default for TermTokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Lowercased whitespace terms as a set, for overlap checks.
pub fn term_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
