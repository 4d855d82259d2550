// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// Represents a single crawled web page.
// This is a plain data struct with no behaviour beyond
// case-insensitive containment checks used for scoping.
//
// Documents are immutable once loaded. Duplicates are allowed;
// they simply count twice when ranking.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One crawled page: the page heading and its extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The page heading (or `<title>` when the page has no `<h1>`)
    pub title: String,

    /// The extracted body text that passages are ranked over
    pub content: String,
}

impl Document {
    /// Create a new Document from a title and content.
    ///
    /// Example:
    ///   let doc = Document::new("Computer Science 4447", "Prerequisite is ...");
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title:   title.into(),
            content: content.into(),
        }
    }

    /// True when `needle_lower` (already lowercased) occurs in the
    /// title or the content, ignoring case.
    pub fn mentions(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_checks_title_and_content() {
        let doc = Document::new("Computer Science 4447", "Prerequisite is Computer Science 2212");
        assert!(doc.mentions("computer science 4447"));
        assert!(doc.mentions("computer science 2212"));
        assert!(!doc.mentions("computer science 1025"));
    }

    #[test]
    fn test_mentions_ignores_case_of_document() {
        let doc = Document::new("", "COMPUTER SCIENCE 1025 is an introduction");
        assert!(doc.mentions("computer science 1025"));
    }
}
