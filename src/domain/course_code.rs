// ============================================================
// Layer 3 — Course Code
// ============================================================
// A course code scopes retrieval to pages about one course.
// Shape: "<Subject> <4 digits><optional letter><optional /letter>"
//   e.g. "Computer Science 4447", "Computer Science 1026A/B"
//
// Extraction never fails: most questions carry no code, and
// that is a normal outcome which sends the orchestrator to a
// whole-corpus search.

use std::fmt;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// A course identifier found in a question, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCode(String);

impl CourseCode {
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for case-insensitive document matching
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finds the first course code for a configured subject name.
pub struct CourseCodeExtractor {
    pattern: Regex,
}

impl CourseCodeExtractor {
    /// Build an extractor for `subject`, e.g. "Computer Science".
    /// The subject is matched literally; only the number part is a pattern.
    pub fn new(subject: &str) -> Result<Self> {
        let source = format!(r"{} \d{{4}}[A-Z]?/?[A-Z]?", regex::escape(subject.trim()));
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid course-code subject '{subject}'"))?;
        Ok(Self { pattern })
    }

    /// Return the first course code in `question`, if any.
    pub fn extract(&self, question: &str) -> Option<CourseCode> {
        self.pattern
            .find(question)
            .map(|m| CourseCode(m.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> CourseCodeExtractor {
        CourseCodeExtractor::new("Computer Science").unwrap()
    }

    #[test]
    fn test_extracts_plain_code() {
        let code = extractor()
            .extract("What are the prerequisites for Computer Science 4447?")
            .unwrap();
        assert_eq!(code.as_str(), "Computer Science 4447");
    }

    #[test]
    fn test_extracts_letter_and_slash_suffix() {
        let code = extractor()
            .extract("Is Computer Science 1026A/B offered online")
            .unwrap();
        assert_eq!(code.as_str(), "Computer Science 1026A/B");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let code = extractor().extract("what is computer science 1025 about").unwrap();
        assert_eq!(code.as_str(), "computer science 1025");
        assert_eq!(code.normalized(), "computer science 1025");
    }

    #[test]
    fn test_returns_first_of_several_codes() {
        let code = extractor()
            .extract("Compare Computer Science 2210 and Computer Science 2211")
            .unwrap();
        assert_eq!(code.as_str(), "Computer Science 2210");
    }

    #[test]
    fn test_absent_without_code() {
        let ex = extractor();
        assert!(ex.extract("Who won the 2024 Distinguished Research Professor Award?").is_none());
        assert!(ex.extract("Computer Science students and free software").is_none());
        // Three digits is not a course number
        assert!(ex.extract("Computer Science 444").is_none());
        assert!(ex.extract("").is_none());
    }

    #[test]
    fn test_subject_is_matched_literally() {
        let ex = CourseCodeExtractor::new("C++ Studies").unwrap();
        assert_eq!(ex.extract("c++ studies 1000").unwrap().as_str(), "c++ studies 1000");
        assert!(ex.extract("cc Studies 1000").is_none());
    }

    #[test]
    fn test_extracted_codes_have_documented_shape() {
        let shape = regex::Regex::new(r"(?i)^computer science \d{4}[a-z]?/?[a-z]?$").unwrap();
        let questions = [
            "Computer Science 4447?",
            "about computer science 3305b",
            "COMPUTER SCIENCE 1027A/B labs",
            "computer science 2209/y",
        ];
        for q in questions {
            let code = extractor().extract(q).unwrap();
            assert!(shape.is_match(code.as_str()), "bad shape: {code}");
        }
    }
}
