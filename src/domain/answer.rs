// ============================================================
// Layer 3 — Answer, Verdict and Extraction Failure
// ============================================================
// An Answer is whatever span the extractor pointed at. It may be
// empty, partial, or site-navigation text that slipped into a page
// during crawling; the validator decides whether it is usable.
//
// Extraction failures are values, not panics: the orchestrator
// turns every ExtractionError into an empty Answer and lets normal
// validation reject it.
//
// Reference: Rust Book §6 (Enums), §9 (Recoverable Errors)

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A candidate answer span produced by an AnswerExtractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The extracted text (may be empty)
    pub text: String,

    /// Model confidence, when the extractor reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Answer {
    pub fn new(text: impl Into<String>, score: Option<f32>) -> Self {
        Self { text: text.into(), score }
    }

    /// The "no answer found" value
    pub fn empty() -> Self {
        Self::new("", None)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whitespace-separated word count
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Why the validator refused an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No text at all
    Empty,
    /// Contains a known site-navigation phrase
    Boilerplate,
    /// Shares no vocabulary with the question or the context
    Irrelevant,
    /// Relevant, but shorter than the configured word minimum
    TooShort,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Empty       => "empty",
            RejectReason::Boilerplate => "boilerplate",
            RejectReason::Irrelevant  => "irrelevant",
            RejectReason::TooShort    => "too short",
        }
    }
}

/// Outcome of validating one candidate answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationVerdict {
    Accepted(Answer),
    Rejected(RejectReason),
}

impl ValidationVerdict {
    #[cfg(test)]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted(_))
    }
}

/// Failure modes of the external extractor capability.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extractor did not answer within {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("refusing to extract from an empty context")]
    EmptyContext,
}
