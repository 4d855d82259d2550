// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, never
// against concrete loaders or models. That lets tests swap the
// QA model for a scripted double and lets the CLI choose between
// a remote model endpoint and the offline heuristic.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::answer::{Answer, ExtractionError};
use crate::domain::document::Document;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load crawled page records.
///
/// Implementations:
///   - JsonRecordLoader → reads the crawler's JSON array output
pub trait DocumentSource {
    /// Load every usable document. Errors here are fatal at startup.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── AnswerExtractor ──────────────────────────────────────────────────────────
/// The external extractive-QA capability: point at a span of
/// `context` that answers `question`.
///
/// Implementations are invoked verbatim with no retries of their
/// own; escalation lives in the orchestrator.
pub trait AnswerExtractor {
    fn extract(
        &self,
        question:          &str,
        context:           &str,
        max_answer_length: usize,
    ) -> Result<Answer, ExtractionError>;
}

impl<E: AnswerExtractor + ?Sized> AnswerExtractor for &E {
    fn extract(
        &self,
        question:          &str,
        context:           &str,
        max_answer_length: usize,
    ) -> Result<Answer, ExtractionError> {
        (**self).extract(question, context, max_answer_length)
    }
}

impl<E: AnswerExtractor + ?Sized> AnswerExtractor for Box<E> {
    fn extract(
        &self,
        question:          &str,
        context:           &str,
        max_answer_length: usize,
    ) -> Result<Answer, ExtractionError> {
        (**self).extract(question, context, max_answer_length)
    }
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that turns a question into a final answer string.
///
/// Per-question failures never surface as errors: the answer is
/// then the configured refusal phrase.
pub trait QuestionAnswerer {
    fn answer(&self, question: &str) -> String;
}
