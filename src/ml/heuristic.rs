// ============================================================
// Layer 6 — Heuristic Extractor
// ============================================================
// An offline stand-in for a pretrained QA model, used when no
// inference endpoint is configured and in tests.
//
// Strategy:
//  1. Split the context into sentences on . ! ? boundaries. Pages
//     cleaned without punctuation have no boundaries, so any
//     sentence longer than the answer bound is cut into windows of
//     that many words.
//  2. Score each sentence by the question's key terms it contains
//     as whole words, weighting each term by its length so long,
//     specific terms ("prerequisites") beat short generic ones.
//  3. Return the best sentence; ties go to the earliest. If no
//     sentence contains any key term the answer is empty.
//
// Confidence is the matched weight over the total key-term weight.

use crate::domain::answer::{Answer, ExtractionError};
use crate::domain::traits::AnswerExtractor;

const STOP_WORDS: [&str; 24] = [
    "a", "an", "the", "and", "or", "of", "to", "in", "on", "for", "is", "are",
    "was", "what", "who", "when", "where", "which", "how", "does", "do", "any",
    "about", "from",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl AnswerExtractor for HeuristicExtractor {
    fn extract(
        &self,
        question:          &str,
        context:           &str,
        max_answer_length: usize,
    ) -> Result<Answer, ExtractionError> {
        if context.trim().is_empty() {
            return Err(ExtractionError::EmptyContext);
        }

        let terms = key_terms(question);
        let total_weight: usize = terms.iter().map(|t| t.len()).sum();
        if total_weight == 0 {
            return Ok(Answer::empty());
        }

        let mut best: Option<(usize, String)> = None;
        for sentence in sentences(context, max_answer_length.max(1)) {
            let lower = sentence.to_lowercase();
            let weight: usize = terms
                .iter()
                .filter(|t| contains_word(&lower, t))
                .map(|t| t.len())
                .sum();
            // Strictly greater keeps the earliest sentence on ties
            if weight > 0 && best.as_ref().map_or(true, |(w, _)| weight > *w) {
                best = Some((weight, sentence));
            }
        }

        Ok(match best {
            Some((weight, text)) => Answer::new(text, Some(weight as f32 / total_weight as f32)),
            None => Answer::empty(),
        })
    }
}

/// Lowercased question words with punctuation trimmed and stop words removed.
fn key_terms(question: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in question.split_whitespace() {
        let w = word
            .to_lowercase()
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .to_string();
        if !w.is_empty() && !STOP_WORDS.contains(&w.as_str()) && !terms.contains(&w) {
            terms.push(w);
        }
    }
    terms
}

/// Sentences of at most `max_words` words each.
fn sentences(context: &str, max_words: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw in context.split_inclusive(['.', '!', '?']) {
        let words: Vec<&str> = raw.split_whitespace().collect();
        for window in words.chunks(max_words) {
            let sentence = window.join(" ");
            if !sentence.is_empty() {
                out.push(sentence);
            }
        }
    }
    out
}

/// Whole-word substring test: `word` must be bounded by
/// non-alphanumeric characters or the ends of `text`.
fn contains_word(text: &str, word: &str) -> bool {
    let tb = text.as_bytes();
    let wb = word.as_bytes();
    let wl = wb.len();
    if wl == 0 || wl > tb.len() { return false; }
    for i in 0..=(tb.len() - wl) {
        if &tb[i..i + wl] == wb {
            let before_ok = i == 0 || !tb[i - 1].is_ascii_alphanumeric();
            let after_ok  = i + wl == tb.len() || !tb[i + wl].is_ascii_alphanumeric();
            if before_ok && after_ok { return true; }
        }
    }
    false
}
