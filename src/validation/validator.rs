// ============================================================
// Layer 5b — Answer Validator
// ============================================================
// Decides whether an extracted span is worth showing.
//
// Checks, in order (first failure wins):
//   1. Empty        — nothing was extracted
//   2. Boilerplate  — the span contains site navigation text such
//                     as "Privacy" or "Terms of Use"; this is
//                     rejected whatever else is true
//   3. Irrelevant   — see is_answer_relevant below
//   4. Too short    — relevant, but fewer words than the minimum
//
// The orchestrator treats TooShort differently from the others on
// its final check: a short span that passed the relevance test is
// still an answer ("Middlesex College").
//
// The relevance test is shallow and will accept some
// wrong answers that happen to share vocabulary with the question.

use crate::domain::answer::{Answer, RejectReason, ValidationVerdict};
use crate::retrieval::tokenizer::term_set;

/// Site-navigation phrases that leak into crawled page text
pub const DEFAULT_BOILERPLATE: [&str; 4] = [
    "Privacy",
    "Web Standards",
    "Terms of Use",
    "Accessibility",
];

#[derive(Debug, Clone)]
pub struct AnswerValidator {
    min_answer_words:    usize,
    boilerplate_phrases: Vec<String>,
}

impl AnswerValidator {
    pub fn new(min_answer_words: usize, boilerplate_phrases: Vec<String>) -> Self {
        Self { min_answer_words, boilerplate_phrases }
    }

    /// Run every check against `answer`.
    pub fn validate(&self, answer: &Answer, question: &str, context: &str) -> ValidationVerdict {
        if answer.is_empty() {
            return ValidationVerdict::Rejected(RejectReason::Empty);
        }
        if self.is_boilerplate(&answer.text) {
            return ValidationVerdict::Rejected(RejectReason::Boilerplate);
        }
        if !is_answer_relevant(question, &answer.text, context) {
            return ValidationVerdict::Rejected(RejectReason::Irrelevant);
        }
        if answer.word_count() < self.min_answer_words {
            return ValidationVerdict::Rejected(RejectReason::TooShort);
        }
        ValidationVerdict::Accepted(answer.clone())
    }

    /// True when `text` contains any configured boilerplate phrase.
    /// Matching is case-sensitive: "privacy policy" in prose is allowed,
    /// the "Privacy" footer link is not.
    pub fn is_boilerplate(&self, text: &str) -> bool {
        self.boilerplate_phrases
            .iter()
            .any(|phrase| !phrase.is_empty() && text.contains(phrase.as_str()))
    }
}

impl Default for AnswerValidator {
    fn default() -> Self {
        Self::new(3, DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect())
    }
}

/// Shallow lexical relevance over lowercased whitespace terms.
///
/// Relevant when any of:
///   - the answer shares a term with the question
///   - the answer shares a term with the context
///   - the answer is at most two words and some question term
///     occurs inside it as a substring
pub fn is_answer_relevant(question: &str, answer: &str, context: &str) -> bool {
    let question_terms = term_set(question);
    let answer_terms   = term_set(answer);

    if !question_terms.is_disjoint(&answer_terms) {
        return true;
    }

    let context_terms = term_set(context);
    if !answer_terms.is_disjoint(&context_terms) {
        return true;
    }

    let answer_lower = answer.to_lowercase();
    answer.split_whitespace().count() <= 2
        && question_terms.iter().any(|t| answer_lower.contains(t.as_str()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION: &str = "What are the prerequisites for Computer Science 4447?";
    const CONTEXT: &str = "Prerequisite is Computer Science 2212 or permission";

    fn verdict(text: &str) -> ValidationVerdict {
        AnswerValidator::default().validate(&Answer::new(text, None), QUESTION, CONTEXT)
    }

    #[test]
    fn test_accepts_relevant_answer() {
        assert!(verdict("Computer Science 2212 or permission").is_accepted());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(verdict(""), ValidationVerdict::Rejected(RejectReason::Empty));
        assert_eq!(verdict("  "), ValidationVerdict::Rejected(RejectReason::Empty));
    }

    #[test]
    fn test_boilerplate_rejected_even_when_relevant() {
        // Shares "privacy" with both the question and the context
        let v = AnswerValidator::default().validate(
            &Answer::new("Privacy", None),
            "Where is the Privacy office?",
            "Privacy Privacy Privacy",
        );
        assert_eq!(v, ValidationVerdict::Rejected(RejectReason::Boilerplate));

        assert_eq!(
            verdict("Computer Science Terms of Use"),
            ValidationVerdict::Rejected(RejectReason::Boilerplate)
        );
    }

    #[test]
    fn test_boilerplate_match_keeps_case() {
        // Lowercase prose mentioning the same words is not a footer link
        let v = AnswerValidator::new(1, DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect());
        let a = Answer::new("privacy terms of use", None);
        assert!(!v.is_boilerplate(&a.text));
        assert!(v.validate(&a, "What are the privacy terms of use?", CONTEXT).is_accepted());

        assert!(v.is_boilerplate("Privacy"));
        assert!(!v.is_boilerplate("PRIVACY"));
    }

    #[test]
    fn test_custom_boilerplate_list() {
        let v = AnswerValidator::new(1, vec!["Skip to main content".into()]);
        let a = Answer::new("Skip to main content Computer Science", None);
        assert_eq!(v.validate(&a, QUESTION, CONTEXT), ValidationVerdict::Rejected(RejectReason::Boilerplate));
        // The default phrases are no longer checked
        assert!(v.validate(&Answer::new("Privacy computer", None), QUESTION, CONTEXT).is_accepted());
    }

    #[test]
    fn test_rejects_disjoint_long_answer() {
        assert_eq!(
            verdict("lorem ipsum dolor sit"),
            ValidationVerdict::Rejected(RejectReason::Irrelevant)
        );
    }

    #[test]
    fn test_short_relevant_answer_is_too_short() {
        assert_eq!(verdict("2212"), ValidationVerdict::Rejected(RejectReason::TooShort));
    }

    #[test]
    fn test_min_words_threshold_is_configurable() {
        let strict = AnswerValidator::new(15, DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect());
        let a = Answer::new("Computer Science 2212 or permission", None);
        assert_eq!(strict.validate(&a, QUESTION, CONTEXT), ValidationVerdict::Rejected(RejectReason::TooShort));

        let lenient = AnswerValidator::new(1, Vec::new());
        assert!(lenient.validate(&Answer::new("2212", None), QUESTION, CONTEXT).is_accepted());
    }

    #[test]
    fn test_relevance_via_question_terms() {
        assert!(is_answer_relevant("who chairs data analytics", "Analytics lead", "unrelated"));
    }

    #[test]
    fn test_relevance_via_context_terms() {
        assert!(is_answer_relevant("who is it", "Dr Smith", "the chair is dr smith"));
    }

    #[test]
    fn test_relevance_via_substring_for_short_answers() {
        // Question term "free" only appears inside the answer word "freeware"
        assert!(is_answer_relevant("any free tools", "Freeware", "nothing shared"));
        // Three words: the substring rule no longer applies
        assert!(!is_answer_relevant("any free tools", "Freeware and shareware", "nothing shared"));
    }

    #[test]
    fn test_disjoint_answers_over_two_tokens_always_rejected() {
        let cases = [
            ("what time", "x y z", "a b c"),
            ("where", "north south east west", "campus map"),
            ("", "one two three", ""),
        ];
        for (q, a, c) in cases {
            assert!(!is_answer_relevant(q, a, c), "{a} should be irrelevant");
            let v = AnswerValidator::new(0, Vec::new()).validate(&Answer::new(a, None), q, c);
            assert_eq!(v, ValidationVerdict::Rejected(RejectReason::Irrelevant));
        }
    }
}
