// ============================================================
// Layer 2 — Ask Use Case (Pipeline Orchestrator)
// ============================================================
// Turns one question into one answer string:
//
//   1. Look for a course code in the question
//   2. Scope: documents mentioning that code (Narrow), or the
//      whole store when there is no code or nothing mentions it
//      (Broad)
//   3. Rank the scope with BM25, keep the top N, extract
//   4. Validate:
//        accepted     → done
//        boilerplate  → refuse now, no retry
//        anything else → re-rank with the larger escalated N,
//                        extract once more, apply the final check
//   5. The final check depends on the configured strictness;
//      a refused answer becomes the refusal phrase
//
// Each question is handled on its own. The store is read-only and
// nothing carries over between questions. Extractor failures of
// any kind become an empty answer and go through validation like
// any other.

use anyhow::Result;

use crate::data::store::DocumentStore;
use crate::domain::answer::{Answer, RejectReason, ValidationVerdict};
use crate::domain::course_code::{CourseCode, CourseCodeExtractor};
use crate::domain::traits::{AnswerExtractor, QuestionAnswerer};
use crate::infra::config::{PipelineConfig, Strictness};
use crate::retrieval::ranker::{RankedPassage, RelevanceRanker};
use crate::retrieval::tokenizer::TermTokenizer;
use crate::validation::validator::AnswerValidator;

/// Which part of the store a question was answered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Only documents mentioning this course code
    Narrow(CourseCode),
    /// The whole document store
    Broad,
}

impl SearchScope {
    pub fn label(&self) -> &'static str {
        match self {
            SearchScope::Narrow(_) => "narrow",
            SearchScope::Broad     => "broad",
        }
    }
}

/// Everything the orchestrator decided for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct AskOutcome {
    /// The final answer text, or the refusal phrase
    pub answer: String,

    /// Where the passages came from
    pub scope: SearchScope,

    /// How many times the extractor was invoked (0, 1 or 2)
    pub extractions: usize,

    /// Why the answer was refused, if it was
    pub refused: Option<RejectReason>,
}

/// What `inspect` reports: the scope and the full ranking.
#[derive(Debug, Clone)]
pub struct Inspection<'a> {
    pub course_code: Option<CourseCode>,
    pub scope:       SearchScope,
    pub ranked:      Vec<(RankedPassage, &'a str)>,
}

pub struct AskUseCase<E> {
    store:     DocumentStore,
    extractor: E,
    config:    PipelineConfig,
    codes:     CourseCodeExtractor,
    ranker:    RelevanceRanker,
    validator: AnswerValidator,
}

impl<E: AnswerExtractor> AskUseCase<E> {
    pub fn new(store: DocumentStore, extractor: E, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let codes     = CourseCodeExtractor::new(&config.subject)?;
        let ranker    = RelevanceRanker::new(TermTokenizer::new(config.lowercase_ranking));
        let validator = AnswerValidator::new(config.min_answer_words, config.boilerplate_phrases.clone());
        Ok(Self { store, extractor, config, codes, ranker, validator })
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Run the full decision tree for one question.
    pub fn ask(&self, question: &str) -> AskOutcome {
        let (scope, candidates) = self.select_scope(question);

        if candidates.is_empty() {
            tracing::warn!("Document store is empty; refusing without calling the extractor");
            return self.refuse(scope, 0, RejectReason::Empty);
        }

        let first_n = match scope {
            SearchScope::Narrow(_) => self.config.narrow_top_n,
            SearchScope::Broad     => self.config.broad_top_n,
        };

        // ── First attempt ────────────────────────────────────────────────────
        let context = self.ranker.rank(question, &candidates, first_n);
        if context.is_empty() {
            return self.refuse(scope, 0, RejectReason::Empty);
        }
        let answer = self.extract(question, &context.text);

        match self.validator.validate(&answer, question, &context.text) {
            ValidationVerdict::Accepted(answer) => {
                return self.accept(scope, 1, answer);
            }
            ValidationVerdict::Rejected(RejectReason::Boilerplate) => {
                tracing::debug!("First answer is boilerplate; not retrying");
                return self.refuse(scope, 1, RejectReason::Boilerplate);
            }
            ValidationVerdict::Rejected(reason) => {
                tracing::debug!(
                    "First answer rejected ({}); retrying with top {}",
                    reason.as_str(),
                    self.config.escalated_top_n
                );
            }
        }

        // ── Escalated attempt ────────────────────────────────────────────────
        let context = self.ranker.rank(question, &candidates, self.config.escalated_top_n);
        let answer  = self.extract(question, &context.text);
        let verdict = self.validator.validate(&answer, question, &context.text);

        match self.final_check(verdict) {
            Ok(()) => self.accept(scope, 2, answer),
            Err(reason) => self.refuse(scope, 2, reason),
        }
    }

    /// Scope and ranking for `question`, without extracting.
    pub fn inspect(&self, question: &str) -> Inspection<'_> {
        let course_code = self.codes.extract(question);
        let (scope, candidates) = self.select_scope(question);
        let ranked = self
            .ranker
            .score_all(question, &candidates)
            .into_iter()
            .map(|p| {
                let text = candidates[p.index];
                (p, text)
            })
            .collect();
        Inspection { course_code, scope, ranked }
    }

    fn select_scope(&self, question: &str) -> (SearchScope, Vec<&str>) {
        if let Some(code) = self.codes.extract(question) {
            let matched = self.store.contents_matching(&code);
            if !matched.is_empty() {
                tracing::debug!("Course code '{}' matched {} documents", code, matched.len());
                return (SearchScope::Narrow(code), matched);
            }
            tracing::debug!("No document mentions '{}'; searching the whole store", code);
        }
        (SearchScope::Broad, self.store.contents())
    }

    /// Call the extractor; any failure counts as "no answer found".
    fn extract(&self, question: &str, context: &str) -> Answer {
        match self.extractor.extract(question, context, self.config.max_answer_length) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Extractor failed: {e}");
                Answer::empty()
            }
        }
    }

    /// Judge the retried answer. Empty and boilerplate answers are
    /// always refused; strict mode also refuses irrelevant ones.
    /// A relevant answer that is merely short is accepted.
    fn final_check(&self, verdict: ValidationVerdict) -> Result<(), RejectReason> {
        match verdict {
            ValidationVerdict::Accepted(_) => Ok(()),
            ValidationVerdict::Rejected(reason) => match (reason, self.config.strictness) {
                (RejectReason::Empty, _) | (RejectReason::Boilerplate, _) => Err(reason),
                (RejectReason::Irrelevant, Strictness::Strict) => Err(reason),
                (RejectReason::Irrelevant, Strictness::Lenient) => Ok(()),
                (RejectReason::TooShort, _) => Ok(()),
            },
        }
    }

    fn accept(&self, scope: SearchScope, extractions: usize, answer: Answer) -> AskOutcome {
        AskOutcome { answer: answer.text, scope, extractions, refused: None }
    }

    fn refuse(&self, scope: SearchScope, extractions: usize, reason: RejectReason) -> AskOutcome {
        AskOutcome {
            answer: self.config.refusal.clone(),
            scope,
            extractions,
            refused: Some(reason),
        }
    }
}

impl<E: AnswerExtractor> QuestionAnswerer for AskUseCase<E> {
    fn answer(&self, question: &str) -> String {
        let outcome = self.ask(question);
        tracing::info!(
            scope       = outcome.scope.label(),
            extractions = outcome.extractions,
            refused     = outcome.refused.map(|r| r.as_str()),
            "Answered question"
        );
        outcome.answer
    }
}
