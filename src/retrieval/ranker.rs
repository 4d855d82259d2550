// ============================================================
// Layer 5 — Relevance Ranker
// ============================================================
// Picks the N passages most relevant to a question and joins
// them, best first, into the context handed to the extractor.
//
//   candidates ──tokenize──▶ Bm25Index ──scores──▶ stable sort
//                                                     │
//                                 top N, joined by " "◀┘
//
// Ties keep candidate order, so the same inputs always give the
// same context. N larger than the candidate count returns them
// all; an empty candidate set gives an empty context and the
// caller decides what to do with it.

use crate::retrieval::bm25::Bm25Index;
use crate::retrieval::tokenizer::TermTokenizer;

/// One selected passage: its position in the candidate list and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPassage {
    pub index: usize,
    pub score: f64,
}

/// The ranker's output for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedContext {
    /// Selected passages in descending score order
    pub passages: Vec<RankedPassage>,

    /// The selected passage texts joined with single spaces
    pub text: String,
}

impl RankedContext {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub struct RelevanceRanker {
    tokenizer: TermTokenizer,
}

impl RelevanceRanker {
    pub fn new(tokenizer: TermTokenizer) -> Self {
        Self { tokenizer }
    }

    /// Score every candidate against the question, best first.
    pub fn score_all(&self, question: &str, candidates: &[&str]) -> Vec<RankedPassage> {
        let corpus: Vec<Vec<String>> = candidates
            .iter()
            .map(|c| self.tokenizer.tokenize(c))
            .collect();
        let index = Bm25Index::new(&corpus);
        let query = self.tokenizer.tokenize(question);

        let mut ranked: Vec<RankedPassage> = index
            .scores(&query)
            .into_iter()
            .enumerate()
            .map(|(index, score)| RankedPassage { index, score })
            .collect();

        // sort_by is stable: equal scores stay in candidate order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Build the context from the `top_n` best candidates.
    pub fn rank(&self, question: &str, candidates: &[&str], top_n: usize) -> RankedContext {
        let mut passages = self.score_all(question, candidates);
        passages.truncate(top_n);

        let text = passages
            .iter()
            .map(|p| candidates[p.index])
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(
            "Ranked {} candidates, kept {} (top_n={})",
            candidates.len(),
            passages.len(),
            top_n
        );

        RankedContext { passages, text }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn ranker() -> RelevanceRanker {
        RelevanceRanker::new(TermTokenizer::default())
    }

    const PAGES: [&str; 5] = [
        "The department occupies Middlesex College",
        "Students get free software through the Microsoft Azure program",
        "Research grants come from NSERC and industry partners",
        "The student council organises hackathons",
        "Office hours and contact information",
    ];

    #[test]
    fn test_top_n_picks_best_passages_first() {
        let ctx = ranker().rank("Where do research grants come from?", &PAGES, 1);
        assert_eq!(ctx.passages.len(), 1);
        assert_eq!(ctx.passages[0].index, 2);
        assert_eq!(ctx.text, PAGES[2]);
    }

    #[test]
    fn test_n_above_corpus_size_returns_everything() {
        let ctx = ranker().rank("free software", &PAGES, 10);
        assert_eq!(ctx.passages.len(), PAGES.len());
        for page in PAGES {
            assert!(ctx.text.contains(page));
        }
        // Best match leads the concatenation
        assert!(ctx.text.starts_with(PAGES[1]));
    }

    #[test]
    fn test_scores_are_descending() {
        let ranked = ranker().score_all("student council free software", &PAGES);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let pages = ["alpha", "beta", "gamma", "delta"];
        // No query term appears anywhere: every score is zero
        let ctx = ranker().rank("omega", &pages, 3);
        let order: Vec<usize> = ctx.passages.iter().map(|p| p.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(ctx.text, "alpha beta gamma");
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let q = "What facilities does the department occupy?";
        assert_eq!(ranker().rank(q, &PAGES, 3), ranker().rank(q, &PAGES, 3));
    }

    #[test]
    fn test_empty_candidates_give_empty_context() {
        let ctx = ranker().rank("anything at all", &[], 3);
        assert!(ctx.passages.is_empty());
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_case_policy_changes_matching() {
        let pages = ["nserc funds us", "nothing here", "more nothing", "still nothing"];
        let lower = RelevanceRanker::new(TermTokenizer::new(true)).rank("NSERC", &pages, 1);
        assert!(lower.passages[0].score > 0.0);

        let exact = RelevanceRanker::new(TermTokenizer::new(false)).rank("NSERC", &pages, 1);
        assert_eq!(exact.passages[0].score, 0.0);
    }
}
