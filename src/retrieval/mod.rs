// ============================================================
// Layer 5 — Retrieval
// ============================================================
// Lexical passage ranking. BM25 needs no model download and its
// scores are easy to inspect, at the cost of missing paraphrases.
//
//   tokenizer.rs — whitespace terms, optional lowercasing
//   bm25.rs      — Okapi BM25 index over a candidate set
//   ranker.rs    — top-N selection and context assembly

pub mod tokenizer;

pub mod bm25;

pub mod ranker;
