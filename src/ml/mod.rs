// ============================================================
// Layer 6 — Answer Extractor Adapters
// ============================================================
// Implementations of the AnswerExtractor trait. The QA model
// itself is an external capability; this layer only knows how
// to reach it and how to bound how long it may take.
//
//   http_extractor.rs — hosted extractive QA model over HTTP
//   heuristic.rs      — offline sentence picker for demos/tests
//   timeout.rs        — deadline wrapper for any extractor

pub mod http_extractor;

pub mod heuristic;

pub mod timeout;
