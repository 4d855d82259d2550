// ============================================================
// Layer 5b — Answer Validation
// ============================================================
// Plausibility checks on extracted spans: boilerplate phrases,
// lexical relevance and a minimum word count.

pub mod validator;
