// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the concepts
// of the system: pages, course codes, answers and verdicts.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO ranking or model code
//   - Only plain data types and the traits other layers implement

// A crawled page record
pub mod document;

// Course identifiers pulled out of questions
pub mod course_code;

// Candidate answers, validation verdicts and extraction failures
pub mod answer;

// Core abstractions (traits) that other layers implement
pub mod traits;
