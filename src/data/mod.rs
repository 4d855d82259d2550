// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the crawler's JSON file and the in-memory
// store the orchestrator queries:
//
//   scraped_info.json
//       │
//       ▼
//   JsonRecordLoader  → parses records, drops pages with no content
//       │
//       ▼
//   Preprocessor      → optional whitespace / strict cleaning
//       │
//       ▼
//   DocumentStore     → read-only ordered collection, course-code filter
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads crawled page records from a JSON array
pub mod loader;

/// Cleans and normalises page text
pub mod preprocessor;

/// The read-only document collection
pub mod store;
