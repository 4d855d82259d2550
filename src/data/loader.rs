// ============================================================
// Layer 4 — Record Loader
// ============================================================
// Loads the crawler's output: a JSON array of page records.
//
//   [
//     { "url": "...", "title": "Computer Science 4447", "content": "..." },
//     { "url": "...", "title": "Contact" },            ← no content, dropped
//     ...
//   ]
//
// Records are deserialised into a permissive RawRecord first so
// one malformed page never aborts the load; only a missing file
// or a file that is not a JSON array is fatal.
//
// Reference: serde_json crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::data::preprocessor::{CleanMode, Preprocessor};
use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// A page record as the crawler wrote it. Extra fields (url, depth,
/// crawl time) are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    content: Option<String>,
}

/// Loads documents from one JSON file.
/// Implements the DocumentSource trait from Layer 3.
pub struct JsonRecordLoader {
    /// Path to the crawl output file
    path: PathBuf,

    /// Optional cleaning applied to content at load time
    clean: CleanMode,
}

impl JsonRecordLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), clean: CleanMode::None }
    }

    /// Apply `mode` to every record's content while loading
    pub fn with_cleaning(mut self, mode: CleanMode) -> Self {
        self.clean = mode;
        self
    }
}

impl DocumentSource for JsonRecordLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read document store '{}'", self.path.display()))?;

        // Each element stays a raw Value until it has been checked,
        // so a single odd record (a string, a number) is skipped
        // instead of failing the whole array.
        let values: Vec<serde_json::Value> = serde_json::from_str(&json)
            .with_context(|| {
                format!("Document store '{}' is not a JSON array of records", self.path.display())
            })?;

        let prep = Preprocessor::new();
        let total = values.len();
        let mut docs = Vec::with_capacity(total);

        for value in values {
            let raw: RawRecord = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!("Skipping malformed record: {e}");
                    continue;
                }
            };

            let Some(content) = raw.content else { continue };
            let content = prep.clean_with(&content, self.clean);
            if content.trim().is_empty() {
                continue;
            }

            docs.push(Document::new(raw.title.unwrap_or_default(), content));
        }

        let dropped = total - docs.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} of {} records with no usable content", dropped, total);
        }
        tracing::info!(
            "Loaded {} documents from '{}'",
            docs.len(),
            self.path.display()
        );
        Ok(docs)
    }
}
