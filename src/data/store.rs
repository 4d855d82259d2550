// ============================================================
// Layer 4 — Document Store
// ============================================================
// The read-only, ordered collection of crawled pages. Loaded once
// at startup and shared by reference with every query; there is no
// write path after load.

use anyhow::Result;

use crate::domain::course_code::CourseCode;
use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    /// Load every document from `source` once.
    pub fn load(source: &dyn DocumentSource) -> Result<Self> {
        Ok(Self::new(source.load_all()?))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Content of every document, in store order
    pub fn contents(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.content.as_str()).collect()
    }

    /// Content of the documents whose title or content mentions
    /// `code`, ignoring case. Store order is preserved.
    pub fn contents_matching(&self, code: &CourseCode) -> Vec<&str> {
        let needle = code.normalized();
        self.docs
            .iter()
            .filter(|d| d.mentions(&needle))
            .map(|d| d.content.as_str())
            .collect()
    }
}
