// ============================================================
// Layer 5 — BM25 (Okapi) Index
// ============================================================
// Lexical relevance of each document to a query:
//
//   score(D, Q) = Σ_q  idf(q) · tf(q,D)·(k1+1)
//                        ─────────────────────────────────────
//                        tf(q,D) + k1·(1 − b + b·|D|/avgdl)
//
//   idf(q) = ln(N − n(q) + 0.5) − ln(n(q) + 0.5)
//
// Terms that occur in more than half the corpus get a negative
// idf; those are floored to ε · mean(idf) so very common words
// still carry a small, consistent weight. Query terms absent from
// the corpus contribute nothing. A repeated query term counts once
// per occurrence.
//
// The index is rebuilt per query over whatever candidate set the
// orchestrator chose (filtered or whole store), so idf reflects
// that candidate set, not the full corpus.
//
// Reference: Robertson & Zaragoza (2009) The Probabilistic
//            Relevance Framework: BM25 and Beyond

use std::collections::{BTreeMap, HashMap};

/// Term-frequency saturation
pub const K1: f64 = 1.5;
/// Length normalisation strength
pub const B: f64 = 0.75;
/// Floor factor for negative idf values
pub const EPSILON: f64 = 0.25;

pub struct Bm25Index {
    doc_freqs: Vec<HashMap<String, usize>>,
    doc_lens:  Vec<usize>,
    avgdl:     f64,
    idf:       HashMap<String, f64>,
}

impl Bm25Index {
    /// Build an index over already-tokenized documents.
    pub fn new(corpus: &[Vec<String>]) -> Self {
        let mut doc_freqs = Vec::with_capacity(corpus.len());
        let mut doc_lens  = Vec::with_capacity(corpus.len());
        // n(q): number of documents containing each term. Ordered so the
        // idf mean is summed in the same order on every build.
        let mut containing: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_len = 0usize;

        for doc in corpus {
            let mut freqs: HashMap<String, usize> = HashMap::new();
            for term in doc {
                *freqs.entry(term.clone()).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *containing.entry(term.clone()).or_insert(0) += 1;
            }
            total_len += doc.len();
            doc_lens.push(doc.len());
            doc_freqs.push(freqs);
        }

        let avgdl = if corpus.is_empty() {
            0.0
        } else {
            total_len as f64 / corpus.len() as f64
        };

        Self {
            idf: compute_idf(&containing, corpus.len()),
            doc_freqs,
            doc_lens,
            avgdl,
        }
    }

    pub fn len(&self) -> usize {
        self.doc_lens.len()
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Score every document against `query`, in corpus order.
    pub fn scores(&self, query: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0f64; self.len()];

        for term in query {
            let idf = self.idf(term);
            if idf == 0.0 {
                continue;
            }
            for (i, freqs) in self.doc_freqs.iter().enumerate() {
                let tf = freqs.get(term).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    continue;
                }
                let norm = if self.avgdl > 0.0 {
                    self.doc_lens[i] as f64 / self.avgdl
                } else {
                    1.0
                };
                scores[i] += idf * (tf * (K1 + 1.0)) / (tf + K1 * (1.0 - B + B * norm));
            }
        }

        scores
    }
}

fn compute_idf(containing: &BTreeMap<String, usize>, corpus_size: usize) -> HashMap<String, f64> {
    let n = corpus_size as f64;
    let mut idf: HashMap<String, f64> = HashMap::with_capacity(containing.len());
    let mut idf_sum = 0.0;
    let mut negative = Vec::new();

    for (term, &df) in containing {
        let df = df as f64;
        let value = (n - df + 0.5).ln() - (df + 0.5).ln();
        idf_sum += value;
        if value < 0.0 {
            negative.push(term.clone());
        }
        idf.insert(term.clone(), value);
    }

    if !idf.is_empty() {
        let floor = EPSILON * (idf_sum / idf.len() as f64);
        for term in negative {
            idf.insert(term, floor);
        }
    }

    idf
}
