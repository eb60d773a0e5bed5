//! Optional in-memory document store for retrieval augmentation
//!
//! Not on any graph path: the analysis swarm works entirely from live
//! provider data. The store exists so callers can index research notes or
//! filings and search them alongside a run. It is constructed explicitly
//! and injected through server state; there is no module-level instance.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// One indexed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub metadata: HashMap<String, String>,
}

/// A search result with its overlap score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub document: Document,
    pub score: f64,
}

/// In-memory document index with token-overlap scoring
#[derive(Default)]
pub struct DocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a single document; an existing document with the same id is
    /// replaced.
    pub fn index(&self, document: Document) {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());
        documents.retain(|d| d.id != document.id);
        documents.push(document);
    }

    /// Index a batch of documents
    pub fn index_batch(&self, batch: Vec<Document>) {
        for document in batch {
            self.index(document);
        }
    }

    /// Search the index, returning up to `n` hits ordered by score.
    pub fn search(&self, query: &str, n: usize) -> Vec<SearchHit> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        let mut hits: Vec<SearchHit> = documents
            .iter()
            .filter_map(|document| {
                let score = overlap_score(&query_tokens, &tokenize(&document.text));
                (score > 0.0).then(|| SearchHit {
                    document: document.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(n);
        hits
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Fraction of query tokens present in the document.
fn overlap_score(query: &HashSet<String>, document: &HashSet<String>) -> f64 {
    let shared = query.intersection(document).count();
    shared as f64 / query.len() as f64
}
