//! In-memory inverted index and its on-disk writers.

pub mod binary;
pub mod text;

use std::collections::BTreeMap;

use crate::analysis;
use crate::config::EngineConfig;

pub use binary::BinaryIndexWriter;
pub use text::TextIndexWriter;

/// Postings for one term: document id to the word positions it appears at.
pub type Postings = BTreeMap<u64, Vec<u64>>;

/// Inverted index over a set of documents.
#[derive(Debug, Default)]
pub struct Index {
    docs: BTreeMap<u64, String>,
    entries: BTreeMap<String, Postings>,
}

impl Index {
    pub fn docs(&self) -> &BTreeMap<u64, String> {
        &self.docs
    }

    pub fn entries(&self) -> &BTreeMap<String, Postings> {
        &self.entries
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn term_count(&self) -> usize {
        self.entries.len()
    }
}

/// Accumulates documents into an [`Index`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: Index,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze `text` and record its terms. A document id that was already
    /// added is ignored.
    pub fn add_document(&mut self, document_id: u64, text: &str, config: &EngineConfig) {
        if self.index.docs.contains_key(&document_id) {
            return;
        }
        self.index.docs.insert(document_id, text.to_string());
        for word in analysis::parse(text, config) {
            for term in &word.ngrams {
                self.index
                    .entries
                    .entry(term.clone())
                    .or_default()
                    .entry(document_id)
                    .or_default()
                    .push(word.position as u64);
            }
        }
    }

    pub fn build(self) -> Index {
        self.index
    }
}
