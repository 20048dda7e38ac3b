//! Query execution: index accessors, TF-IDF scoring and result rendering.

pub mod binary;
pub mod text;

use std::collections::BTreeMap;

use crate::analysis;
use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::index::Index;

pub use binary::BinaryIndexAccessor;
pub use text::TextIndexAccessor;

/// Read access to an index, however it is stored.
pub trait IndexAccessor {
    fn load_document(&self, doc_id: u64) -> Result<String, SearchError>;
    fn total_docs(&self) -> Result<u64, SearchError>;
    fn docs_with_term(&self, term: &str) -> Result<Vec<u64>, SearchError>;
    fn term_count_in_doc(&self, term: &str, doc_id: u64) -> Result<u64, SearchError>;
}

/// The in-memory index can be queried directly, which keeps the scoring
/// logic testable without touching disk.
impl IndexAccessor for Index {
    fn load_document(&self, doc_id: u64) -> Result<String, SearchError> {
        Ok(self.docs().get(&doc_id).cloned().unwrap_or_default())
    }

    fn total_docs(&self) -> Result<u64, SearchError> {
        Ok(self.doc_count() as u64)
    }

    fn docs_with_term(&self, term: &str) -> Result<Vec<u64>, SearchError> {
        Ok(self
            .entries()
            .get(term)
            .map(|postings| postings.keys().copied().collect())
            .unwrap_or_default())
    }

    fn term_count_in_doc(&self, term: &str, doc_id: u64) -> Result<u64, SearchError> {
        Ok(self
            .entries()
            .get(term)
            .and_then(|postings| postings.get(&doc_id))
            .map(|positions| positions.len() as u64)
            .unwrap_or(0))
    }
}

/// One scored document.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc_id: u64,
    pub score: f64,
    pub text: String,
}

/// Run `query` against `index`.
///
/// Every n-gram of every query word contributes `tf * ln(N / df)` to the
/// documents it occurs in. Hits come back sorted by score descending, ties
/// broken by ascending document id.
pub fn search(
    config: &EngineConfig,
    index: &dyn IndexAccessor,
    query: &str,
) -> Result<Vec<SearchHit>, SearchError> {
    let parsed = analysis::parse(query, config);
    let total = index.total_docs()?;
    if total == 0 {
        return Err(SearchError::EmptyIndex);
    }
    let n = total as f64;

    let mut scores: BTreeMap<u64, f64> = BTreeMap::new();
    for word in &parsed {
        for term in &word.ngrams {
            let docs = index.docs_with_term(term)?;
            if docs.is_empty() {
                continue;
            }
            let df = docs.len() as f64;
            for doc_id in docs {
                let tf = index.term_count_in_doc(term, doc_id)? as f64;
                *scores.entry(doc_id).or_default() += tf * (n / df).ln();
            }
        }
    }

    let mut hits = Vec::with_capacity(scores.len());
    for (doc_id, score) in scores {
        let text = index.load_document(doc_id)?;
        hits.push(SearchHit { doc_id, score, text });
    }
    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
    Ok(hits)
}

/// Number of rows the tabular rendering shows.
pub const RESULT_ROWS: usize = 19;

/// Render hits as the tab-separated table the client prints verbatim.
pub fn render_results(hits: &[SearchHit]) -> String {
    let mut out = String::from("\tSearch result:\n\tTop\tId\tScore\t\tText\n");
    for (i, hit) in hits.iter().take(RESULT_ROWS).enumerate() {
        out.push_str(&format!(
            "\t{}\t{}\t{:.6}\t{}\n",
            i + 1,
            hit.doc_id,
            hit.score,
            hit.text
        ));
    }
    out
}
