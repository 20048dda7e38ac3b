//! Reading the plain-text index format.

use std::fs;
use std::path::PathBuf;

use crate::error::SearchError;
use crate::index::text::{parse_entries, term_shard};
use crate::index::Postings;

use super::IndexAccessor;

/// Accessor over a directory containing `docs/` and `entries/` as produced
/// by the text index writer (i.e. `<index>/text`).
pub struct TextIndexAccessor {
    root: PathBuf,
}

impl TextIndexAccessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn postings(&self, term: &str) -> Result<Option<Postings>, SearchError> {
        let path = self.root.join("entries").join(term_shard(term));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SearchError::IndexUnavailable { path, source }),
        };
        let mut entries = parse_entries(&raw, &path)?;
        Ok(entries.remove(term))
    }
}

impl IndexAccessor for TextIndexAccessor {
    fn load_document(&self, doc_id: u64) -> Result<String, SearchError> {
        let path = self.root.join("docs").join(doc_id.to_string());
        let raw = fs::read_to_string(&path)
            .map_err(|source| SearchError::IndexUnavailable { path, source })?;
        // The first line is the document text; writers never emit more.
        Ok(raw.lines().next().unwrap_or_default().to_string())
    }

    fn total_docs(&self) -> Result<u64, SearchError> {
        let docs_dir = self.root.join("docs");
        let entries = match fs::read_dir(&docs_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(SearchError::IndexUnavailable {
                    path: docs_dir,
                    source,
                })
            }
        };
        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|source| SearchError::IndexUnavailable {
                path: docs_dir.clone(),
                source,
            })?;
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn docs_with_term(&self, term: &str) -> Result<Vec<u64>, SearchError> {
        Ok(self
            .postings(term)?
            .map(|postings| postings.keys().copied().collect())
            .unwrap_or_default())
    }

    fn term_count_in_doc(&self, term: &str, doc_id: u64) -> Result<u64, SearchError> {
        Ok(self
            .postings(term)?
            .and_then(|postings| postings.get(&doc_id).map(|positions| positions.len() as u64))
            .unwrap_or(0))
    }
}
