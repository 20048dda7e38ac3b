//! Plain-text on-disk index format.
//!
//! Layout under `<index>/text/`:
//!   - `docs/<id>` — the raw document text, one file per document.
//!   - `entries/<shard>` — posting records, one per line:
//!     `term doc_count (doc_id pos_count pos...)*`. The shard name is the
//!     first six hex characters of the term's SHA-256, so distinct terms can
//!     share a file; lookups match on the term field.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::IndexError;

use super::{Index, Postings};

/// Shard file name for a term.
pub fn term_shard(term: &str) -> String {
    hex::encode(Sha256::digest(term.as_bytes()))[..6].to_string()
}

/// Render one posting record as a line of the entry file format.
fn format_entry(term: &str, postings: &Postings) -> String {
    let mut line = format!("{term} {}", postings.len());
    for (doc_id, positions) in postings {
        line.push_str(&format!(" {doc_id} {}", positions.len()));
        for pos in positions {
            line.push_str(&format!(" {pos}"));
        }
    }
    line
}

/// Parse every record of an entry shard file.
pub fn parse_entries(raw: &str, path: &Path) -> Result<BTreeMap<String, Postings>, IndexError> {
    let malformed = || IndexError::MalformedEntry {
        path: path.to_path_buf(),
    };

    let mut entries = BTreeMap::new();
    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split_whitespace();
        let term = fields.next().ok_or_else(malformed)?.to_string();
        let doc_count: usize = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(malformed)?;

        let mut postings = Postings::new();
        for _ in 0..doc_count {
            let doc_id: u64 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(malformed)?;
            let pos_count: usize = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(malformed)?;
            let mut positions = Vec::with_capacity(pos_count);
            for _ in 0..pos_count {
                let pos: u64 = fields
                    .next()
                    .and_then(|f| f.parse().ok())
                    .ok_or_else(malformed)?;
                positions.push(pos);
            }
            postings.insert(doc_id, positions);
        }
        entries.insert(term, postings);
    }
    Ok(entries)
}

/// Writes an [`Index`] in the text format.
pub struct TextIndexWriter;

impl TextIndexWriter {
    pub fn write(index_dir: &Path, index: &Index) -> Result<(), IndexError> {
        let root = index_dir.join("text");
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| IndexError::Io { path, source }
        };

        let docs_dir = root.join("docs");
        fs::create_dir_all(&docs_dir).map_err(io_err(&docs_dir))?;
        for (doc_id, text) in index.docs() {
            let path = docs_dir.join(doc_id.to_string());
            fs::write(&path, text).map_err(io_err(&path))?;
        }

        // Group records by shard so colliding terms land in one file.
        let mut shards: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (term, postings) in index.entries() {
            shards
                .entry(term_shard(term))
                .or_default()
                .push(format_entry(term, postings));
        }

        let entries_dir = root.join("entries");
        fs::create_dir_all(&entries_dir).map_err(io_err(&entries_dir))?;
        for (shard, records) in shards {
            let path = entries_dir.join(shard);
            let mut file = fs::File::create(&path).map_err(io_err(&path))?;
            for record in records {
                writeln!(file, "{record}").map_err(io_err(&path))?;
            }
        }
        Ok(())
    }
}
