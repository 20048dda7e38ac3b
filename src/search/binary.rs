//! Reading the binary index format through a memory map.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::SearchError;
use crate::index::binary::{SECTION_DICTIONARY, SECTION_DOCS, SECTION_ENTRIES};
use crate::index::Postings;

use super::IndexAccessor;

/// Bounds-checked cursor over a byte slice, all integers little-endian.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    pub fn read_bytes(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], SearchError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(SearchError::TruncatedIndex(what))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8, SearchError> {
        Ok(self.read_bytes(1, what)?[0])
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32, SearchError> {
        let bytes = self.read_bytes(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Section directory parsed from the file header.
#[derive(Debug)]
pub struct Header {
    sections: HashMap<String, u32>,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self, SearchError> {
        let mut reader = BinaryReader::new(data);
        let section_count = reader.read_u8("header section count")?;
        let mut sections = HashMap::with_capacity(section_count as usize);
        for _ in 0..section_count {
            let name_len = reader.read_u8("header section name length")? as usize;
            let name = String::from_utf8_lossy(
                reader.read_bytes(name_len.saturating_sub(1), "header section name")?,
            )
            .into_owned();
            let offset = reader.read_u32("header section offset")?;
            sections.insert(name, offset);
        }
        Ok(Self { sections })
    }

    pub fn section_offset(&self, name: &str) -> Result<u32, SearchError> {
        self.sections
            .get(name)
            .copied()
            .ok_or_else(|| SearchError::MissingSection(name.to_string()))
    }
}

/// Walk the dictionary trie for `term`; `None` when the term was never
/// indexed (no path or the final node is not a leaf).
fn dictionary_lookup(dictionary: &[u8], term: &str) -> Result<Option<u32>, SearchError> {
    let mut node_offset = 0usize;
    for symbol in term.bytes() {
        let mut reader = BinaryReader::new(dictionary);
        reader.seek(node_offset);
        let child_count = reader.read_u32("trie child count")? as usize;
        let letters = reader.read_bytes(child_count, "trie letters")?;
        let Some(child_pos) = letters.iter().position(|letter| *letter == symbol) else {
            return Ok(None);
        };
        reader.seek(node_offset + 4 + child_count + 4 * child_pos);
        node_offset = reader.read_u32("trie child offset")? as usize;
    }

    let mut reader = BinaryReader::new(dictionary);
    reader.seek(node_offset);
    let child_count = reader.read_u32("trie child count")? as usize;
    reader.seek(node_offset + 4 + child_count + 4 * child_count);
    let is_leaf = reader.read_u8("trie leaf flag")?;
    if is_leaf == 1 {
        Ok(Some(reader.read_u32("trie entry offset")?))
    } else {
        Ok(None)
    }
}

/// Parse one term's postings from the entries section.
fn read_term_postings(entries: &[u8], entry_offset: u32) -> Result<Postings, SearchError> {
    let mut reader = BinaryReader::new(entries);
    reader.seek(entry_offset as usize);
    let doc_count = reader.read_u32("entry doc count")?;
    let mut postings = Postings::new();
    for _ in 0..doc_count {
        let doc_offset = reader.read_u32("entry doc offset")?;
        let pos_count = reader.read_u32("entry position count")?;
        let mut positions = Vec::with_capacity(pos_count as usize);
        for _ in 0..pos_count {
            positions.push(reader.read_u32("entry position")? as u64);
        }
        postings.insert(doc_offset as u64, positions);
    }
    Ok(postings)
}

/// Memory-mapped binary index.
///
/// Document ids surfaced by this accessor are byte offsets into the docs
/// section, exactly as stored in the posting entries.
#[derive(Debug)]
pub struct BinaryIndexAccessor {
    mmap: Mmap,
    header: Header,
}

impl BinaryIndexAccessor {
    /// Map `<index_dir>/binary/binary` and parse its section directory.
    pub fn open(index_dir: &Path) -> Result<Self, SearchError> {
        let path = index_dir.join("binary").join("binary");
        let file = File::open(&path).map_err(|source| SearchError::IndexUnavailable {
            path: path.clone(),
            source,
        })?;
        // Safety: the index file is opened read-only and never truncated by
        // this process while mapped.
        let mmap = unsafe {
            Mmap::map(&file).map_err(|source| SearchError::IndexUnavailable { path, source })?
        };
        let header = Header::parse(&mmap)?;
        Ok(Self { mmap, header })
    }

    fn section(&self, name: &str) -> Result<&[u8], SearchError> {
        let offset = self.header.section_offset(name)? as usize;
        if offset > self.mmap.len() {
            return Err(SearchError::TruncatedIndex("section offset"));
        }
        Ok(&self.mmap[offset..])
    }

    fn postings(&self, term: &str) -> Result<Option<Postings>, SearchError> {
        let dictionary = self.section(SECTION_DICTIONARY)?;
        let Some(entry_offset) = dictionary_lookup(dictionary, term)? else {
            return Ok(None);
        };
        let entries = self.section(SECTION_ENTRIES)?;
        read_term_postings(entries, entry_offset).map(Some)
    }
}

impl IndexAccessor for BinaryIndexAccessor {
    fn load_document(&self, doc_id: u64) -> Result<String, SearchError> {
        let docs = self.section(SECTION_DOCS)?;
        let mut reader = BinaryReader::new(docs);
        reader.seek(doc_id as usize);
        let len = reader.read_u8("document length")? as usize;
        let bytes = reader.read_bytes(len.saturating_sub(1), "document text")?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn total_docs(&self) -> Result<u64, SearchError> {
        let docs = self.section(SECTION_DOCS)?;
        let mut reader = BinaryReader::new(docs);
        Ok(reader.read_u32("document count")? as u64)
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
