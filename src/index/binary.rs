//! Binary on-disk index format.
//!
//! Single file at `<index>/binary/binary`, integers little-endian:
//!
//!   - header: u8 section count, then per section a u8 holding
//!     `name.len() + 1`, the name bytes and a u32 absolute file offset.
//!   - `dictionary`: serialized trie. Per node: u32 child count, one byte
//!     per child letter, one u32 per child with its absolute offset within
//!     the section, u8 leaf flag, and for leaves a u32 offset into the
//!     entries section.
//!   - `entries`: per term a u32 document count, then per document a u32
//!     offset into the docs section, a u32 position count and the u32
//!     positions.
//!   - `docs`: u32 document count, then per document a u8 holding
//!     `text.len() + 1` and the text bytes. Documents are addressed by their
//!     byte offset within this section, which doubles as the document id
//!     surfaced in search results.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::IndexError;

use super::Index;

pub const SECTION_DICTIONARY: &str = "dictionary";
pub const SECTION_ENTRIES: &str = "entries";
pub const SECTION_DOCS: &str = "docs";

/// Longest document text the u8 length prefix can describe.
pub const MAX_DOCUMENT_LEN: usize = u8::MAX as usize - 1;

/// Growable little-endian write buffer with offset patching.
#[derive(Debug, Default)]
pub struct BinaryBuffer {
    data: Vec<u8>,
}

impl BinaryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Overwrite a previously written u32 at `offset`.
    pub fn patch_u32(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Prefix trie over term bytes, serialized as the dictionary section.
#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    entry_offset: Option<u32>,
}

#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn add(&mut self, term: &str, entry_offset: u32) {
        let mut node = &mut self.root;
        for byte in term.bytes() {
            node = node.children.entry(byte).or_default();
        }
        node.entry_offset = Some(entry_offset);
    }

    pub fn serialize(&self, buf: &mut BinaryBuffer) {
        Self::serialize_node(&self.root, buf);
    }

    /// Write one node and its subtree; returns the node's offset within the
    /// section. Child offset slots are patched once each child is placed.
    fn serialize_node(node: &TrieNode, buf: &mut BinaryBuffer) -> u32 {
        let start = buf.len() as u32;
        buf.put_u32(node.children.len() as u32);
        for letter in node.children.keys() {
            buf.put_u8(*letter);
        }
        let mut offset_slot = buf.len();
        for _ in 0..node.children.len() {
            buf.put_u32(u32::MAX);
        }
        match node.entry_offset {
            Some(entry_offset) => {
                buf.put_u8(1);
                buf.put_u32(entry_offset);
            }
            None => buf.put_u8(0),
        }
        for child in node.children.values() {
            let child_offset = Self::serialize_node(child, buf);
            buf.patch_u32(offset_slot, child_offset);
            offset_slot += 4;
        }
        start
    }
}

fn write_header(buf: &mut BinaryBuffer) -> Vec<usize> {
    let sections = [SECTION_DICTIONARY, SECTION_ENTRIES, SECTION_DOCS];
    buf.put_u8(sections.len() as u8);
    let mut offset_slots = Vec::with_capacity(sections.len());
    for name in sections {
        buf.put_u8(name.len() as u8 + 1);
        buf.put_bytes(name.as_bytes());
        offset_slots.push(buf.len());
        buf.put_u32(0);
    }
    offset_slots
}

fn write_docs(buf: &mut BinaryBuffer, index: &Index) -> Result<BTreeMap<u64, u32>, IndexError> {
    let mut doc_offsets = BTreeMap::new();
    buf.put_u32(index.doc_count() as u32);
    for (doc_id, text) in index.docs() {
        if text.len() > MAX_DOCUMENT_LEN {
            return Err(IndexError::DocumentTooLong {
                id: *doc_id,
                len: text.len(),
                max: MAX_DOCUMENT_LEN,
            });
        }
        doc_offsets.insert(*doc_id, buf.len() as u32);
        buf.put_u8(text.len() as u8 + 1);
        buf.put_bytes(text.as_bytes());
    }
    Ok(doc_offsets)
}

fn write_entries(
    buf: &mut BinaryBuffer,
    index: &Index,
    doc_offsets: &BTreeMap<u64, u32>,
) -> BTreeMap<String, u32> {
    let mut entry_offsets = BTreeMap::new();
    for (term, postings) in index.entries() {
        entry_offsets.insert(term.clone(), buf.len() as u32);
        buf.put_u32(postings.len() as u32);
        for (doc_id, positions) in postings {
            buf.put_u32(doc_offsets[doc_id]);
            buf.put_u32(positions.len() as u32);
            for pos in positions {
                buf.put_u32(*pos as u32);
            }
        }
    }
    entry_offsets
}

fn write_dictionary(buf: &mut BinaryBuffer, entry_offsets: &BTreeMap<String, u32>) {
    let mut trie = Trie::default();
    for (term, entry_offset) in entry_offsets {
        trie.add(term, *entry_offset);
    }
    trie.serialize(buf);
}

/// Writes an [`Index`] in the binary format.
pub struct BinaryIndexWriter;

impl BinaryIndexWriter {
    pub fn write(index_dir: &Path, index: &Index) -> Result<(), IndexError> {
        let mut header = BinaryBuffer::new();
        let mut dictionary = BinaryBuffer::new();
        let mut entries = BinaryBuffer::new();
        let mut docs = BinaryBuffer::new();

        let offset_slots = write_header(&mut header);
        let doc_offsets = write_docs(&mut docs, index)?;
        let entry_offsets = write_entries(&mut entries, index, &doc_offsets);
        write_dictionary(&mut dictionary, &entry_offsets);

        let dictionary_offset = header.len() as u32;
        let entries_offset = dictionary_offset + dictionary.len() as u32;
        let docs_offset = entries_offset + entries.len() as u32;
        header.patch_u32(offset_slots[0], dictionary_offset);
        header.patch_u32(offset_slots[1], entries_offset);
        header.patch_u32(offset_slots[2], docs_offset);

        let dir = index_dir.join("binary");
        fs::create_dir_all(&dir).map_err(|source| IndexError::Io {
            path: dir.clone(),
            source,
        })?;
        let path = dir.join("binary");
        let mut payload =
            Vec::with_capacity(header.len() + dictionary.len() + entries.len() + docs.len());
        payload.extend_from_slice(header.as_slice());
        payload.extend_from_slice(dictionary.as_slice());
        payload.extend_from_slice(entries.as_slice());
        payload.extend_from_slice(docs.as_slice());
        fs::write(&path, payload).map_err(|source| IndexError::Io { path, source })?;
        Ok(())
    }
}
