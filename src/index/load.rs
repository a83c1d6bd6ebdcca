//! Match index loading.
//!
//! Mirror decode of the format in [`super::serialize`]. Every declared
//! length is bounds-checked against the remaining buffer; a truncated
//! payload, an out-of-range varint, an invalid UTF-8 string or trailing
//! bytes after the root node all fail with
//! [`DeepLinkError::CorruptIndex`](crate::DeepLinkError::CorruptIndex).
//! There is no partial result: either the whole index decodes or none of it
//! does.

use std::collections::BTreeSet;

use crate::error::DeepLinkError;
use crate::matcher::MatchIndex;
use crate::trie::{MatchRecord, NodeId, Trie, TrieNode};

use super::serialize::HEADER;
use super::varint::read_u32;

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn read_u8(&mut self) -> Result<u8, DeepLinkError> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| DeepLinkError::corrupt(self.pos, "truncated payload"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_varint(&mut self) -> Result<u32, DeepLinkError> {
        read_u32(self.buf, &mut self.pos)
    }

    fn read_str(&mut self) -> Result<String, DeepLinkError> {
        let len = self.read_varint()? as usize;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|&e| e <= self.buf.len())
            .ok_or_else(|| DeepLinkError::corrupt(start, "string length exceeds payload"))?;
        self.pos = end;
        String::from_utf8(self.buf[start..end].to_vec())
            .map_err(|_| DeepLinkError::corrupt(start, "string is not valid UTF-8"))
    }
}

/// Decode serialized blocks into an immutable [`MatchIndex`].
///
/// Blocks are concatenated before decoding; the chunk boundaries carry no
/// meaning.
pub fn load<B: AsRef<[u8]>>(blocks: &[B]) -> Result<MatchIndex, DeepLinkError> {
    let payload: Vec<u8> = blocks
        .iter()
        .flat_map(|b| b.as_ref().iter().copied())
        .collect();
    load_bytes(&payload)
}

pub(crate) fn load_bytes(payload: &[u8]) -> Result<MatchIndex, DeepLinkError> {
    if payload.len() < HEADER.len() || payload[..2] != HEADER[..2] {
        return Err(DeepLinkError::corrupt(0, "missing LD magic"));
    }
    if payload[2] != HEADER[2] {
        return Err(DeepLinkError::corrupt(
            2,
            format!("unsupported format version {}", payload[2]),
        ));
    }

    let mut reader = Reader {
        buf: payload,
        pos: HEADER.len(),
    };
    let mut trie = Trie {
        nodes: vec![TrieNode::default()],
    };
    decode_node(&mut reader, &mut trie, Trie::ROOT)?;
    if reader.pos != payload.len() {
        return Err(DeepLinkError::corrupt(
            reader.pos,
            "trailing bytes after root node",
        ));
    }
    Ok(MatchIndex::from_trie(trie))
}

fn decode_node(reader: &mut Reader<'_>, trie: &mut Trie, id: NodeId) -> Result<(), DeepLinkError> {
    let child_count = reader.read_varint()?;
    let has_variable = match reader.read_u8()? {
        0 => false,
        1 => true,
        other => {
            return Err(DeepLinkError::corrupt(
                reader.pos - 1,
                format!("invalid variable-child flag {other}"),
            ))
        }
    };

    for _ in 0..child_count {
        let key = reader.read_str()?;
        let child = alloc_node(trie);
        trie.nodes[id as usize].children.push((key, child));
        decode_node(reader, trie, child)?;
    }
    if has_variable {
        let child = alloc_node(trie);
        trie.nodes[id as usize].variable_child = Some(child);
        decode_node(reader, trie, child)?;
    }

    let record_count = reader.read_varint()?;
    for ordinal in 0..record_count {
        let uri_template = reader.read_str()?;
        let handler = reader.read_str()?;
        let method = reader.read_str()?;
        let query_count = reader.read_varint()?;
        let mut required_query = BTreeSet::new();
        for _ in 0..query_count {
            required_query.insert(reader.read_str()?);
        }
        trie.nodes[id as usize].records.push(MatchRecord {
            uri_template,
            handler,
            method: (!method.is_empty()).then_some(method),
            required_query,
            ordinal,
        });
    }
    Ok(())
}

fn alloc_node(trie: &mut Trie) -> NodeId {
    let id = trie.nodes.len() as NodeId;
    trie.nodes.push(TrieNode::default());
    id
}
