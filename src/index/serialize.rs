//! Match index serialization.
//!
//! The payload is a depth-first pre-order walk of the trie. Per node:
//!
//! ```text
//! node   := varint(child_count) u8(has_variable_child)
//!           { varint(key_len) key_bytes node }*child_count
//!           node?                              -- variable child, if flagged
//!           varint(record_count) record*
//! record := str(uri_template) str(handler) str(method; empty = class-level)
//!           varint(query_count) str(query_name)*
//! str    := varint(len) utf8_bytes
//! ```
//!
//! A three-byte header (`"LD"` magic plus a format version) precedes the
//! root node so a breaking format change is detectable instead of producing
//! garbage matches.
//!
//! The byte stream is exposed chunked into fixed-size opaque blocks; the
//! chunking exists for the hosting constant-pool format and carries no
//! semantics. Serialization is deterministic: children are emitted in
//! insertion order, which the compiler's pre-sort already fixed, and query
//! names come from an ordered set. Re-serializing a loaded index reproduces
//! the payload byte for byte.

use crate::trie::{NodeId, Trie};

use super::varint::write_u32;

/// Two magic bytes plus the format version.
pub(crate) const HEADER: [u8; 3] = [b'L', b'D', 1];

/// Maximum size of one serialized block.
pub const MAX_BLOCK_LEN: usize = 8 * 1024;

/// Serialize the trie into the raw, unchunked payload.
#[must_use]
pub fn serialize_bytes(trie: &Trie) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    out.extend_from_slice(&HEADER);
    encode_node(trie, Trie::ROOT, &mut out);
    out
}

/// Serialize the trie into opaque blocks of at most [`MAX_BLOCK_LEN`] bytes.
#[must_use]
pub fn serialize(trie: &Trie) -> Vec<Vec<u8>> {
    serialize_bytes(trie)
        .chunks(MAX_BLOCK_LEN)
        .map(<[u8]>::to_vec)
        .collect()
}

fn write_str(out: &mut Vec<u8>, s: &str) {
    write_u32(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}

fn encode_node(trie: &Trie, id: NodeId, out: &mut Vec<u8>) {
    let node = trie.node(id);

    write_u32(out, node.children.len() as u32);
    out.push(u8::from(node.variable_child.is_some()));
    for (key, child) in &node.children {
        write_str(out, key);
        encode_node(trie, *child, out);
    }
    if let Some(var_child) = node.variable_child {
        encode_node(trie, var_child, out);
    }

    write_u32(out, node.records.len() as u32);
    for record in &node.records {
        write_str(out, &record.uri_template);
        write_str(out, &record.handler);
        write_str(out, record.method.as_deref().unwrap_or(""));
        write_u32(out, record.required_query.len() as u32);
        for name in &record.required_query {
            write_str(out, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;

    fn sample_trie() -> Trie {
        let mut trie = Trie::new();
        let templates = [
            "app://host/a/b",
            "app://host/a/{x}",
            "app://host/a?foo=1",
        ];
        for (i, raw) in templates.iter().enumerate() {
            let t = Template::parse(raw, "com.example.Handler", None).unwrap();
            trie.insert(&t, i as u32).unwrap();
        }
        trie
    }

    #[test]
    fn test_payload_starts_with_header() {
        let bytes = serialize_bytes(&sample_trie());
        assert_eq!(&bytes[..3], &HEADER);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let trie = sample_trie();
        assert_eq!(serialize_bytes(&trie), serialize_bytes(&trie));
    }

    #[test]
    fn test_blocks_respect_max_len_and_concatenate() {
        let trie = sample_trie();
        let blocks = serialize(&trie);
        assert!(blocks.iter().all(|b| b.len() <= MAX_BLOCK_LEN));
        let joined: Vec<u8> = blocks.concat();
        assert_eq!(joined, serialize_bytes(&trie));
    }
}
