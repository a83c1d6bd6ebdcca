//! Arena-based match trie.
//!
//! Templates are folded into a single trie spanning four levels:
//! scheme → host → path-segment chain → terminal records. Nodes live in a
//! flat arena (`Vec<TrieNode>`) and reference each other by index, which
//! keeps ownership trivial and makes the depth-first serialization order
//! deterministic.
//!
//! Two structural rules matter for matching semantics:
//!
//! - Every `{variable}` segment at a given position, regardless of name,
//!   collapses onto the node's single shared variable child. Variable names
//!   are recorded only in the terminal [`MatchRecord`]s.
//! - `<placeholder>` segments are stored as literal children keyed by their
//!   bracketed marker text, so the serialized trie stays self-describing and
//!   the matcher can resolve them through the replacement map.
//!
//! Records accumulate at a terminal node in insertion order. Because the
//! compiler sorts all templates by priority before inserting, the record
//! order *is* the priority order and the matcher never has to re-rank.

use std::collections::BTreeSet;

use crate::error::DeepLinkError;
use crate::template::{PathSegment, Template};

/// Index of a node inside the trie arena.
pub type NodeId = u32;

/// Terminal data for one inserted template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Raw template string, for diagnostics and for recovering variable
    /// names at match time.
    pub uri_template: String,
    /// Fully qualified handler type name.
    pub handler: String,
    /// Static method on the handler type, `None` for class-level handlers.
    pub method: Option<String>,
    /// Query parameter names that must be present on the incoming URI.
    pub required_query: BTreeSet<String>,
    /// Insertion priority; lower ranks first.
    pub ordinal: u32,
}

/// One trie node. Literal children keep insertion order; lookup is by exact
/// key, so order only affects serialization determinism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    pub(crate) children: Vec<(String, NodeId)>,
    pub(crate) variable_child: Option<NodeId>,
    pub(crate) records: Vec<MatchRecord>,
}

impl TrieNode {
    pub(crate) fn child(&self, key: &str) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, id)| id)
    }
}

/// The match trie. Node 0 is the root (scheme level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    pub(crate) nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    #[must_use]
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::default()],
        }
    }

    pub(crate) const ROOT: NodeId = 0;

    pub(crate) fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id as usize]
    }

    fn alloc(&mut self) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(TrieNode::default());
        id
    }

    fn child_or_insert(&mut self, node: NodeId, key: &str) -> NodeId {
        if let Some(id) = self.node(node).child(key) {
            return id;
        }
        let id = self.alloc();
        self.nodes[node as usize].children.push((key.to_string(), id));
        id
    }

    fn variable_child_or_insert(&mut self, node: NodeId) -> NodeId {
        if let Some(id) = self.node(node).variable_child {
            return id;
        }
        let id = self.alloc();
        self.nodes[node as usize].variable_child = Some(id);
        id
    }

    /// Insert a template as the record with the given priority ordinal.
    ///
    /// Templates must be inserted in priority order (the compiler sorts
    /// first). Fails with [`DeepLinkError::ConflictingTemplate`] when an
    /// earlier record at the same terminal node requires the same query
    /// parameter set: the two templates would be indistinguishable at match
    /// time and the later one could never win.
    pub fn insert(&mut self, template: &Template, ordinal: u32) -> Result<(), DeepLinkError> {
        let mut node = Self::ROOT;
        node = self.child_or_insert(node, &template.scheme);
        node = self.child_or_insert(node, &template.host);
        for segment in &template.path_segments {
            node = match segment {
                PathSegment::Literal(text) => self.child_or_insert(node, text),
                PathSegment::ConfigurablePlaceholder(key) => {
                    self.child_or_insert(node, &format!("<{key}>"))
                }
                PathSegment::Variable(_) => self.variable_child_or_insert(node),
            };
        }

        if let Some(existing) = self.nodes[node as usize]
            .records
            .iter()
            .find(|r| r.required_query == template.query_params)
        {
            return Err(DeepLinkError::ConflictingTemplate {
                template: template.uri_template.clone(),
                handler: template.handler.clone(),
                existing_template: existing.uri_template.clone(),
                existing_handler: existing.handler.clone(),
            });
        }

        self.nodes[node as usize].records.push(MatchRecord {
            uri_template: template.uri_template.clone(),
            handler: template.handler.clone(),
            method: template.method.clone(),
            required_query: template.query_params.clone(),
            ordinal,
        });
        Ok(())
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
