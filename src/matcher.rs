//! Runtime URI matching against a loaded index.
//!
//! The loaded trie is immutable, so a single [`MatchIndex`] can serve
//! unlimited concurrent matches without synchronization. Matching is pure
//! computation: no I/O, no blocking, no cancellation concept.
//!
//! ## Algorithm
//!
//! The incoming URI is split into scheme, host, path segments and present
//! query-parameter names. Scheme and host descend by exact literal lookup
//! (no variable capture at those levels). Each path segment then tries, in
//! order:
//!
//! 1. the literal child with exactly that key
//! 2. any `<placeholder>` child whose configured replacement equals the
//!    segment text
//! 3. the shared variable child, capturing the segment text
//!
//! A dead end backtracks to the remaining alternatives at the previous
//! depth. At path exhaustion the first terminal record whose required query
//! set is a subset of the present query names wins. Records are stored in
//! priority order and literal branches are walked before the variable
//! branch, so the first complete match found is the highest-priority one —
//! no exhaustive candidate enumeration is needed.

use std::collections::{BTreeSet, HashMap};

use smallvec::SmallVec;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::DeepLinkError;
use crate::template::variable_names;
use crate::trie::{MatchRecord, NodeId, Trie};

/// Maximum number of captured path variables before heap allocation.
/// Deep-link templates rarely carry more than a handful of `{variables}`.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated storage for captured path variables.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a URI against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriMatch {
    /// Template string that won, for diagnostics.
    pub uri_template: String,
    /// Fully qualified handler type name.
    pub handler: String,
    /// Static method on the handler type, `None` for class-level handlers.
    pub method: Option<String>,
    /// Captured path variables in template order.
    pub params: ParamVec,
}

impl UriMatch {
    /// Look up a captured path variable by name.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Copy the captured variables into a map. Allocates; prefer
    /// [`UriMatch::param`] on hot paths.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

/// An immutable, matchable deep-link index decoded from its serialized
/// payload. Build once per process, share read-only across threads.
#[derive(Debug, Clone)]
pub struct MatchIndex {
    trie: Trie,
}

impl MatchIndex {
    pub(crate) fn from_trie(trie: Trie) -> Self {
        MatchIndex { trie }
    }

    /// Decode an index from raw payload blocks.
    pub fn load<B: AsRef<[u8]>>(blocks: &[B]) -> Result<Self, DeepLinkError> {
        crate::index::load(blocks)
    }

    /// Decode an index from base64-encoded blocks, the form the code
    /// generator embeds in generated source.
    pub fn load_base64(blocks: &[&str]) -> Result<Self, DeepLinkError> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let mut decoded = Vec::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            decoded.push(STANDARD.decode(block).map_err(|e| {
                DeepLinkError::corrupt(0, format!("block {i} is not valid base64: {e}"))
            })?);
        }
        crate::index::load(&decoded)
    }

    /// Re-serialize the loaded index. Produces a payload byte-identical to
    /// the one this index was loaded from.
    #[must_use]
    pub fn to_blocks(&self) -> Vec<Vec<u8>> {
        crate::index::serialize(&self.trie)
    }

    /// Match a URI with no configurable-segment replacements.
    #[must_use]
    pub fn match_uri(&self, uri: &str) -> Option<UriMatch> {
        self.match_uri_with(uri, &HashMap::new())
    }

    /// Match a URI, resolving `<placeholder>` template segments through the
    /// given replacement map.
    ///
    /// Returns `None` when the URI does not parse or no registered template
    /// accepts it. No-match is a normal outcome, not an error.
    #[must_use]
    pub fn match_uri_with(
        &self,
        uri: &str,
        replacements: &HashMap<String, String>,
    ) -> Option<UriMatch> {
        debug!(uri = %uri, "Deep link match attempt");

        let parsed = match Url::parse(uri) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(uri = %uri, error = %e, "Unroutable URI, no match");
                return None;
            }
        };
        let scheme = parsed.scheme();
        let host = parsed.host_str().unwrap_or("");
        let segments: Vec<&str> = parsed
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let present_query: BTreeSet<String> = parsed
            .query_pairs()
            .map(|(name, _)| name.into_owned())
            .collect();

        let scheme_node = self.trie.node(Trie::ROOT).child(scheme)?;
        let host_node = self.trie.node(scheme_node).child(host)?;

        let mut captured: Vec<String> = Vec::new();
        let record = self.walk(
            host_node,
            &segments,
            replacements,
            &present_query,
            &mut captured,
        );

        match record {
            Some(record) => {
                let names = variable_names(&record.uri_template);
                let params: ParamVec = names.into_iter().zip(captured).collect();
                info!(
                    uri = %uri,
                    template = %record.uri_template,
                    handler = %record.handler,
                    method = record.method.as_deref().unwrap_or("<class>"),
                    params = ?params,
                    "Deep link matched"
                );
                Some(UriMatch {
                    uri_template: record.uri_template.clone(),
                    handler: record.handler.clone(),
                    method: record.method.clone(),
                    params,
                })
            }
            None => {
                warn!(uri = %uri, "No deep link matched");
                None
            }
        }
    }

    /// Depth-first walk with backtracking. Captured segment texts are pushed
    /// on variable descent and popped when that branch dead-ends.
    fn walk<'a>(
        &'a self,
        node: NodeId,
        segments: &[&str],
        replacements: &HashMap<String, String>,
        present_query: &BTreeSet<String>,
        captured: &mut Vec<String>,
    ) -> Option<&'a MatchRecord> {
        let current = self.trie.node(node);

        if segments.is_empty() {
            // Records are in priority order; first satisfiable query set wins.
            return current
                .records
                .iter()
                .find(|r| r.required_query.is_subset(present_query));
        }

        let segment = segments[0];
        let remaining = &segments[1..];

        if let Some(child) = current.child(segment) {
            if let Some(record) =
                self.walk(child, remaining, replacements, present_query, captured)
            {
                return Some(record);
            }
        }

        for (key, child) in &current.children {
            let Some(placeholder) = key
                .strip_prefix('<')
                .and_then(|k| k.strip_suffix('>'))
            else {
                continue;
            };
            if replacements.get(placeholder).map(String::as_str) == Some(segment) {
                if let Some(record) =
                    self.walk(*child, remaining, replacements, present_query, captured)
                {
                    return Some(record);
                }
            }
        }

        if let Some(var_child) = current.variable_child {
            captured.push(segment.to_string());
            if let Some(record) =
                self.walk(var_child, remaining, replacements, present_query, captured)
            {
                return Some(record);
            }
            captured.pop();
        }

        None
    }
}
