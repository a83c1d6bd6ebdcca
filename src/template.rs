//! URI template parsing.
//!
//! A template string such as `airbnb://intentMethod/{var1}/{var2}?tab=all`
//! is split into a scheme, a host, an ordered list of path segments and a set
//! of query parameter *names*. Each path segment is classified:
//!
//! - `{name}`  → [`PathSegment::Variable`], bound from the incoming URI at
//!   match time
//! - `<key>`   → [`PathSegment::ConfigurablePlaceholder`], substituted from a
//!   caller-supplied replacement map before matching and treated as a literal
//!   thereafter
//! - anything else → [`PathSegment::Literal`]
//!
//! Query parameter values are not constrained by a template; only the names
//! are recorded and enforced as a required subset at match time.

use std::collections::BTreeSet;

use crate::error::DeepLinkError;

/// Whether a matched template dispatches to a class or to a static method on
/// that class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Class,
    Method,
}

/// One segment of a template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Matches the incoming segment byte-for-byte.
    Literal(String),
    /// Matches any incoming segment and captures it under the given name.
    Variable(String),
    /// Matches an incoming segment equal to the replacement configured for
    /// the given key. Not captured.
    ConfigurablePlaceholder(String),
}

impl PathSegment {
    /// Classify a raw path segment. Only a segment fully wrapped in `{}` or
    /// `<>` is a placeholder; partial wrapping stays literal.
    fn classify(raw: &str) -> PathSegment {
        if raw.len() > 2 && raw.starts_with('{') && raw.ends_with('}') {
            PathSegment::Variable(raw[1..raw.len() - 1].to_string())
        } else if raw.len() > 2 && raw.starts_with('<') && raw.ends_with('>') {
            PathSegment::ConfigurablePlaceholder(raw[1..raw.len() - 1].to_string())
        } else {
            PathSegment::Literal(raw.to_string())
        }
    }
}

/// A parsed URI template together with its handler binding.
///
/// Immutable once parsed. Built only at compile time; the runtime matcher
/// never sees `Template` values, only the serialized trie they were folded
/// into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// The raw template string, kept for diagnostics and tie-breaking.
    pub uri_template: String,
    /// Literal scheme, e.g. `airbnb` or `https`. No variable capture.
    pub scheme: String,
    /// Literal host, possibly empty. No variable capture.
    pub host: String,
    /// Ordered path segments.
    pub path_segments: Vec<PathSegment>,
    /// Names of query parameters the template requires to be present.
    pub query_params: BTreeSet<String>,
    /// Fully qualified handler type name.
    pub handler: String,
    /// Static method on the handler type, absent for class-level handlers.
    pub method: Option<String>,
    pub kind: HandlerKind,
}

impl Template {
    /// Parse a raw template string and bind it to a handler.
    ///
    /// Fails with [`DeepLinkError::MalformedTemplate`] when the string has no
    /// scheme, an empty scheme, or an empty variable/placeholder name.
    pub fn parse(
        raw: &str,
        handler: &str,
        method: Option<&str>,
    ) -> Result<Template, DeepLinkError> {
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| DeepLinkError::malformed(raw, "missing `://` scheme separator"))?;
        if scheme.is_empty() {
            return Err(DeepLinkError::malformed(raw, "empty scheme"));
        }
        if scheme.contains(['{', '}', '<', '>']) {
            return Err(DeepLinkError::malformed(
                raw,
                "scheme does not support placeholders",
            ));
        }

        let (authority_and_path, query) = match rest.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (rest, None),
        };

        let (host, path) = match authority_and_path.split_once('/') {
            Some((h, p)) => (h, p),
            None => (authority_and_path, ""),
        };
        if host.contains(['{', '}', '<', '>']) {
            return Err(DeepLinkError::malformed(
                raw,
                "host does not support placeholders",
            ));
        }

        let mut path_segments = Vec::new();
        for seg in path.split('/').filter(|s| !s.is_empty()) {
            match PathSegment::classify(seg) {
                PathSegment::Literal(text) if text == "{}" || text == "<>" => {
                    return Err(DeepLinkError::malformed(raw, "empty placeholder name"));
                }
                segment => path_segments.push(segment),
            }
        }

        let mut query_params = BTreeSet::new();
        if let Some(query) = query {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let name = pair.split_once('=').map_or(pair, |(n, _)| n);
                if name.is_empty() {
                    return Err(DeepLinkError::malformed(raw, "empty query parameter name"));
                }
                query_params.insert(name.to_string());
            }
        }

        Ok(Template {
            uri_template: raw.to_string(),
            scheme: scheme.to_string(),
            host: host.to_string(),
            path_segments,
            query_params,
            handler: handler.to_string(),
            method: method.map(str::to_string),
            kind: if method.is_some() {
                HandlerKind::Method
            } else {
                HandlerKind::Class
            },
        })
    }

    /// Number of `Variable` segments in the path. Used by the priority
    /// comparator: fewer variables means a more specific template.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.path_segments
            .iter()
            .filter(|s| matches!(s, PathSegment::Variable(_)))
            .count()
    }
}

/// Extract the `{name}` variable names of a template's path, in segment
/// order. Used by the matcher to map captured segment texts back to names
/// once a terminal record wins.
pub(crate) fn variable_names(uri_template: &str) -> Vec<String> {
    let Some((_, rest)) = uri_template.split_once("://") else {
        return Vec::new();
    };
    let path_part = rest.split_once('?').map_or(rest, |(p, _)| p);
    let path = path_part.split_once('/').map_or("", |(_, p)| p);
    path.split('/')
        .filter_map(|seg| match PathSegment::classify(seg) {
            PathSegment::Variable(name) => Some(name),
            _ => None,
        })
        .collect()
}
