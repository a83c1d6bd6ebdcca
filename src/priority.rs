//! Template priority ordering.
//!
//! The comparator fixes trie insertion order, which in turn decides which
//! terminal record wins when an incoming URI could satisfy several
//! overlapping templates. It is applied exactly once, over the whole parsed
//! template list, before any insertion (two-phase: sort, then build).
//!
//! Rules, applied until one is decisive:
//!
//! 1. more path segments first (longer paths are more specific)
//! 2. more required query parameters first
//! 3. fewer `{variable}` segments first (more literals are more specific)
//! 4. lexicographic `(template, method, handler)` as a stable final
//!    tie-break
//!
//! Rule 4 makes the order total for any pair of non-identical templates.
//! Byte-identical pairs are caught later by the trie builder as a
//! `ConflictingTemplate` diagnostic, never silently ranked.

use std::cmp::Ordering;

use crate::template::Template;

/// Compare two templates for match priority. `Ordering::Less` means `a`
/// ranks ahead of `b` and is inserted (and therefore matched) first.
#[must_use]
pub fn priority_cmp(a: &Template, b: &Template) -> Ordering {
    b.path_segments
        .len()
        .cmp(&a.path_segments.len())
        .then_with(|| b.query_params.len().cmp(&a.query_params.len()))
        .then_with(|| a.variable_count().cmp(&b.variable_count()))
        .then_with(|| tie_break_key(a).cmp(&tie_break_key(b)))
}

fn tie_break_key(t: &Template) -> (&str, &str, &str) {
    (
        t.uri_template.as_str(),
        t.method.as_deref().unwrap_or(""),
        t.handler.as_str(),
    )
}
