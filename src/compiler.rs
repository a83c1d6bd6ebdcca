//! Build-time compilation pipeline.
//!
//! Takes the flat list of registered deep links — `(template string, handler
//! type, optional method)` tuples, already expanded from any prefix × suffix
//! annotation combinations — and produces the serialized match index payload
//! plus the configurable-path-segment key set the host needs to validate
//! replacement maps.
//!
//! Compilation is two-phase by design: every template is parsed and the full
//! list sorted by [`priority_cmp`] once, then templates are inserted into
//! the trie in that order. Insertion order is what encodes priority in the
//! index, so sorting and insertion are never interleaved.
//!
//! Per-template failures (malformed or conflicting templates) are collected
//! as diagnostics against the owning entry and do not abort the batch: one
//! bad template must not hide the others.

use std::collections::BTreeSet;

use tracing::info;

use crate::error::DeepLinkError;
use crate::priority::priority_cmp;
use crate::template::{PathSegment, Template};
use crate::trie::Trie;

/// One registered deep link, as handed over by the declaration scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkEntry {
    /// URI template string, e.g. `airbnb://intentMethod/{var1}/{var2}`.
    pub uri_template: String,
    /// Fully qualified handler type name.
    pub handler: String,
    /// Static method on the handler type; `None` for class-level handlers.
    pub method: Option<String>,
}

impl DeepLinkEntry {
    /// A class-level deep link: the handler type itself is the target.
    pub fn class(uri_template: impl Into<String>, handler: impl Into<String>) -> Self {
        DeepLinkEntry {
            uri_template: uri_template.into(),
            handler: handler.into(),
            method: None,
        }
    }

    /// A method-level deep link. The method always carries its declaring
    /// type, so a method entry is never handler-less.
    pub fn method(
        uri_template: impl Into<String>,
        handler: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        DeepLinkEntry {
            uri_template: uri_template.into(),
            handler: handler.into(),
            method: Some(method.into()),
        }
    }

    fn location(&self) -> String {
        match &self.method {
            Some(m) => format!("{}#{}", self.handler, m),
            None => self.handler.clone(),
        }
    }
}

/// A per-entry compile failure, reported against the declaration that owns
/// the offending template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    /// `Handler` or `Handler#method` of the owning entry.
    pub location: String,
    pub error: DeepLinkError,
}

/// Output of a successful compilation pass.
#[derive(Debug, Clone)]
pub struct CompiledIndex {
    /// Serialized payload, chunked into opaque blocks.
    pub blocks: Vec<Vec<u8>>,
    /// Every `<key>` appearing in a compiled template. The host validates
    /// that a runtime replacement map covers these before matching.
    pub configurable_path_keys: BTreeSet<String>,
    /// Per-entry failures. Entries that produced a diagnostic are absent
    /// from the index; everything else compiled normally.
    pub diagnostics: Vec<CompileDiagnostic>,
    /// Number of templates that made it into the index.
    pub template_count: usize,
}

impl CompiledIndex {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Expand a set of URI-scheme prefixes against one template suffix. Every
/// prefix × suffix combination becomes an independent template string.
#[must_use]
pub fn expand_prefixes(prefixes: &[String], suffix: &str) -> Vec<String> {
    prefixes
        .iter()
        .map(|prefix| format!("{prefix}{suffix}"))
        .collect()
}

/// Compile registered entries into a serialized match index.
pub fn compile(entries: &[DeepLinkEntry]) -> CompiledIndex {
    let mut diagnostics = Vec::new();

    // Phase 1: parse everything, collecting per-entry failures.
    let mut templates: Vec<Template> = Vec::with_capacity(entries.len());
    for entry in entries {
        match Template::parse(&entry.uri_template, &entry.handler, entry.method.as_deref()) {
            Ok(template) => templates.push(template),
            Err(error) => diagnostics.push(CompileDiagnostic {
                location: entry.location(),
                error,
            }),
        }
    }

    // Phase 2: fix priority order once, then build.
    templates.sort_by(priority_cmp);

    let mut trie = Trie::new();
    let mut configurable_path_keys = BTreeSet::new();
    let mut inserted: u32 = 0;
    for template in &templates {
        match trie.insert(template, inserted) {
            Ok(()) => {
                inserted += 1;
                for segment in &template.path_segments {
                    if let PathSegment::ConfigurablePlaceholder(key) = segment {
                        configurable_path_keys.insert(key.clone());
                    }
                }
            }
            Err(error) => diagnostics.push(CompileDiagnostic {
                location: template.method.as_ref().map_or_else(
                    || template.handler.clone(),
                    |m| format!("{}#{}", template.handler, m),
                ),
                error,
            }),
        }
    }

    let blocks = crate::index::serialize(&trie);
    info!(
        templates = inserted,
        nodes = trie.node_count(),
        blocks = blocks.len(),
        diagnostics = diagnostics.len(),
        "Compiled deep link match index"
    );

    CompiledIndex {
        blocks,
        configurable_path_keys,
        diagnostics,
        template_count: inserted as usize,
    }
}

/// Print diagnostics to stderr in a compiler-like one-per-line format.
pub fn print_diagnostics(diagnostics: &[CompileDiagnostic]) {
    eprintln!(
        "\n{} deep link template issue(s) found:\n",
        diagnostics.len()
    );
    for d in diagnostics {
        eprintln!("[{}] {}", d.location, d.error);
    }
    eprintln!();
}
