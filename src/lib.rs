//! # linkdispatch
//!
//! **linkdispatch** compiles deep-link URI templates into a compact binary
//! match index at build time and routes incoming URIs to their registered
//! handler at runtime with a backtracking trie matcher.
//!
//! ## Overview
//!
//! Templates are URI patterns with literal segments, `{variable}` capture
//! segments and `<configurable>` placeholder segments, plus required query
//! parameter names:
//!
//! ```text
//! airbnb://example.com/deepLink
//! airbnb://intentMethod/{var1}/{var2}
//! https://example.com/<env>/promo?campaign
//! ```
//!
//! The build side folds every template into a scheme → host → path trie,
//! resolves priority among overlapping templates once via a deterministic
//! comparator, and serializes the trie into opaque byte blocks suitable for
//! embedding as constants in generated source. The runtime side decodes the
//! blocks into an immutable [`MatchIndex`] and answers, per URI, which
//! single template matches and what its `{variables}` captured.
//!
//! ## Architecture
//!
//! - **[`template`]** - URI template parsing and segment classification
//! - **[`priority`]** - total priority order over templates
//! - **[`trie`]** - arena-based match trie with terminal records
//! - **[`index`]** - binary serializer and validating loader
//! - **[`matcher`]** - backtracking runtime matcher
//! - **[`compiler`]** - two-phase build pipeline with per-template diagnostics
//! - **[`manifest`]** - YAML/JSON deep-link manifest loading
//! - **[`generator`]** - embeddable Rust source emission
//! - **[`cli`]** - the `linkdispatch-gen` binary
//!
//! ## Quick start
//!
//! ```
//! use linkdispatch::{compile, DeepLinkEntry, MatchIndex};
//!
//! let entries = vec![
//!     DeepLinkEntry::class("airbnb://example.com/deepLink", "com.example.MainActivity"),
//!     DeepLinkEntry::method(
//!         "airbnb://intentMethod/{var1}/{var2}",
//!         "com.example.SampleActivity",
//!         "intentFromTwoPathWithTwoParams",
//!     ),
//! ];
//! let compiled = compile(&entries);
//! assert!(compiled.is_clean());
//!
//! let index = MatchIndex::load(&compiled.blocks).unwrap();
//! let m = index.match_uri("airbnb://intentMethod/foo/bar").unwrap();
//! assert_eq!(m.method.as_deref(), Some("intentFromTwoPathWithTwoParams"));
//! assert_eq!(m.param("var1"), Some("foo"));
//! ```
//!
//! ## Concurrency
//!
//! Index construction runs once, single-threaded, at build time. A loaded
//! [`MatchIndex`] is immutable; matches are pure reads and may run on any
//! number of threads without synchronization.

pub mod cli;
pub mod compiler;
pub mod error;
pub mod generator;
pub mod index;
pub mod manifest;
pub mod matcher;
pub mod priority;
pub mod template;
pub mod trie;

pub use compiler::{compile, CompileDiagnostic, CompiledIndex, DeepLinkEntry};
pub use error::DeepLinkError;
pub use matcher::{MatchIndex, ParamVec, UriMatch, MAX_INLINE_PARAMS};
pub use template::{HandlerKind, PathSegment, Template};
pub use trie::{MatchRecord, Trie};
