//! Error taxonomy for deep-link compilation and index loading.
//!
//! Build-time failures (`MalformedTemplate`, `ConflictingTemplate`) are scoped
//! to a single template: the compiler collects them as diagnostics and keeps
//! processing the rest of the batch. `CorruptIndex` is a runtime decode
//! failure and aborts index loading entirely, since a half-decoded index would
//! silently misroute.
//!
//! A URI that matches nothing is *not* an error. The matcher returns
//! `Option::None` for that case.

use thiserror::Error;

/// Failures produced while compiling templates into a match index or while
/// decoding a serialized index back into memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeepLinkError {
    /// The template string could not be parsed into scheme, host, path
    /// segments and query parameter names.
    #[error("malformed template `{template}`: {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// Two templates are structurally indistinguishable at match time: same
    /// scheme, host, path-segment shape and required query set. The later
    /// (lower-priority) one is rejected so it cannot silently shadow.
    #[error(
        "template `{template}` for `{handler}` conflicts with `{existing_template}` for `{existing_handler}`"
    )]
    ConflictingTemplate {
        template: String,
        handler: String,
        existing_template: String,
        existing_handler: String,
    },

    /// The serialized match index payload failed to decode. Indicates a
    /// build/runtime skew or a corrupted embedded constant.
    #[error("corrupt match index at byte {offset}: {reason}")]
    CorruptIndex { offset: usize, reason: String },
}

impl DeepLinkError {
    pub(crate) fn malformed(template: impl Into<String>, reason: impl Into<String>) -> Self {
        DeepLinkError::MalformedTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(offset: usize, reason: impl Into<String>) -> Self {
        DeepLinkError::CorruptIndex {
            offset,
            reason: reason.into(),
        }
    }
}
