use thiserror::Error;

/// Errors raised by the extraction layer.
///
/// Conversion deliberately has no error type of its own: malformed rule
/// entries degrade to plain text or empty output rather than failing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The requested top-level key has no line of its own in the document.
    #[error("section `{key}:` not found in source document")]
    SectionNotFound { key: String },
}
