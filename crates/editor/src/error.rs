//! Editor error types.
//!
//! The tree-mutation engine never errors for well-formed input — absent ids
//! are silent no-ops and malformed props are coerced. Errors exist only at
//! the edges: parsing a structured payload, and external collaborator
//! failures surfaced at the call site with core state left unchanged.

use thiserror::Error;

/// Errors surfaced by the editor's outer surfaces.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A structured document payload could not be parsed at all.
    #[error("malformed document payload")]
    Import(#[from] serde_json::Error),

    /// An external collaborator (AI text service) failed or returned an
    /// unusable response.
    #[error("collaborator request failed: {0}")]
    Collaborator(String),
}

/// Result type alias using [`EditorError`].
pub type EditorResult<T> = Result<T, EditorError>;
