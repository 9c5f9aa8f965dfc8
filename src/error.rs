//! Error types for the annoforest library.

use thiserror::Error;

use crate::validation::MismatchKind;

/// Errors that can occur during annoforest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A JSON feature table could not be decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// The assembled mRNA of a transcript does not start with its UTR5 (or UTR5 + CDS).
    /// Reported by the consistency checker, separately from annotation issues
    /// recorded when the hierarchy was built.
    #[error("sequence assembly mismatch for transcript {transcript_id}: {kind}")]
    SequenceMismatch {
        transcript_id: String,
        kind: MismatchKind,
    },
}
