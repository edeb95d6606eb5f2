//! Error types for molextent.

use thiserror::Error;

/// Errors that can occur while converting PAF mappings to molecule extents.
#[derive(Debug, Error)]
pub enum MolextentError {
    /// IO error during file reading/writing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A PAF row that cannot be parsed: too few columns, or a non-numeric
    /// value in a numeric column. Fatal; there is no per-row recovery.
    #[error("malformed PAF row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}
