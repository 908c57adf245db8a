//! Error taxonomy shared by every crate in the workspace.
//!
//! Library code reports failures through [`SequenceError`]; the binaries
//! abort the whole run on the first one.

use std::path::PathBuf;

/// Errors that can occur while generating, reading or scoring sequences.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// A parameter or token that should have been an integer (or lie in a
    /// given range) was not.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A corpus line that does not have the `<name> <csv>` shape.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("failed to decode dataset {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SequenceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SequenceError::InvalidInput(message.into())
    }

    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SequenceError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
