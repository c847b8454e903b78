//! Archive error types.

use thiserror::Error;

/// Errors that can occur while packaging a configset into a zip archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The temporary archive file could not be created.
    #[error("Failed to create archive: {0}")]
    CreateError(#[source] std::io::Error),

    /// A member could not be written into the archive.
    #[error("Failed to write archive member {name}: {message}")]
    WriteError { name: String, message: String },

    /// The archive could not be finalized or read back.
    #[error("Failed to finalize archive: {0}")]
    FinalizeError(String),
}

impl ArchiveError {
    /// Create a member write error.
    pub fn write(name: impl Into<String>, msg: impl ToString) -> Self {
        Self::WriteError {
            name: name.into(),
            message: msg.to_string(),
        }
    }

    /// Create a finalize error.
    pub fn finalize(msg: impl ToString) -> Self {
        Self::FinalizeError(msg.to_string())
    }
}
