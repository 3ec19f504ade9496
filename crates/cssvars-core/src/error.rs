//! Error types for cssvars-core.
//!
//! Problems in the variable data itself are never errors; they are reported
//! as [`Diagnostic`](crate::Diagnostic)s so the rest of a build can proceed.

use std::path::PathBuf;

/// Result type for cssvars-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading options or writing output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read an options file.
    #[error("failed to read file {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Failed to write a generated stylesheet.
    #[error("failed to write file {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Two modules would be written to the same file.
    #[error("modules {first} and {second} both map to output file {file_name}")]
    FileNameConflict {
        file_name: String,
        first: String,
        second: String,
    },

    /// Options could not be deserialized.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
