// src/error.rs

//! Error types for the backport pipeline

use thiserror::Error;

/// Errors raised while repairing the terminfo entry
///
/// The pipeline is fail-fast: the first error terminates the run. Detailed
/// operator guidance (expected versus actual version strings, shell setup
/// advice) is printed at the point of detection; these variants only carry
/// what the exit path needs.
#[derive(Error, Debug)]
pub enum Error {
    /// A required external tool could not be found
    #[error("{0}")]
    ToolNotFound(String),

    /// A required subprocess could not be launched or exited non-zero
    #[error("{0}")]
    CommandFailed(String),

    /// A tool reported a version fingerprint other than the expected one
    #[error("unexpected version string from {tool}")]
    VersionMismatch { tool: String },

    /// A dotted version string contained a non-numeric component
    #[error("invalid version component in '{0}'")]
    InvalidVersion(String),

    /// The user's home directory could not be determined
    #[error("could not determine the user home directory")]
    NoHomeDir,

    /// Filesystem error while staging or installing terminfo data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
