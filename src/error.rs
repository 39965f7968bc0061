//! Error types and exit codes for parity-matrix

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for parity-matrix operations
#[derive(Error, Debug)]
pub enum ParityError {
    #[error(
        "Could not discover workspace root from {start}; \
         expected directories sm64coopdx/ and sm64wiiu/"
    )]
    WorkspaceNotFound { start: String },

    #[error("Required directory missing: {path}")]
    MissingDirectory { path: String },

    #[error("Report serialization failed: {message}")]
    Serialize { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParityError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: IO error
    /// - 2: Configuration error (workspace undiscoverable, required directory absent)
    /// - 3: Report serialization failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::WorkspaceNotFound { .. } => ExitCode::from(2),
            Self::MissingDirectory { .. } => ExitCode::from(2),
            Self::Serialize { .. } => ExitCode::from(3),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for parity-matrix operations
pub type Result<T> = std::result::Result<T, ParityError>;
