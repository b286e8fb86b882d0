//! Error types for sweep operations

use thiserror::Error;

/// Core error type for sweep operations
#[derive(Error, Debug)]
pub enum SweepError {
    /// E001: A ref listing line did not split into 2 or 3 fields
    #[error("E001: expected 2 or 3 fields on ref line {line_number}, got {token_count}: {line:?}")]
    MalformedInput {
        line_number: usize,
        token_count: usize,
        line: String,
    },

    /// E002: A git command exited unsuccessfully
    #[error("E002: `{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// E003: The git binary could not be started
    #[error("E003: git not found (tried `{program}`)")]
    GitNotFound { program: String },

    /// Configuration error
    #[error("E004: configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("E005: IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Get the error code (e.g., "E001", "E002")
    pub fn code(&self) -> &'static str {
        match self {
            SweepError::MalformedInput { .. } => "E001",
            SweepError::CommandFailed { .. } => "E002",
            SweepError::GitNotFound { .. } => "E003",
            SweepError::Config(_) => "E004",
            SweepError::Io(_) => "E005",
        }
    }

    /// Get the line number associated with this error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            SweepError::MalformedInput { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::MalformedInput { .. } => 2,
            SweepError::CommandFailed { .. } | SweepError::Io(_) => 1,
            SweepError::GitNotFound { .. } => 3,
            SweepError::Config(_) => 4,
        }
    }
}
