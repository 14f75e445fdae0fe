//! Error types for the resfit-core library.
//!
//! All fallible operations in the crate return [`CoreResult`]. Per-file
//! pipeline failures (`Probe`, `NoEligibleCandidate`, `InvalidPlan`,
//! `ExecutorFailure`) are recorded in the batch report instead of aborting
//! the batch; the remaining variants describe batch-level problems.

use crate::resolution::Resolution;
use crate::selector::SelectionPolicy;

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for resfit-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("No matching video files found in the input directory")]
    NoFilesFound,

    #[error("Required dependency '{0}' not found. Is it installed and in PATH?")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("No eligible standard resolution for {observed} under the {policy} policy")]
    NoEligibleCandidate {
        observed: Resolution,
        policy: SelectionPolicy,
    },

    #[error("Invalid transform plan: {0}")]
    InvalidPlan(String),

    #[error("Transform execution failed: {0}")]
    ExecutorFailure(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for resfit-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds the error returned when an external command cannot be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds the error returned when waiting on a spawned command fails.
pub fn command_wait_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

/// Builds the error returned when an external command exits unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(command.into(), status, stderr.into())
}
