/*!
 * Error types for the srtproc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with subtitle data
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timecode did not match the HH:MM:SS,mmm pattern
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    /// A timing line did not contain two valid timecodes
    #[error("Invalid timing line: {0}")]
    InvalidTimingLine(String),
}

/// Errors that can occur in the processing pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// restore_backup was called with an empty backup stack
    #[error("Nothing to restore: backup stack is empty")]
    NothingToRestore,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing or formatting
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the processing pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
