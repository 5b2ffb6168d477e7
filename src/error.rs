//! Error types for plotline
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unparseable command, unknown task, bad config)
//! - 4: Operation failed (I/O, serialization, collaborator fault)
//!
//! The intent/lookup/date variants carry the exact user-facing phrasing
//! that the chat boundary surfaces verbatim as the system reply.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the plotline CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for plotline operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Couldn't understand your request to {0}")]
    Intent(Intent),

    #[error("Couldn't understand the dates in your request")]
    InvalidDates,

    #[error("Couldn't understand the date in your request")]
    InvalidDate,

    #[error("Task \"{0}\" not found")]
    TaskNotFound(String),

    #[error("One or both tasks not found")]
    TasksNotFound,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Project file not found: {0}")]
    ProjectNotFound(PathBuf),

    // Operation failures (exit code 4)
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Command intent whose required fields could not be extracted.
///
/// Rendered inside the `Error::Intent` message ("Couldn't understand your
/// request to ...") so each grammar branch fails with its own phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    AddTask,
    UpdateProgress,
    ExtendTask,
    DeleteTask,
    AddMilestone,
    AddDependency,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Intent::AddTask => "add a task",
            Intent::UpdateProgress => "update progress",
            Intent::ExtendTask => "extend a task",
            Intent::DeleteTask => "delete a task",
            Intent::AddMilestone => "add a milestone",
            Intent::AddDependency => "add a dependency",
        };
        f.write_str(text)
    }
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Intent(_)
            | Error::InvalidDates
            | Error::InvalidDate
            | Error::TaskNotFound(_)
            | Error::TasksNotFound
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::ProjectNotFound(_) => exit_codes::USER_ERROR,

            Error::Collaborator(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Text shown in the chat transcript when this error aborts a command.
    ///
    /// Collaborator faults surface their own text verbatim, without the
    /// Display prefix. Falls back to a generic apology when the message
    /// is empty, which can happen with faults that carry no description.
    pub fn chat_message(&self) -> String {
        let text = match self {
            Error::Collaborator(inner) => inner.clone(),
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            "Sorry, I couldn't process your request.".to_string()
        } else {
            text
        }
    }
}

/// Result type alias for plotline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    pub kind: &'static str,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        let kind = match err.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        };
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            kind,
        }
    }
}
