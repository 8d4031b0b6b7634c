//! Error taxonomy for registry construction, dispatch and launching.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for toolkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;

#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The registry literal (or an operator-declared tool) is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No tool (or no inline handler) is registered under this name.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The program file an external launch points at does not exist.
    #[error("File {} not found", .0.display())]
    MissingFile(PathBuf),

    #[error("{tool}: missing required parameter '{field}'")]
    MissingParameter { tool: String, field: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    /// Starting the terminal process itself failed.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Any failure reported by a third-party client.
    #[error("{0}")]
    ExternalCall(String),
}

impl ToolkitError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Convert a handler failure, keeping toolkit errors raised inside the handler.
    pub fn from_handler(err: anyhow::Error) -> Self {
        match err.downcast::<ToolkitError>() {
            Ok(e) => e,
            Err(other) => Self::ExternalCall(format!("{:#}", other)),
        }
    }
}
