//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Spec errors are fatal
//! before any network activity; connect errors never leave the scan engine.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a target or port expression into a scan plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("invalid port specification '{token}': {reason}")]
    InvalidPortSpec { token: String, reason: String },

    #[error("invalid target '{token}': {reason}")]
    InvalidTarget { token: String, reason: String },
}

impl SpecError {
    pub(crate) fn port(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPortSpec {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn target(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// The offending token from the user's input.
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidPortSpec { token, .. } | Self::InvalidTarget { token, .. } => token,
        }
    }
}

/// Classified outcome of a failed connect attempt.
///
/// The engine drops these silently; they exist so callers and tests can tell
/// a refused port from a filtered one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("connection refused")]
    Refused,

    #[error("connection timed out")]
    TimedOut,

    #[error("host or network unreachable: {0}")]
    Unreachable(String),

    #[error("could not resolve host '{0}'")]
    Unresolved(String),

    #[error("connection failed: {0}")]
    Other(String),
}

impl ConnectError {
    /// Map an I/O error from `connect()` onto the taxonomy.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::TimedOut => Self::TimedOut,
            _ => {
                let message = err.to_string();
                if message.to_lowercase().contains("unreachable") {
                    Self::Unreachable(message)
                } else {
                    Self::Other(message)
                }
            }
        }
    }
}

/// Failure to write the result set to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unsupported export format for '{0}' (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read '{path}': {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that abort an invocation before any scanning happens.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InvokeError {
    /// Process exit status for a failed invocation.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

pub type SpecResult<T> = Result<T, SpecError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ExportResult<T> = Result<T, ExportError>;
