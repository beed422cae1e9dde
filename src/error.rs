use std::fmt;
use std::path::PathBuf;

use crate::kubeconfig::EntryKind;

/// Custom error type for kubeconfig operations
#[derive(Debug)]
pub enum KconfError {
    /// Kubeconfig file exists but could not be read
    Read { path: PathBuf, message: String },
    /// Kubeconfig file could not be parsed
    MalformedDocument { path: PathBuf, message: String },
    /// Input bundle for `add` has the wrong shape
    MalformedBundle(String),
    /// Referenced context (or contexts) not present
    NotFound(String),
    /// Failed to write the kubeconfig or its backup
    Persist { path: PathBuf, message: String },
    /// User declined to override an existing entry
    AbortedByUser { kind: EntryKind, name: String },
    /// Configuration error
    Config(String),
}

impl fmt::Display for KconfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KconfError::Read { path, message } => {
                write!(f, "Could not read {}: {}", path.display(), message)
            }
            KconfError::MalformedDocument { path, message } => {
                write!(f, "Could not parse YAML file at {}: {}", path.display(), message)
            }
            KconfError::MalformedBundle(msg) => write!(f, "Input data is malformed: {}", msg),
            KconfError::NotFound(msg) => write!(f, "{}", msg),
            KconfError::Persist { path, message } => {
                write!(f, "Could not write {}: {}", path.display(), message)
            }
            KconfError::AbortedByUser { kind, name } => {
                write!(f, "Aborted: {} '{}' was not overridden", kind, name)
            }
            KconfError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for KconfError {}

impl From<serde_json::Error> for KconfError {
    fn from(err: serde_json::Error) -> Self {
        KconfError::Config(format!("JSON error: {}", err))
    }
}

impl From<std::env::JoinPathsError> for KconfError {
    fn from(err: std::env::JoinPathsError) -> Self {
        KconfError::Config(err.to_string())
    }
}

/// Result type alias for kubeconfig operations
pub type Result<T> = std::result::Result<T, KconfError>;
