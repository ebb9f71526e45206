//! Error types for dagcache
//!
//! All modules use `DagResult<T>` as their return type. A returned error is
//! the `Fail` outcome of a resolve; untrusted files are reported as values,
//! not errors, until a caller decides to refuse them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dagcache operations
pub type DagResult<T> = Result<T, DagError>;

/// Broad classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Directory or path problems detected before any file was opened
    Setup,
    /// Open, seek, write, flush or read errors on the dataset file
    Io,
    /// An existing dataset file that cannot be trusted
    Untrusted,
    /// Anything else (serialization, internal)
    Other,
}

/// All errors that can occur in dagcache
#[derive(Error, Debug)]
pub enum DagError {
    // Setup errors
    #[error("Could not create the dataset directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not build the dataset path under {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Invalid seed hash: {0}")]
    InvalidSeedHash(String),

    // Dataset file errors
    #[error("Could not query size of dataset file: {path}")]
    SizeQuery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create dataset file: {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not allocate {size} bytes for dataset file: {path}. Insufficient space?")]
    Allocate {
        path: PathBuf,
        size: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not flush at end of dataset file: {path}. Insufficient space?")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write the magic number to dataset file: {path}")]
    Seal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset file cannot be trusted: {path}: {reason}")]
    UntrustedDataset { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl DagError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Classify the error
    pub fn class(&self) -> FailureClass {
        match self {
            Self::DirectoryCreate { .. }
            | Self::InvalidPath { .. }
            | Self::InvalidSeedHash(_)
            | Self::ConfigInvalid { .. }
            | Self::ConfigDirCreate { .. } => FailureClass::Setup,
            Self::SizeQuery { .. }
            | Self::Create { .. }
            | Self::Allocate { .. }
            | Self::Flush { .. }
            | Self::Seal { .. }
            | Self::Io { .. } => FailureClass::Io,
            Self::UntrustedDataset { .. } => FailureClass::Untrusted,
            Self::Json(_)
            | Self::TomlSerialize(_)
            | Self::Internal(_)
            | Self::User(_) => FailureClass::Other,
        }
    }

    /// Path of the file or directory the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::DirectoryCreate { path, .. }
            | Self::InvalidPath { path, .. }
            | Self::SizeQuery { path, .. }
            | Self::Create { path, .. }
            | Self::Allocate { path, .. }
            | Self::Flush { path, .. }
            | Self::Seal { path, .. }
            | Self::UntrustedDataset { path, .. }
            | Self::ConfigInvalid { path, .. }
            | Self::ConfigDirCreate { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Allocate { .. } | Self::Flush { .. } => {
                Some("Check free disk space in the dataset directory")
            }
            Self::DirectoryCreate { .. } => Some("Check permissions or pass a different --dir"),
            Self::UntrustedDataset { .. } => Some("Rerun with --force to regenerate the dataset"),
            Self::InvalidSeedHash(_) => Some("Pass the seed hash as 64 hex characters"),
            _ => None,
        }
    }
}
