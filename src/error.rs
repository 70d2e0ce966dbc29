//! Error types for the alias core
//!
//! Ordinary outcomes such as "name already taken" or "no such alias" are plain
//! return values (`bool`, `Option`). The `Duplicate` and `NotFound` variants exist
//! so front ends can report those outcomes through the same type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the registry, scanner and integrator
#[derive(Error, Debug)]
pub enum AliasError {
    /// Empty or malformed alias name or command
    #[error("Invalid alias: {0}")]
    Validation(String),

    #[error("Alias '{0}' already exists")]
    Duplicate(String),

    #[error("Alias '{0}' not found")]
    NotFound(String),

    /// A shell config file or live shell query could not be read
    #[error("Cannot read alias source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry storage (or its backup directory) could not be read or written
    #[error("Registry storage failure at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine target shell: {0}")]
    ShellDetection(String),

    /// The startup file could not be replaced; the original is untouched
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Managed alias block in {path} has a start marker but no end marker")]
    MalformedBlock { path: PathBuf },
}

impl AliasError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AliasError::Persistence {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AliasError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AliasError::SourceUnreadable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AliasError>;
