//! Error types for repository access and review persistence.

use thiserror::Error;

/// Failures while reading a version-control working copy.
///
/// These are never retried and always propagate to the caller.
#[derive(Error, Debug)]
pub enum RepositoryAccessError {
    #[error("Repository path must not be empty")]
    EmptyPath,

    #[error("Failed to open repository at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to read repository changes: {0}")]
    Read(#[source] git2::Error),
}

/// Failures while persisting a review document.
///
/// `write_review` renders these into a structured result instead of returning them.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
