//! Shared types and errors for the Steep suite store.
//!
//! This crate provides the foundation used across all other Steep crates:
//! - `SteepError` — unified error taxonomy
//! - `name` — suite name validation
//! - `tree` — the recursive suite tree model

pub mod name;
pub mod tree;

use std::path::PathBuf;

pub use tree::SuiteNode;

/// Unified error type for all Steep subsystems.
#[derive(Debug, thiserror::Error)]
pub enum SteepError {
    // === Naming & scoping ===
    #[error("Invalid suite name: {0:?}")]
    InvalidName(String),

    #[error("Invalid scope: {0:?}")]
    InvalidScope(Vec<String>),

    // === Storage ===
    #[error("Invalid base: {}", .0.display())]
    InvalidBase(PathBuf),

    #[error("Invalid contents in {}: {source}", .path.display())]
    InvalidContents {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Suite not found: {0:?}")]
    NotFound(String),

    // === Filtering ===
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    // === Pipeline ===
    #[error("Unknown stage: {0:?}")]
    UnknownStage(String),

    #[error("Cannot update stage {0:?}: no preceding stage")]
    CannotPromoteOrigin(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Generic ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SteepError {
    /// Maps the error to an HTTP status code for a transport layer.
    ///
    /// Client-correctable kinds map to 4xx and a missing suite to 404;
    /// everything else returns `None` and should surface as an opaque
    /// server error.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            SteepError::NotFound(_) => Some(404),
            SteepError::InvalidName(_)
            | SteepError::InvalidScope(_)
            | SteepError::InvalidPattern { .. } => Some(400),
            _ => None,
        }
    }
}

/// A convenience alias for `Result<T, SteepError>`.
pub type Result<T> = std::result::Result<T, SteepError>;
