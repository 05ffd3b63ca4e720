//! Error types for the verification queue

use std::fmt;

use thiserror::Error;

use crate::model::{DocumentState, RequestError};

/// Queue operation that was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Scan,
    Decide,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Scan => f.write_str("scan"),
            Operation::Decide => f.write_str("decide"),
        }
    }
}

/// Why a transition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    State(DocumentState),
    ScanInProgress,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::State(state) => write!(f, "document is {}", state),
            Blocker::ScanInProgress => f.write_str("scan in progress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QueueError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid transition for document {id}: cannot {operation}, {blocker}")]
    InvalidTransition {
        id: String,
        operation: Operation,
        blocker: Blocker,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
}
