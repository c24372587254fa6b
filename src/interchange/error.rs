//! Error types for interchange operations.

use thiserror::Error;

use crate::base::LocationParseError;
use crate::node::NodeError;

/// Errors that can occur while reading or writing interchange documents.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Kind name not in the closed kind set.
    #[error("unknown node kind: {0}")]
    UnknownKind(String),

    /// Missing required field or child slot.
    #[error("missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Malformed field or document structure.
    #[error("invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    /// Malformed location string.
    #[error("bad location: {0}")]
    Location(#[from] LocationParseError),

    /// Structural violation while rebuilding the tree.
    #[error(transparent)]
    Node(#[from] NodeError),
}

impl InterchangeError {
    /// Create an unknown-kind error.
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind(name.into())
    }

    /// Create a missing-field error.
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "field",
            name: name.into(),
        }
    }

    /// Create a missing-child-slot error.
    pub fn missing_slot(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "child slot",
            name: name.into(),
        }
    }

    /// Create an invalid-structure error.
    pub fn invalid(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            kind,
            message: message.into(),
        }
    }
}
