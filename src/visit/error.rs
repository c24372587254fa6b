//! Error types for dispatch and visitor execution.

use thiserror::Error;

use crate::base::Location;
use crate::node::{Kind, Node, NodeError};

/// Errors raised by the dispatch engine and the visitor lifecycle.
///
/// `Visiting` is the classified wrapper for handler failures: it carries
/// the offending node's kind and location plus the original cause, and is
/// never nested — wrapping an already-classified error returns it
/// unchanged (see [`VisitError::visiting`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VisitError {
    /// No handler in the visitor matched the node's kind anywhere in the
    /// hierarchy. Fatal unless the visitor overrides `visit_not_found`.
    #[error("no handler in {visitor} for {kind} node")]
    HandlerNotFound {
        visitor: &'static str,
        kind: &'static str,
    },

    /// Two declared handlers match at the same depth and neither kind is a
    /// sub-kind of the other. A programming-time error, always fatal.
    #[error(
        "ambiguous handlers in {visitor} for {node} node: '{first}' and '{second}' are unrelated"
    )]
    AmbiguousHandler {
        visitor: &'static str,
        node: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// A handler failed while visiting a node.
    #[error("visiting {kind} node failed: {source}")]
    Visiting {
        kind: &'static str,
        location: Option<Location>,
        source: Box<VisitError>,
    },

    /// Structural violation surfaced through a handler's `?`.
    #[error(transparent)]
    Node(#[from] NodeError),

    /// Domain error raised inside a handler.
    #[error("{0}")]
    Handler(String),
}

impl VisitError {
    /// Domain error constructor for handler bodies.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }

    pub(crate) fn not_found(visitor: &'static str, kind: Kind) -> Self {
        Self::HandlerNotFound {
            visitor,
            kind: kind.name(),
        }
    }

    pub(crate) fn ambiguous(visitor: &'static str, node: Kind, first: Kind, second: Kind) -> Self {
        Self::AmbiguousHandler {
            visitor,
            node: node.name(),
            first: first.name(),
            second: second.name(),
        }
    }

    /// Classify `cause` as a visiting failure at `node`. An already
    /// classified cause passes through unchanged so wrappers never nest.
    pub fn visiting(node: &Node, cause: VisitError) -> Self {
        match cause {
            classified @ VisitError::Visiting { .. } => classified,
            cause => VisitError::Visiting {
                kind: node.name(),
                location: node.location().cloned(),
                source: Box::new(cause),
            },
        }
    }

    pub fn is_visiting(&self) -> bool {
        matches!(self, VisitError::Visiting { .. })
    }
}
