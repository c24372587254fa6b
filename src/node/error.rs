//! Error types for node model operations.

use thiserror::Error;

use super::kind::Kind;

/// Structural violations raised by the node model. All of these are fatal
/// to the operation that raised them and are surfaced immediately; the
/// model never retries or partially applies a mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NodeError {
    /// Child or property index outside the node's bounds.
    #[error("index {index} out of range for {kind} node of size {size}")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        size: usize,
    },

    /// A fixed-arity slot was assigned the null-equivalent. Slots must hold
    /// a real node or an explicit `empty` sentinel instance.
    #[error("{kind} node requires a child in slot '{slot}'; use an empty sentinel instead")]
    NullChild {
        kind: &'static str,
        slot: &'static str,
    },

    /// An operation that only one shape supports was applied to another
    /// (e.g. `insert` on a fixed-arity node).
    #[error("operation '{op}' is not supported by {kind} nodes")]
    ShapeMismatch {
        kind: &'static str,
        op: &'static str,
    },

    /// Attempt to instantiate a capability kind.
    #[error("{kind} is a capability kind and has no instances")]
    NotConcrete { kind: &'static str },

    /// Cursor mutation with no current element (no `next`/`prev` call has
    /// succeeded since the last structural change).
    #[error("cursor over {kind} node has no current element for '{op}'")]
    CursorState {
        kind: &'static str,
        op: &'static str,
    },

    /// Property name not declared by the node's kind.
    #[error("{kind} nodes have no property named '{name}'")]
    NoSuchProperty { kind: &'static str, name: String },

    /// Property assignment with a value outside the slot's declared type.
    #[error("property '{name}' of {kind} nodes holds {expected} values")]
    PropertyType {
        kind: &'static str,
        name: &'static str,
        expected: &'static str,
    },
}

impl NodeError {
    pub fn out_of_range(kind: Kind, index: usize, size: usize) -> Self {
        Self::IndexOutOfRange {
            kind: kind.name(),
            index,
            size,
        }
    }

    pub fn null_child(kind: Kind, slot: &'static str) -> Self {
        Self::NullChild {
            kind: kind.name(),
            slot,
        }
    }

    pub fn shape_mismatch(kind: Kind, op: &'static str) -> Self {
        Self::ShapeMismatch {
            kind: kind.name(),
            op,
        }
    }

    pub fn not_concrete(kind: Kind) -> Self {
        Self::NotConcrete { kind: kind.name() }
    }

    pub fn no_such_property(kind: Kind, name: impl Into<String>) -> Self {
        Self::NoSuchProperty {
            kind: kind.name(),
            name: name.into(),
        }
    }
}
