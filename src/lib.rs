//! # arbor-base
//!
//! Core library for generic AST node modeling and type-directed visitor
//! dispatch. Parser front-ends produce trees of this shape; downstream
//! passes (printers, analyzers, transformers) walk them through the
//! visitor engine without hand-maintained dispatch tables.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → JSON round trip over the public node contract (feature "interchange")
//!   ↓
//! compare     → structural comparer over the public node contract
//!   ↓
//! visit       → dispatch resolver, resolution cache, visitor lifecycle, chains
//!   ↓
//! node        → kinds, shapes, values, attributes, node lists, factories
//!   ↓
//! base        → Location (file/line/column) and its textual form
//! ```

// ============================================================================
// MODULES (dependency order: base → node → visit → compare → interchange)
// ============================================================================

/// Foundation types: source locations and their textual form
pub mod base;

/// Node model: kinds, shapes, values, attributes, node lists, factories
pub mod node;

/// Visitor engine: dispatch resolver, resolution cache, execution contract
pub mod visit;

/// Structural comparison over the public node contract
pub mod compare;

/// Model interchange formats: JSON
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export commonly needed items
pub use base::Location;
pub use compare::{CompareOptions, first_difference, structural_eq};
pub use node::{
    Cursor, Kind, KindInfo, KindSet, Node, NodeError, Properties, PropertiesMut, PropertySlot,
    Shape, Value,
};
pub use visit::{
    Chain, HandlerSet, Output, Registry, Resolution, RunVisitor, VisitError, Visitor, Walker,
};
