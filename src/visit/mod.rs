//! The visitor engine.
//!
//! A visitor is any type implementing [`Visitor`]: it declares a
//! [`HandlerSet`] (which kinds it handles) and optionally overrides the
//! lifecycle hooks. A [`Walker`] bound to a [`Registry`] executes the
//! lifecycle:
//!
//! 1. `before(root)` picks the node to start from, or aborts.
//! 2. `dispatch(node)` resolves the most specific handler for the node's
//!    concrete kind (through the resolution cache) and invokes it.
//!    Handlers recurse into children by calling `dispatch` again — there
//!    is no built-in recursion driver; each handler decides whether and
//!    how to descend.
//! 3. `after(root, output)` post-processes the result.
//!
//! Handler failures are translated at the dispatch boundary through
//! `on_visit_error`; unmatched kinds go through `visit_not_found`. Both
//! have fatal defaults and both are overridable per visitor.

mod cache;
mod chain;
mod error;
mod handlers;
mod resolve;

pub use cache::{DEFAULT_HIGH_WATER, DEFAULT_LOW_WATER, Registry};
pub use chain::{Chain, RunVisitor};
pub use error::VisitError;
pub use handlers::{Handler, HandlerSet};
pub use resolve::Resolution;

use std::any::TypeId;

use crate::node::{Node, Value};

/// Result of one visitor execution. Only `Node` outputs keep a chain of
/// visitors running; any other variant becomes the chain's final output.
#[derive(Debug, Clone)]
pub enum Output {
    Node(Node),
    Value(Value),
    Unit,
}

impl Output {
    pub fn is_node(&self) -> bool {
        matches!(self, Output::Node(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Output::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Output::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Output::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// A tree visitor: a declared handler set plus the lifecycle hooks.
pub trait Visitor: 'static {
    /// The handlers this visitor type declares, built once per type.
    /// Implementations return a lazily initialized static.
    fn handlers() -> &'static HandlerSet<Self>
    where
        Self: Sized;

    /// Pick the node to start from, or return `None` to abort before
    /// dispatching (the execution result is then `Output::Unit`).
    fn before(&mut self, root: Node) -> Result<Option<Node>, VisitError> {
        Ok(Some(root))
    }

    /// Post-process the root handler's output. The (possibly mutated)
    /// root comes back too so in-place transformers can return it.
    fn after(&mut self, root: Node, output: Output) -> Result<Output, VisitError> {
        let _ = root;
        Ok(output)
    }

    /// Fallback when no handler matched the node's kind anywhere in the
    /// hierarchy. The default fails with `HandlerNotFound`.
    fn visit_not_found(&mut self, walker: &Walker<'_>, node: &mut Node) -> Result<Output, VisitError>
    where
        Self: Sized,
    {
        let _ = walker;
        Err(VisitError::not_found(
            Self::handlers().visitor_name(),
            node.kind(),
        ))
    }

    /// Translate an error raised inside a handler. The default classifies
    /// it as a `Visiting` failure at `node`, passing already-classified
    /// errors through unchanged.
    fn on_visit_error(&mut self, node: &Node, cause: VisitError) -> VisitError {
        VisitError::visiting(node, cause)
    }
}

/// Traversal entry point bound to a [`Registry`]. Cheap to copy around;
/// handlers receive one to recurse through.
#[derive(Clone, Copy)]
pub struct Walker<'r> {
    registry: &'r Registry,
}

impl<'r> Walker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Run the full lifecycle over `root`.
    pub fn run<V: Visitor>(&self, visitor: &mut V, root: Node) -> Result<Output, VisitError> {
        let Some(mut node) = visitor.before(root)? else {
            return Ok(Output::Unit);
        };
        let output = self.dispatch(visitor, &mut node)?;
        visitor.after(node, output)
    }

    /// Resolve and invoke the handler for `node`'s concrete kind.
    pub fn dispatch<V: Visitor>(
        &self,
        visitor: &mut V,
        node: &mut Node,
    ) -> Result<Output, VisitError> {
        let set = V::handlers();
        let resolution = self.registry.resolution_for(
            TypeId::of::<V>(),
            set.visitor_name(),
            set.declared(),
            node.kind(),
        )?;
        match resolution {
            Resolution::Handler(declared) => match set.get(declared) {
                Some(handler) => handler(visitor, self, node)
                    .map_err(|cause| visitor.on_visit_error(node, cause)),
                None => visitor.visit_not_found(self, node),
            },
            Resolution::NotFound => visitor.visit_not_found(self, node),
        }
    }
}
