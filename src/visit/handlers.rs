//! Declared handler sets.
//!
//! A visitor declares which kinds it handles by building a [`HandlerSet`]
//! once per visitor type. Declarations are non-exhaustive: the dispatch
//! resolver finds the most specific declared kind for any concrete node
//! kind, so a visitor only lists the kinds it actually cares about.

use std::any::type_name;

use rustc_hash::FxHashMap;

use crate::node::{Kind, KindSet, Node};

use super::error::VisitError;
use super::{Output, Walker};

/// A handler: one function, declared for exactly one kind. Handlers
/// recurse into children by calling [`Walker::dispatch`] again.
pub type Handler<V> = fn(&mut V, &Walker<'_>, &mut Node) -> Result<Output, VisitError>;

/// The set of handlers one visitor type declares.
pub struct HandlerSet<V: ?Sized> {
    visitor: &'static str,
    declared: KindSet,
    handlers: FxHashMap<Kind, Handler<V>>,
}

impl<V> HandlerSet<V> {
    pub fn new() -> Self {
        Self {
            visitor: type_name::<V>(),
            declared: KindSet::EMPTY,
            handlers: FxHashMap::default(),
        }
    }

    /// Declare `handler` for `kind`. Declaring two handlers for the same
    /// kind is a programming error and panics at registration time.
    pub fn on(mut self, kind: Kind, handler: Handler<V>) -> Self {
        if self.declared.contains(kind) {
            panic!(
                "{} declares two handlers for kind '{}'",
                self.visitor,
                kind.name()
            );
        }
        self.declared.insert(kind);
        self.handlers.insert(kind, handler);
        self
    }

    /// The visitor type's diagnostic name.
    pub fn visitor_name(&self) -> &'static str {
        self.visitor
    }

    /// The declared kinds, as the resolver consumes them.
    pub fn declared(&self) -> KindSet {
        self.declared
    }

    pub fn get(&self, kind: Kind) -> Option<Handler<V>> {
        self.handlers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<V> Default for HandlerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
