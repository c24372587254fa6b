//! Dynamic, string-keyed attributes attached to nodes at runtime.
//!
//! Attributes are separate from properties: properties are the fixed,
//! ordered, typed fields a kind declares; attributes are an open map any
//! pass may hang data on. Iteration follows insertion order so external
//! collaborators see a stable view.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::value::Value;

/// The attribute map of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    map: IndexMap<SmolStr, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    /// Insert or replace, returning the previous value if any.
    pub fn set(&mut self, name: impl Into<SmolStr>, value: Value) -> Option<Value> {
        self.map.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.map.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}
