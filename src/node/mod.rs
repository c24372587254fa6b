//! The AST node model.
//!
//! One owning [`Node`] type covers every shape in the closed kind set:
//! fixed-arity inner nodes, dynamically sized node lists with text-merging
//! semantics, text leaves, and property-only leaves. The shape-specific
//! storage lives behind a private body enum; everything external
//! collaborators need (serializers, comparers, traversals) goes through
//! the uniform contract on `Node` itself.
//!
//! A node tree is a strict ownership tree: children are owned values, there
//! are no parent back-references and no sharing. Nodes are mutable in
//! place; structural invariants (slot occupancy for fixed shapes, text
//! merging for lists) are maintained by the mutation methods, never by the
//! caller.

mod attrs;
mod error;
mod factory;
mod kind;
mod list;
mod value;

pub use attrs::Attributes;
pub use error::NodeError;
pub use kind::{Kind, KindInfo, KindSet, PropertyInfo, Shape};
pub use list::Cursor;
pub use value::{Value, ValueType};

use smol_str::SmolStr;

use crate::base::Location;

/// A single AST node. See the module docs for the shape taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: Kind,
    location: Option<Location>,
    props: Box<[Value]>,
    attrs: Option<Box<Attributes>>,
    body: Body,
}

/// Shape-specific storage. Which variant a node carries is fully
/// determined by its kind's declared [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body {
    Fixed(Box<[Node]>),
    List(Vec<Node>),
    Text(String),
    Leaf,
}

impl Node {
    pub(crate) fn from_parts(kind: Kind, body: Body) -> Self {
        let props: Box<[Value]> = kind
            .properties()
            .iter()
            .map(|p| p.ty.default_value())
            .collect();
        Self {
            kind,
            location: None,
            props,
            attrs: None,
            body,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Human-readable discriminator string for this node's kind.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_list(&self) -> bool {
        matches!(self.body, Body::List(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.body, Body::Text(_))
    }

    /// True when the node has no children and, for text leaves, no payload.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            Body::Text(payload) => payload.is_empty(),
            _ => self.size() == 0,
        }
    }

    // ------------------------------------------------------------------
    // Location
    // ------------------------------------------------------------------

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Replace the location, returning the previous one.
    pub fn set_location(&mut self, location: Option<Location>) -> Option<Location> {
        std::mem::replace(&mut self.location, location)
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Number of children; 0 for every leaf shape.
    pub fn size(&self) -> usize {
        self.child_slice().len()
    }

    /// Stable ordered slot names for fixed-arity nodes; empty otherwise.
    /// List children are addressed purely by position.
    pub fn child_names(&self) -> &'static [&'static str] {
        self.kind.child_names()
    }

    pub fn get(&self, index: usize) -> Result<&Node, NodeError> {
        let size = self.size();
        self.child_slice()
            .get(index)
            .ok_or(NodeError::out_of_range(self.kind, index, size))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Node, NodeError> {
        let kind = self.kind;
        let size = self.size();
        self.child_slice_mut()
            .get_mut(index)
            .ok_or(NodeError::out_of_range(kind, index, size))
    }

    /// Replace the child at `index`, returning the previous occupant.
    ///
    /// On a list node the text invariants are re-established around the
    /// slot, so the list may shrink (empty-text assignment removes the
    /// slot; a text assignment can merge with its neighbors).
    pub fn set(&mut self, index: usize, child: Node) -> Result<Node, NodeError> {
        let kind = self.kind;
        match &mut self.body {
            Body::Fixed(slots) => {
                let size = slots.len();
                let slot = slots
                    .get_mut(index)
                    .ok_or(NodeError::out_of_range(kind, index, size))?;
                Ok(std::mem::replace(slot, child))
            }
            Body::List(children) => {
                if index >= children.len() {
                    return Err(NodeError::out_of_range(kind, index, children.len()));
                }
                Ok(list::set(children, index, child))
            }
            Body::Text(_) | Body::Leaf => Err(NodeError::out_of_range(kind, index, 0)),
        }
    }

    /// Polymorphic `set` accepting the null-equivalent. Fixed-arity nodes
    /// reject `None` with [`NodeError::NullChild`]; list nodes silently
    /// drop it, leaving the slot untouched.
    pub fn set_child(&mut self, index: usize, child: Option<Node>) -> Result<Option<Node>, NodeError> {
        match child {
            Some(child) => self.set(index, child).map(Some),
            None => match &self.body {
                Body::Fixed(slots) => {
                    if index >= slots.len() {
                        return Err(NodeError::out_of_range(self.kind, index, slots.len()));
                    }
                    Err(NodeError::null_child(self.kind, self.child_names()[index]))
                }
                Body::List(children) => {
                    if index >= children.len() {
                        return Err(NodeError::out_of_range(self.kind, index, children.len()));
                    }
                    Ok(None)
                }
                Body::Text(_) | Body::Leaf => Err(NodeError::out_of_range(self.kind, index, 0)),
            },
        }
    }

    /// Remove and return the child at `index` (list nodes only). Text
    /// neighbors made adjacent by the removal are merged.
    pub fn remove(&mut self, index: usize) -> Result<Node, NodeError> {
        let kind = self.kind;
        match &mut self.body {
            Body::List(children) => {
                if index >= children.len() {
                    return Err(NodeError::out_of_range(kind, index, children.len()));
                }
                Ok(list::remove(children, index))
            }
            _ => Err(NodeError::shape_mismatch(kind, "remove")),
        }
    }

    /// Insert a child before `index` (list nodes only).
    pub fn insert(&mut self, index: usize, child: Node) -> Result<(), NodeError> {
        let kind = self.kind;
        match &mut self.body {
            Body::List(children) => {
                if index > children.len() {
                    return Err(NodeError::out_of_range(kind, index, children.len()));
                }
                list::insert(children, index, child);
                Ok(())
            }
            _ => Err(NodeError::shape_mismatch(kind, "insert")),
        }
    }

    /// Polymorphic `insert`; `None` is silently dropped on list nodes.
    pub fn insert_child(&mut self, index: usize, child: Option<Node>) -> Result<(), NodeError> {
        match child {
            Some(child) => self.insert(index, child),
            None => match &self.body {
                Body::List(children) => {
                    if index > children.len() {
                        return Err(NodeError::out_of_range(self.kind, index, children.len()));
                    }
                    Ok(())
                }
                _ => Err(NodeError::shape_mismatch(self.kind, "insert")),
            },
        }
    }

    /// Append a child (list nodes only).
    pub fn push(&mut self, child: Node) -> Result<(), NodeError> {
        let kind = self.kind;
        match &mut self.body {
            Body::List(children) => {
                list::push(children, child);
                Ok(())
            }
            _ => Err(NodeError::shape_mismatch(kind, "push")),
        }
    }

    /// Polymorphic `push`; `None` is silently dropped on list nodes.
    pub fn push_child(&mut self, child: Option<Node>) -> Result<(), NodeError> {
        match child {
            Some(child) => self.push(child),
            None => match &self.body {
                Body::List(_) => Ok(()),
                _ => Err(NodeError::shape_mismatch(self.kind, "push")),
            },
        }
    }

    /// Bulk append with null dropping (list nodes only). Each `Some` child
    /// goes through the same normalization as a single `push`.
    pub fn append<I>(&mut self, children: I) -> Result<(), NodeError>
    where
        I: IntoIterator<Item = Option<Node>>,
    {
        let kind = self.kind;
        match &mut self.body {
            Body::List(existing) => {
                for child in children.into_iter().flatten() {
                    list::push(existing, child);
                }
                Ok(())
            }
            _ => Err(NodeError::shape_mismatch(kind, "append")),
        }
    }

    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        self.child_slice().iter()
    }

    /// Stateful forward/backward cursor over a list node's children.
    pub fn cursor(&mut self) -> Result<Cursor<'_>, NodeError> {
        let kind = self.kind;
        match &mut self.body {
            Body::List(children) => Ok(Cursor::new(kind, children)),
            _ => Err(NodeError::shape_mismatch(kind, "cursor")),
        }
    }

    fn child_slice(&self) -> &[Node] {
        match &self.body {
            Body::Fixed(slots) => slots,
            Body::List(children) => children,
            Body::Text(_) | Body::Leaf => &[],
        }
    }

    fn child_slice_mut(&mut self) -> &mut [Node] {
        match &mut self.body {
            Body::Fixed(slots) => slots,
            Body::List(children) => children,
            Body::Text(_) | Body::Leaf => &mut [],
        }
    }

    // ------------------------------------------------------------------
    // Text payload
    // ------------------------------------------------------------------

    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            Body::Text(payload) => Some(payload),
            _ => None,
        }
    }

    /// Replace a text leaf's payload, returning the previous payload.
    pub fn set_text(&mut self, payload: impl Into<String>) -> Result<String, NodeError> {
        let kind = self.kind;
        match &mut self.body {
            Body::Text(current) => Ok(std::mem::replace(current, payload.into())),
            _ => Err(NodeError::shape_mismatch(kind, "set-text")),
        }
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn property_count(&self) -> usize {
        self.props.len()
    }

    /// Iterate `(name, value, settable)` in the kind's declared order,
    /// which is identical on every call. Serializers and comparers zip two
    /// of these together and rely on positional correspondence.
    pub fn properties(&self) -> Properties<'_> {
        Properties {
            info: self.kind.properties().iter(),
            values: self.props.iter(),
        }
    }

    /// Mutable property iteration; each slot supports in-place replacement.
    pub fn properties_mut(&mut self) -> PropertiesMut<'_> {
        PropertiesMut {
            kind: self.kind,
            info: self.kind.properties().iter(),
            values: self.props.iter_mut(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        let index = self.kind.properties().iter().position(|p| p.name == name)?;
        Some(&self.props[index])
    }

    /// Replace a property by name, returning the previous value. The new
    /// value must inhabit the slot's declared type.
    pub fn set_property(&mut self, name: &str, value: Value) -> Result<Value, NodeError> {
        let Some(index) = self.kind.properties().iter().position(|p| p.name == name) else {
            return Err(NodeError::no_such_property(self.kind, name));
        };
        let info = &self.kind.properties()[index];
        if !info.ty.admits(&value) {
            return Err(NodeError::PropertyType {
                kind: self.kind.name(),
                name: info.name,
                expected: info.ty.name(),
            });
        }
        Ok(std::mem::replace(&mut self.props[index], value))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn has_attributes(&self) -> bool {
        self.attrs.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.as_ref().is_some_and(|a| a.contains(name))
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(name)
    }

    /// Read-only view of all attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().flat_map(|a| a.iter())
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn set_attribute(&mut self, name: impl Into<SmolStr>, value: Value) -> Option<Value> {
        self.attrs
            .get_or_insert_with(|| Box::new(Attributes::new()))
            .set(name, value)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.attrs.as_mut()?.remove(name)
    }

    pub fn clear_attributes(&mut self) {
        self.attrs = None;
    }

    /// Typed attribute read with a caller-supplied default.
    pub fn attr_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn attr_int(&self, name: &str, default: i64) -> i64 {
        self.attribute(name).and_then(Value::as_int).unwrap_or(default)
    }

    pub fn attr_bool(&self, name: &str, default: bool) -> bool {
        self.attribute(name).and_then(Value::as_bool).unwrap_or(default)
    }
}

/// Read iterator over `(name, value, settable)` property triples.
pub struct Properties<'a> {
    info: std::slice::Iter<'static, PropertyInfo>,
    values: std::slice::Iter<'a, Value>,
}

impl<'a> Iterator for Properties<'a> {
    type Item = (&'static str, &'a Value, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let info = self.info.next()?;
        let value = self.values.next()?;
        Some((info.name, value, info.settable))
    }
}

/// Mutable iterator over property slots.
pub struct PropertiesMut<'a> {
    kind: Kind,
    info: std::slice::Iter<'static, PropertyInfo>,
    values: std::slice::IterMut<'a, Value>,
}

impl<'a> Iterator for PropertiesMut<'a> {
    type Item = PropertySlot<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let info = self.info.next()?;
        let value = self.values.next()?;
        Some(PropertySlot {
            kind: self.kind,
            info,
            value,
        })
    }
}

/// One property slot yielded by [`PropertiesMut`].
pub struct PropertySlot<'a> {
    kind: Kind,
    info: &'static PropertyInfo,
    value: &'a mut Value,
}

impl PropertySlot<'_> {
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    pub fn settable(&self) -> bool {
        self.info.settable
    }

    pub fn value(&self) -> &Value {
        self.value
    }

    /// Replace the slot's value in place, returning the previous value.
    pub fn replace(&mut self, value: Value) -> Result<Value, NodeError> {
        if !self.info.ty.admits(&value) {
            return Err(NodeError::PropertyType {
                kind: self.kind.name(),
                name: self.info.name,
                expected: self.info.ty.name(),
            });
        }
        Ok(std::mem::replace(self.value, value))
    }
}
