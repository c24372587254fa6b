//! Structural comparison of node trees.
//!
//! The comparer consumes only the public node contract — kind, text
//! payload, the property iterator, the attribute view, children by index —
//! so any tree that round-trips through a serializer built on the same
//! contract compares equal to the original.

use std::fmt::Write as _;

use crate::node::{Node, Value};

/// What the comparer takes into account. Children, text payloads,
/// properties, and attributes are always compared; locations only when
/// enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    pub locations: bool,
}

impl CompareOptions {
    pub fn with_locations() -> Self {
        Self { locations: true }
    }
}

/// Structural equality under `options`.
pub fn structural_eq(a: &Node, b: &Node, options: &CompareOptions) -> bool {
    first_difference(a, b, options).is_none()
}

/// Path to the first mismatch between two trees, or `None` when they are
/// structurally equal. Paths look like `section/body/[2]: text payload
/// "a" != "b"` and exist for test diagnostics.
pub fn first_difference(a: &Node, b: &Node, options: &CompareOptions) -> Option<String> {
    diff(a, b, options, String::new())
}

fn diff(a: &Node, b: &Node, options: &CompareOptions, path: String) -> Option<String> {
    let at = |detail: String| -> Option<String> {
        Some(if path.is_empty() {
            detail
        } else {
            format!("{path}: {detail}")
        })
    };

    if a.kind() != b.kind() {
        return at(format!("kind {} != {}", a.name(), b.name()));
    }
    if options.locations && a.location() != b.location() {
        return at("location mismatch".to_string());
    }
    if a.as_text() != b.as_text() {
        return at(format!(
            "text payload {:?} != {:?}",
            a.as_text(),
            b.as_text()
        ));
    }

    // Property iterators of one kind are zipped positionally; the fixed
    // per-kind order makes the names line up by construction.
    for ((name, left, _), (_, right, _)) in a.properties().zip(b.properties()) {
        if left != right {
            return at(format!("property '{name}' {left} != {right}"));
        }
    }

    let attrs_a: Vec<(&str, &Value)> = a.attributes().collect();
    let attrs_b: Vec<(&str, &Value)> = b.attributes().collect();
    if attrs_a.len() != attrs_b.len() {
        return at(format!(
            "attribute count {} != {}",
            attrs_a.len(),
            attrs_b.len()
        ));
    }
    for (name, left) in attrs_a {
        match b.attribute(name) {
            Some(right) if right == left => {}
            Some(right) => return at(format!("attribute '{name}' {left} != {right}")),
            None => return at(format!("attribute '{name}' missing on right")),
        }
    }

    if a.size() != b.size() {
        return at(format!("child count {} != {}", a.size(), b.size()));
    }
    for (index, (left, right)) in a.children().zip(b.children()).enumerate() {
        let mut child_path = path.clone();
        if !child_path.is_empty() {
            child_path.push('/');
        }
        let _ = match a.child_names().get(index) {
            Some(slot) => write!(child_path, "{}.{slot}", a.name()),
            None => write!(child_path, "{}[{index}]", a.name()),
        };
        if let Some(found) = diff(left, right, options, child_path) {
            return Some(found);
        }
    }
    None
}
