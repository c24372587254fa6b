//! JSON rendition of node trees.
//!
//! The writer consumes only the public node contract: kind name, location
//! string, the property iterator (whose fixed order the JSON object
//! preserves), the attribute view, and children — positional for list
//! nodes, keyed by slot name for fixed-arity nodes. The reader rebuilds
//! through `Kind::from_name` and `Node::default_of`, so a round trip is
//! structurally equal to the original under the comparer.

use std::path::Path;

use serde_json::{Map, Value as Json};

use crate::base::Location;
use crate::node::{Kind, Node, Value};

use super::error::InterchangeError;

/// Render a tree as a JSON value.
pub fn to_json(node: &Node) -> Json {
    let mut obj = Map::new();
    obj.insert("kind".into(), Json::String(node.name().into()));
    if let Some(location) = node.location() {
        obj.insert("location".into(), Json::String(location.to_string()));
    }
    if node.property_count() > 0 {
        let mut properties = Map::new();
        for (name, value, _) in node.properties() {
            properties.insert(name.into(), value_to_json(value));
        }
        obj.insert("properties".into(), Json::Object(properties));
    }
    if node.has_attributes() {
        let mut attributes = Map::new();
        for (name, value) in node.attributes() {
            attributes.insert(name.into(), value_to_json(value));
        }
        obj.insert("attributes".into(), Json::Object(attributes));
    }
    if let Some(payload) = node.as_text() {
        obj.insert("text".into(), Json::String(payload.into()));
    }
    let slots = node.child_names();
    if !slots.is_empty() {
        let mut children = Map::new();
        for (slot, child) in slots.iter().zip(node.children()) {
            children.insert((*slot).into(), to_json(child));
        }
        obj.insert("children".into(), Json::Object(children));
    } else if node.is_list() {
        let children: Vec<Json> = node.children().map(to_json).collect();
        obj.insert("children".into(), Json::Array(children));
    }
    Json::Object(obj)
}

/// Render a tree as pretty-printed JSON text.
pub fn to_json_string(node: &Node) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string_pretty(&to_json(node))?)
}

/// Rebuild a tree from a JSON value.
pub fn from_json(json: &Json) -> Result<Node, InterchangeError> {
    let obj = json
        .as_object()
        .ok_or_else(|| InterchangeError::invalid("node", "expected a JSON object"))?;
    let kind_name = obj
        .get("kind")
        .and_then(Json::as_str)
        .ok_or_else(|| InterchangeError::missing_field("kind"))?;
    let kind =
        Kind::from_name(kind_name).ok_or_else(|| InterchangeError::unknown_kind(kind_name))?;
    let mut node = Node::default_of(kind)?;

    if let Some(location) = obj.get("location") {
        let text = location
            .as_str()
            .ok_or_else(|| InterchangeError::invalid("location", "expected a string"))?;
        node.set_location(Some(text.parse::<Location>()?));
    }

    if let Some(properties) = obj.get("properties") {
        let properties = properties
            .as_object()
            .ok_or_else(|| InterchangeError::invalid("properties", "expected a JSON object"))?;
        for (name, value) in properties {
            node.set_property(name, json_to_value(value)?)?;
        }
    }

    if let Some(attributes) = obj.get("attributes") {
        let attributes = attributes
            .as_object()
            .ok_or_else(|| InterchangeError::invalid("attributes", "expected a JSON object"))?;
        for (name, value) in attributes {
            node.set_attribute(name.as_str(), json_to_value(value)?);
        }
    }

    if let Some(payload) = obj.get("text") {
        let payload = payload
            .as_str()
            .ok_or_else(|| InterchangeError::invalid("text", "expected a string"))?;
        node.set_text(payload)?;
    }

    match obj.get("children") {
        Some(children) => read_children(&mut node, children)?,
        None if !node.child_names().is_empty() => {
            return Err(InterchangeError::missing_field("children"));
        }
        None => {}
    }
    Ok(node)
}

/// Rebuild a tree from JSON text.
pub fn from_json_str(text: &str) -> Result<Node, InterchangeError> {
    from_json(&serde_json::from_str(text)?)
}

/// Write a tree to a file as JSON.
pub fn write_json(path: impl AsRef<Path>, node: &Node) -> Result<(), InterchangeError> {
    std::fs::write(path, to_json_string(node)?)?;
    Ok(())
}

/// Read a tree back from a JSON file.
pub fn read_json(path: impl AsRef<Path>) -> Result<Node, InterchangeError> {
    from_json_str(&std::fs::read_to_string(path)?)
}

fn read_children(node: &mut Node, children: &Json) -> Result<(), InterchangeError> {
    let slots = node.child_names();
    if !slots.is_empty() {
        let children = children
            .as_object()
            .ok_or_else(|| InterchangeError::invalid("children", "expected a JSON object"))?;
        if children.len() != slots.len() {
            return Err(InterchangeError::invalid(
                "children",
                format!(
                    "{} node takes {} children, got {}",
                    node.name(),
                    slots.len(),
                    children.len()
                ),
            ));
        }
        for (index, slot) in slots.iter().enumerate() {
            let child = children
                .get(*slot)
                .ok_or_else(|| InterchangeError::missing_slot(*slot))?;
            node.set(index, from_json(child)?)?;
        }
    } else if node.is_list() {
        let children = children
            .as_array()
            .ok_or_else(|| InterchangeError::invalid("children", "expected a JSON array"))?;
        for child in children {
            node.push(from_json(child)?)?;
        }
    } else if !matches!(children, Json::Array(a) if a.is_empty()) {
        return Err(InterchangeError::invalid(
            "children",
            format!("{} nodes take no children", node.name()),
        ));
    }
    Ok(())
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::Number((*i).into()),
        Value::Str(s) => Json::String(s.clone()),
    }
}

fn json_to_value(json: &Json) -> Result<Value, InterchangeError> {
    Ok(serde_json::from_value(json.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_children_are_keyed_by_slot() {
        let section = Node::section(Node::title(), Node::body());
        let json = to_json(&section);
        let children = json.get("children").unwrap().as_object().unwrap();
        assert_eq!(
            children.keys().collect::<Vec<_>>(),
            vec!["title", "body"]
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = from_json_str(r#"{"kind": "list-node"}"#).unwrap_err();
        assert!(matches!(err, InterchangeError::Node(_)), "{err}");
        let err = from_json_str(r#"{"kind": "widget"}"#).unwrap_err();
        assert!(matches!(err, InterchangeError::UnknownKind(_)), "{err}");
    }

    #[test]
    fn test_fixed_node_requires_all_slots() {
        let err = from_json_str(
            r#"{"kind": "section", "children": {"title": {"kind": "title", "children": []}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InterchangeError::Invalid { .. }), "{err}");
    }

    #[test]
    fn test_float_property_is_rejected() {
        let err = from_json_str(
            r#"{"kind": "section", "properties": {"level": 1.5},
                "children": {"title": {"kind": "title", "children": []},
                             "body": {"kind": "body", "children": []}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InterchangeError::Json(_)), "{err}");
    }
}
