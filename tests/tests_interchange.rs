//! Interchange Tests - JSON Round Trip
//!
//! A tree written through the JSON collaborator and read back must be
//! structurally equal to the original — children, properties, attributes,
//! and locations all included. The collaborator only sees the public node
//! contract, so these tests double as a check that the contract is
//! sufficient for serialization.

#![cfg(feature = "interchange")]

use arbor::interchange::{from_json, from_json_str, read_json, to_json, write_json};
use arbor::{CompareOptions, Location, Node, Value, first_difference, structural_eq};

fn annotated_document() -> Node {
    let mut title = Node::title();
    title.push(Node::text("Guide")).unwrap();

    let mut body = Node::body();
    body.push(Node::text("See ")).unwrap();
    let mut url = Node::url("https", "example.org", "/guide");
    url.set_location(Some(Location::with_file("guide src.md", 3, 9)));
    body.push(Node::link(url, Node::text("the guide"))).unwrap();

    let mut section = Node::section(title, body);
    section.set_property("level", Value::Int(2)).unwrap();
    section.set_attribute("draft", Value::Bool(true));
    section.set_attribute("reviewer", Value::Str("sam".into()));
    section.set_location(Some(Location::with_file("guide src.md", 1, 1)));

    let mut document = Node::document();
    document.push(section).unwrap();
    document
        .push(Node::figure(
            Node::url("https", "example.org", "/img.png"),
            Node::text("A figure"),
            Node::empty(),
        ))
        .unwrap();
    document
}

#[test]
fn test_round_trip_is_structurally_equal() {
    let original = annotated_document();
    let restored = from_json(&to_json(&original)).unwrap();
    let options = CompareOptions::with_locations();
    assert_eq!(first_difference(&original, &restored, &options), None);
    assert!(structural_eq(&original, &restored, &options));
}

#[test]
fn test_round_trip_through_text() {
    let original = annotated_document();
    let text = arbor::interchange::to_json_string(&original).unwrap();
    let restored = from_json_str(&text).unwrap();
    assert!(structural_eq(
        &original,
        &restored,
        &CompareOptions::with_locations()
    ));
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.json");
    let original = annotated_document();
    write_json(&path, &original).unwrap();
    let restored = read_json(&path).unwrap();
    assert!(structural_eq(
        &original,
        &restored,
        &CompareOptions::with_locations()
    ));
}

#[test]
fn test_location_with_colons_survives() {
    let mut node = Node::text("x");
    node.set_location(Some(Location::with_file("a:b c/d.md", 9, 4)));
    let restored = from_json(&to_json(&node)).unwrap();
    assert_eq!(
        restored.location(),
        Some(&Location::with_file("a:b c/d.md", 9, 4))
    );
}

#[test]
fn test_empty_and_default_nodes_round_trip() {
    for node in [
        Node::document(),
        Node::text(""),
        Node::empty(),
        Node::default_of(arbor::Kind::Table).unwrap(),
    ] {
        let restored = from_json(&to_json(&node)).unwrap();
        assert!(structural_eq(
            &node,
            &restored,
            &CompareOptions::with_locations()
        ));
    }
}

#[test]
fn test_list_normalization_is_stable_across_round_trips() {
    // A normalized list never stores adjacent texts, so pushing its
    // children back through the reader cannot merge anything away.
    let mut list = Node::paragraph();
    list.push(Node::text("a")).unwrap();
    list.push(Node::emphasis(Node::text("b"))).unwrap();
    list.push(Node::text("c")).unwrap();
    let restored = from_json(&to_json(&list)).unwrap();
    assert_eq!(restored.size(), 3);
    assert!(structural_eq(
        &list,
        &restored,
        &CompareOptions::default()
    ));
}

#[test]
fn test_malformed_documents_are_rejected() {
    for source in [
        r#"[]"#,
        r#"{"location": "1:2"}"#,
        r#"{"kind": "nope"}"#,
        r#"{"kind": "text", "text": 7}"#,
        r#"{"kind": "url", "properties": {"protocol": 80}}"#,
        r#"{"kind": "url", "properties": {"port": "80"}}"#,
        r#"{"kind": "section"}"#,
        r#"{"kind": "text", "location": "somewhere"}"#,
    ] {
        assert!(from_json_str(source).is_err(), "accepted: {source}");
    }
}
