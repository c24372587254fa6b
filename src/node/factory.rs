//! Per-kind node factories.
//!
//! Construction is always explicit: one factory function per concrete
//! kind, plus [`Node::default_of`] for generic code (deserializers,
//! generators) that starts from a kind tag. Fixed-arity defaults fill
//! every slot with an `empty` sentinel — slots are never absent.

use super::kind::{Kind, Shape};
use super::value::Value;
use super::{Body, Node, NodeError};

impl Node {
    /// Text leaf with the given payload. A standalone empty payload is
    /// legal; only node lists refuse to *store* empty text leaves.
    pub fn text(payload: impl Into<String>) -> Node {
        Node::from_parts(Kind::Text, Body::Text(payload.into()))
    }

    /// The designated empty sentinel used to fill fixed-arity slots.
    pub fn empty() -> Node {
        Node::from_parts(Kind::Empty, Body::Leaf)
    }

    pub fn document() -> Node {
        Node::from_parts(Kind::Document, Body::List(Vec::new()))
    }

    pub fn title() -> Node {
        Node::from_parts(Kind::Title, Body::List(Vec::new()))
    }

    pub fn body() -> Node {
        Node::from_parts(Kind::Body, Body::List(Vec::new()))
    }

    pub fn paragraph() -> Node {
        Node::from_parts(Kind::Paragraph, Body::List(Vec::new()))
    }

    pub fn section(title: Node, body: Node) -> Node {
        Node::from_parts(Kind::Section, Body::Fixed(Box::new([title, body])))
    }

    pub fn emphasis(content: Node) -> Node {
        Node::from_parts(Kind::Emphasis, Body::Fixed(Box::new([content])))
    }

    pub fn link(target: Node, label: Node) -> Node {
        Node::from_parts(Kind::Link, Body::Fixed(Box::new([target, label])))
    }

    pub fn figure(source: Node, caption: Node, legend: Node) -> Node {
        Node::from_parts(Kind::Figure, Body::Fixed(Box::new([source, caption, legend])))
    }

    pub fn table(caption: Node, header: Node, rows: Node, footer: Node) -> Node {
        Node::from_parts(
            Kind::Table,
            Body::Fixed(Box::new([caption, header, rows, footer])),
        )
    }

    pub fn url(
        protocol: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Node {
        let mut node = Node::from_parts(Kind::Url, Body::Leaf);
        node.props[0] = Value::Str(protocol.into());
        node.props[1] = Value::Str(host.into());
        node.props[2] = Value::Str(path.into());
        node
    }

    /// Build the default instance of any concrete kind: empty lists, empty
    /// text, default-valued properties, sentinel-filled fixed slots.
    /// Capability kinds have no instances.
    pub fn default_of(kind: Kind) -> Result<Node, NodeError> {
        let body = match kind.shape() {
            Shape::Fixed { child_names } => {
                Body::Fixed(child_names.iter().map(|_| Node::empty()).collect())
            }
            Shape::List => Body::List(Vec::new()),
            Shape::Text => Body::Text(String::new()),
            Shape::Leaf => Body::Leaf,
            Shape::Marker => return Err(NodeError::not_concrete(kind)),
        };
        Ok(Node::from_parts(kind, body))
    }
}
