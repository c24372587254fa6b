//! The closed kind set and its hierarchy.
//!
//! Every node carries a [`Kind`] tag identifying its concrete shape. Kinds
//! split into *concrete* kinds (instantiable node shapes) and *capability*
//! kinds (dispatch-only markers such as "is a list"). The hierarchy is a
//! static table: each kind names its direct super-kinds, every path ends at
//! [`Kind::AnyNode`], and a kind may have several unrelated supers — the
//! dispatch resolver searches exactly this structure.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::value::ValueType;

/// Discriminator for a node's concrete shape or a dispatch capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    // Concrete kinds
    Document,
    Title,
    Body,
    Paragraph,
    Section,
    Emphasis,
    Link,
    Figure,
    Table,
    Text,
    Url,
    Empty,
    // Capability kinds (dispatch targets only, never instantiated)
    AnyNode,
    BlockNode,
    InlineNode,
    ListNode,
    LeafNode,
    TextBearing,
}

/// Structural shape of a concrete kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Exactly N individually named child slots, each always occupied.
    Fixed {
        child_names: &'static [&'static str],
    },
    /// Ordered, dynamically sized child sequence with text merging.
    List,
    /// A string payload, no children.
    Text,
    /// No children; carries only properties.
    Leaf,
    /// Capability kind — carries no instances at all.
    Marker,
}

/// Declaration of one typed, ordered property of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub ty: ValueType,
    pub settable: bool,
}

/// Static description of a kind: name, shape, property declarations, and
/// direct super-kinds.
#[derive(Debug)]
pub struct KindInfo {
    pub name: &'static str,
    pub shape: Shape,
    pub properties: &'static [PropertyInfo],
    pub supers: &'static [Kind],
}

const NO_PROPERTIES: &[PropertyInfo] = &[];

const SECTION_PROPERTIES: &[PropertyInfo] = &[PropertyInfo {
    name: "level",
    ty: ValueType::Int,
    settable: true,
}];

const URL_PROPERTIES: &[PropertyInfo] = &[
    PropertyInfo {
        name: "protocol",
        ty: ValueType::Str,
        settable: true,
    },
    PropertyInfo {
        name: "host",
        ty: ValueType::Str,
        settable: true,
    },
    PropertyInfo {
        name: "path",
        ty: ValueType::Str,
        settable: true,
    },
];

macro_rules! kind_info {
    ($name:literal, $shape:expr, $props:expr, [$($super:ident),*]) => {
        KindInfo {
            name: $name,
            shape: $shape,
            properties: $props,
            supers: &[$(Kind::$super),*],
        }
    };
}

static DOCUMENT: KindInfo = kind_info!("document", Shape::List, NO_PROPERTIES, [ListNode, BlockNode]);
static TITLE: KindInfo = kind_info!("title", Shape::List, NO_PROPERTIES, [ListNode, BlockNode]);
static BODY: KindInfo = kind_info!("body", Shape::List, NO_PROPERTIES, [ListNode, BlockNode]);
static PARAGRAPH: KindInfo =
    kind_info!("paragraph", Shape::List, NO_PROPERTIES, [ListNode, BlockNode]);
static SECTION: KindInfo = kind_info!(
    "section",
    Shape::Fixed {
        child_names: &["title", "body"],
    },
    SECTION_PROPERTIES,
    [BlockNode]
);
static EMPHASIS: KindInfo = kind_info!(
    "emphasis",
    Shape::Fixed {
        child_names: &["content"],
    },
    NO_PROPERTIES,
    [InlineNode]
);
static LINK: KindInfo = kind_info!(
    "link",
    Shape::Fixed {
        child_names: &["target", "label"],
    },
    NO_PROPERTIES,
    [InlineNode]
);
static FIGURE: KindInfo = kind_info!(
    "figure",
    Shape::Fixed {
        child_names: &["source", "caption", "legend"],
    },
    NO_PROPERTIES,
    [BlockNode]
);
static TABLE: KindInfo = kind_info!(
    "table",
    Shape::Fixed {
        child_names: &["caption", "header", "rows", "footer"],
    },
    NO_PROPERTIES,
    [BlockNode]
);
static TEXT: KindInfo = kind_info!(
    "text",
    Shape::Text,
    NO_PROPERTIES,
    [TextBearing, LeafNode, InlineNode]
);
static URL: KindInfo = kind_info!("url", Shape::Leaf, URL_PROPERTIES, [LeafNode, InlineNode]);
static EMPTY: KindInfo = kind_info!("empty", Shape::Leaf, NO_PROPERTIES, [LeafNode]);
static ANY_NODE: KindInfo = kind_info!("any-node", Shape::Marker, NO_PROPERTIES, []);
static BLOCK_NODE: KindInfo = kind_info!("block-node", Shape::Marker, NO_PROPERTIES, [AnyNode]);
static INLINE_NODE: KindInfo = kind_info!("inline-node", Shape::Marker, NO_PROPERTIES, [AnyNode]);
static LIST_NODE: KindInfo = kind_info!("list-node", Shape::Marker, NO_PROPERTIES, [AnyNode]);
static LEAF_NODE: KindInfo = kind_info!("leaf-node", Shape::Marker, NO_PROPERTIES, [AnyNode]);
static TEXT_BEARING: KindInfo = kind_info!("text-bearing", Shape::Marker, NO_PROPERTIES, [AnyNode]);

impl Kind {
    /// Every kind, concrete and capability, in declaration order.
    pub const ALL: [Kind; 18] = [
        Kind::Document,
        Kind::Title,
        Kind::Body,
        Kind::Paragraph,
        Kind::Section,
        Kind::Emphasis,
        Kind::Link,
        Kind::Figure,
        Kind::Table,
        Kind::Text,
        Kind::Url,
        Kind::Empty,
        Kind::AnyNode,
        Kind::BlockNode,
        Kind::InlineNode,
        Kind::ListNode,
        Kind::LeafNode,
        Kind::TextBearing,
    ];

    pub fn info(self) -> &'static KindInfo {
        match self {
            Kind::Document => &DOCUMENT,
            Kind::Title => &TITLE,
            Kind::Body => &BODY,
            Kind::Paragraph => &PARAGRAPH,
            Kind::Section => &SECTION,
            Kind::Emphasis => &EMPHASIS,
            Kind::Link => &LINK,
            Kind::Figure => &FIGURE,
            Kind::Table => &TABLE,
            Kind::Text => &TEXT,
            Kind::Url => &URL,
            Kind::Empty => &EMPTY,
            Kind::AnyNode => &ANY_NODE,
            Kind::BlockNode => &BLOCK_NODE,
            Kind::InlineNode => &INLINE_NODE,
            Kind::ListNode => &LIST_NODE,
            Kind::LeafNode => &LEAF_NODE,
            Kind::TextBearing => &TEXT_BEARING,
        }
    }

    /// Human-readable discriminator string, stable across releases.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Look a kind up by its [`name`](Kind::name).
    pub fn from_name(name: &str) -> Option<Kind> {
        static BY_NAME: Lazy<FxHashMap<&'static str, Kind>> =
            Lazy::new(|| Kind::ALL.into_iter().map(|k| (k.name(), k)).collect());
        BY_NAME.get(name).copied()
    }

    pub fn shape(self) -> &'static Shape {
        &self.info().shape
    }

    /// Direct super-kinds in the hierarchy.
    pub fn supers(self) -> &'static [Kind] {
        self.info().supers
    }

    pub fn properties(self) -> &'static [PropertyInfo] {
        self.info().properties
    }

    /// True for kinds that nodes can actually be instances of.
    pub fn is_concrete(self) -> bool {
        !matches!(self.info().shape, Shape::Marker)
    }

    pub fn is_list(self) -> bool {
        matches!(self.info().shape, Shape::List)
    }

    pub fn is_text(self) -> bool {
        matches!(self.info().shape, Shape::Text)
    }

    /// Child slot names for fixed-arity kinds; empty for all other shapes.
    pub fn child_names(self) -> &'static [&'static str] {
        match self.info().shape {
            Shape::Fixed { child_names } => child_names,
            _ => &[],
        }
    }

    /// Reflexive, transitive sub-kind test over the hierarchy.
    pub fn is_subkind_of(self, other: Kind) -> bool {
        self == other || self.ancestors().contains(other)
    }

    /// All strict super-kinds reachable from this kind.
    pub fn ancestors(self) -> KindSet {
        let mut seen = KindSet::default();
        let mut stack = vec![self];
        while let Some(kind) = stack.pop() {
            for &sup in kind.supers() {
                if !seen.contains(sup) {
                    seen.insert(sup);
                    stack.push(sup);
                }
            }
        }
        seen
    }
}

/// A small set of kinds, used for declared-handler membership and visited
/// tracking during hierarchy searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindSet(u32);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    pub fn insert(&mut self, kind: Kind) {
        self.0 |= 1 << kind as u32;
    }

    pub fn contains(self, kind: Kind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Kind> {
        Kind::ALL.into_iter().filter(move |&k| self.contains(k))
    }
}

impl FromIterator<Kind> for KindSet {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        let mut set = KindSet::default();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}
