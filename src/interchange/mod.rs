//! Model interchange formats for node trees.
//!
//! One format is provided: a JSON rendition built entirely on the public
//! node contract (kind name, location string, property iterator, attribute
//! view, positional/slot-named children). Reading rebuilds the tree
//! through the kind table and the per-kind default factories, so
//!
//! ```ignore
//! use arbor::interchange::{from_json, to_json};
//!
//! let restored = from_json(&to_json(&tree))?;
//! assert!(arbor::structural_eq(&tree, &restored, &options));
//! ```
//!
//! holds for every tree the node model can represent.

mod error;
mod json;

pub use error::InterchangeError;
pub use json::{from_json, from_json_str, read_json, to_json, to_json_string, write_json};
