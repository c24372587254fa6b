//! Foundation types for the arbor toolchain.
//!
//! This module provides the types everything else builds on:
//! - [`Location`] - optional file/line/column source positions
//! - [`LocationParseError`] - failures when reading a location back from text
//!
//! This module has NO dependencies on other arbor modules.

mod location;

pub use location::{Location, LocationParseError};
