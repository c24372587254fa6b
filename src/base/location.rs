//! Source positions for AST nodes.
//!
//! A [`Location`] records where a node came from so that error reporting
//! and serializers can point back at the original input. The textual form
//! is `file:line:column` with the file component percent-encoded, or
//! `line:column` when no file is known; both forms parse back losslessly.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

/// Characters escaped in the file component so that `:` stays an
/// unambiguous field separator.
const FILE_ESCAPES: &AsciiSet = &CONTROLS.add(b':').add(b'%').add(b' ');

/// A source position attached to a node (1-indexed line and column).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a location that also names its source file.
    pub fn with_file(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(
                f,
                "{}:{}:{}",
                utf8_percent_encode(file, FILE_ESCAPES),
                self.line,
                self.column
            ),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// Failure to read a [`Location`] back from its textual form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationParseError {
    #[error("location '{0}' has no line:column tail")]
    MissingFields(String),

    #[error("location '{input}' has a non-numeric {field}")]
    BadNumber { input: String, field: &'static str },

    #[error("location '{0}' has an undecodable file component")]
    BadFile(String),
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The file component has all raw colons escaped, so the last two
        // colon-separated fields are always line and column.
        let mut tail = s.rsplitn(3, ':');
        let column = tail.next().filter(|c| !c.is_empty());
        let line = tail.next();
        let (Some(column), Some(line)) = (column, line) else {
            return Err(LocationParseError::MissingFields(s.to_string()));
        };
        let column: u32 = column
            .parse()
            .map_err(|_| LocationParseError::BadNumber {
                input: s.to_string(),
                field: "column",
            })?;
        let line: u32 = line.parse().map_err(|_| LocationParseError::BadNumber {
            input: s.to_string(),
            field: "line",
        })?;
        let file = match tail.next() {
            Some(encoded) => Some(
                percent_decode_str(encoded)
                    .decode_utf8()
                    .map_err(|_| LocationParseError::BadFile(s.to_string()))?
                    .into_owned(),
            ),
            None => None,
        };
        Ok(Self { file, line, column })
    }
}
