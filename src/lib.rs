#![deny(missing_docs)]
#![warn(clippy::unnecessary_to_owned)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::manual_string_new)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

//! A comment-preserving YAML document editor.
//!
//! Documents are parsed into a lossless syntax tree (based on the [rowan]
//! library); edits are planned as minimal text splices against the original
//! source, so comments, whitespace and styles outside the edited region
//! survive byte-for-byte.

mod editor;
mod encode;
mod error;
mod lex;
mod mutation;
mod normalize;
mod parse;
mod path;
mod scalar;
mod scan;
mod value;
mod yaml;

pub use editor::{Editor, Node, NodeKind};
pub use encode::{encode_flow, is_dangerous};
pub use error::{EditError, EditResult};
pub use lex::{lex, lex_with_warnings, LexWarning, LexWarningKind, SyntaxKind};
pub use mutation::SourceEdit;
pub use parse::Parse;
pub use path::{Path, PathSegment};
pub use rowan::TextRange;
pub use scalar::{ScalarRepr, ScalarStyle, ScalarValue};
pub use value::{CollectionStyle, MappingValue, SequenceValue, YamlValue};
pub use yaml::{Alias, Document, Entry, Lang, Mapping, Scalar, Sequence, Yaml};

/// A positioned parse error containing location information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionedParseError {
    /// The error message
    pub message: String,
    /// The text range where the error occurred
    pub range: rowan::TextRange,
    /// Optional error code for categorization
    pub code: Option<String>,
}

impl std::fmt::Display for PositionedParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PositionedParseError {}

/// List of encountered syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError(pub Vec<String>);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for err in &self.0 {
            writeln!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
