//! Error types for yaml-splice.

use std::fmt;

/// Errors produced by the editor façade and its planners.
#[derive(Debug)]
pub enum EditError {
    /// The initial source text failed to parse.
    Parse(crate::ParseError),
    /// A path segment was missing, out of range, or type-mismatched.
    Path(String),
    /// Traversal would cross a YAML alias; the editor refuses to edit
    /// through aliases.
    Alias(String),
    /// A non-scalar value was supplied where a scalar is required
    /// (for example as a mapping key).
    InvalidScalar(String),
    /// The text produced by an edit failed to re-parse. The mutation was
    /// reverted; the editor is still usable at its prior state.
    PostEditParse(crate::ParseError),
    /// Indentation was requested for an empty block collection, which has
    /// no textual form. Internal; seeing this escape is a bug.
    EmptyBlockIndent,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Parse(err) => write!(f, "parse error: {}", err),
            EditError::Path(msg) => write!(f, "path error: {}", msg),
            EditError::Alias(name) => {
                write!(f, "cannot edit through alias '*{}'", name)
            }
            EditError::InvalidScalar(msg) => write!(f, "invalid scalar: {}", msg),
            EditError::PostEditParse(err) => {
                write!(f, "edited text failed to re-parse (reverted): {}", err)
            }
            EditError::EmptyBlockIndent => {
                write!(f, "empty block collection has no indentation")
            }
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditError::Parse(err) | EditError::PostEditParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for EditError {
    fn from(err: crate::ParseError) -> Self {
        EditError::Parse(err)
    }
}

/// Result type for editor operations.
pub type EditResult<T> = Result<T, EditError>;
