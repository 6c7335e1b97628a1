//! Paths addressing nodes inside a document.

use crate::error::EditError;
use crate::value::YamlValue;
use std::fmt;

/// One step of a path: an index into a sequence or a key into a mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// A zero-based sequence index
    Index(usize),
    /// A mapping key, compared by deep structural equality
    Key(YamlValue),
}

impl PathSegment {
    /// Create an index segment.
    pub fn index(index: usize) -> Self {
        PathSegment::Index(index)
    }

    /// Create a key segment.
    pub fn key(key: impl Into<YamlValue>) -> Self {
        PathSegment::Key(key.into())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(YamlValue::from(key))
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(YamlValue::from(key))
    }
}

impl From<YamlValue> for PathSegment {
    fn from(key: YamlValue) -> Self {
        PathSegment::Key(key)
    }
}

/// A sequence of path segments addressing one node.
///
/// Paths convert from segment arrays (`["server", "port"]`, `[0, 1]`) or
/// parse from a JSON-Pointer style string (`"/server/port"`, `"/items/0"`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Path::default()
    }

    /// Parse a JSON-Pointer style path: segments separated by `/`, with
    /// `~0` unescaping to `~` and `~1` to `/`. A segment of digits is
    /// interpreted as an index when it lands on a sequence during
    /// traversal, and as a string key otherwise.
    pub fn parse(pointer: &str) -> Result<Self, EditError> {
        if pointer.is_empty() {
            return Ok(Path::root());
        }
        let rest = pointer.strip_prefix('/').ok_or_else(|| {
            EditError::Path(format!("pointer {:?} does not start with '/'", pointer))
        })?;
        let segments = rest
            .split('/')
            .map(|raw| {
                let unescaped = raw.replace("~1", "/").replace("~0", "~");
                PathSegment::Key(YamlValue::from(unescaped))
            })
            .collect();
        Ok(Path { segments })
    }

    /// The segments, in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Split into the parent path and the final segment. `None` for the
    /// root path.
    pub fn split_last(&self) -> Option<(&[PathSegment], &PathSegment)> {
        self.segments.split_last().map(|(last, init)| (init, last))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return Ok(());
        }
        for segment in &self.segments {
            match segment {
                PathSegment::Index(i) => write!(f, "/{}", i)?,
                PathSegment::Key(k) => match k.as_scalar() {
                    Some(s) => {
                        let text = s.coerce_string().replace('~', "~0").replace('/', "~1");
                        write!(f, "/{}", text)?
                    }
                    None => write!(f, "/<non-scalar>")?,
                },
            }
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path { segments }
    }
}

impl<T: Into<PathSegment>, const N: usize> From<[T; N]> for Path {
    fn from(segments: [T; N]) -> Self {
        Path {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }
}
