//! Value wrapper that can represent any YAML value type (scalar, sequence,
//! mapping), carrying the style metadata the encoder needs.

use crate::scalar::ScalarValue;

/// Rendering style of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStyle {
    /// Indentation-based syntax (`- item` / `key: value`)
    Block,
    /// Inline syntax (`[a, b]` / `{k: v}`)
    Flow,
    /// Style not pinned; treated as block-capable
    Any,
}

impl CollectionStyle {
    /// Whether a value with this style may be rendered in block form.
    pub fn is_block_capable(self) -> bool {
        !matches!(self, CollectionStyle::Flow)
    }
}

/// A sequence value with its style.
#[derive(Debug, Clone)]
pub struct SequenceValue {
    /// Rendering style
    pub style: CollectionStyle,
    /// The items, in order
    pub items: Vec<YamlValue>,
}

/// A mapping value with its style. Entries keep their insertion order and
/// keys may be arbitrary values, compared by deep structural equality.
#[derive(Debug, Clone)]
pub struct MappingValue {
    /// Rendering style
    pub style: CollectionStyle,
    /// The key-value entries, in order
    pub entries: Vec<(YamlValue, YamlValue)>,
}

/// Represents any YAML value: scalar, sequence, or mapping.
///
/// Equality is logical: styles are ignored, entry order matters.
#[derive(Debug, Clone)]
pub enum YamlValue {
    /// A scalar value (string, number, boolean, null)
    Scalar(ScalarValue),
    /// A sequence of values (list)
    Sequence(SequenceValue),
    /// A mapping of key-value pairs
    Mapping(MappingValue),
}

impl PartialEq for YamlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (YamlValue::Scalar(a), YamlValue::Scalar(b)) => a == b,
            (YamlValue::Sequence(a), YamlValue::Sequence(b)) => a.items == b.items,
            (YamlValue::Mapping(a), YamlValue::Mapping(b)) => a.entries == b.entries,
            _ => false,
        }
    }
}

impl YamlValue {
    /// Create a scalar value.
    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        YamlValue::Scalar(value.into())
    }

    /// Create the null value.
    pub fn null() -> Self {
        YamlValue::Scalar(ScalarValue::null())
    }

    /// Create a sequence with unpinned style.
    pub fn sequence(items: Vec<YamlValue>) -> Self {
        YamlValue::Sequence(SequenceValue {
            style: CollectionStyle::Any,
            items,
        })
    }

    /// Create a flow-styled sequence.
    pub fn flow_sequence(items: Vec<YamlValue>) -> Self {
        YamlValue::Sequence(SequenceValue {
            style: CollectionStyle::Flow,
            items,
        })
    }

    /// Create a mapping with unpinned style.
    pub fn mapping(entries: Vec<(YamlValue, YamlValue)>) -> Self {
        YamlValue::Mapping(MappingValue {
            style: CollectionStyle::Any,
            entries,
        })
    }

    /// Create a flow-styled mapping.
    pub fn flow_mapping(entries: Vec<(YamlValue, YamlValue)>) -> Self {
        YamlValue::Mapping(MappingValue {
            style: CollectionStyle::Flow,
            entries,
        })
    }

    /// Whether this is a scalar.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, YamlValue::Scalar(_))
    }

    /// Whether this is a sequence.
    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, YamlValue::Sequence(_))
    }

    /// Whether this is a mapping.
    #[inline]
    pub fn is_mapping(&self) -> bool {
        matches!(self, YamlValue::Mapping(_))
    }

    /// Get as scalar, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            YamlValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get the items, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[YamlValue]> {
        match self {
            YamlValue::Sequence(s) => Some(&s.items),
            _ => None,
        }
    }

    /// Get the entries, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&[(YamlValue, YamlValue)]> {
        match self {
            YamlValue::Mapping(m) => Some(&m.entries),
            _ => None,
        }
    }

    /// Whether this is a collection with no children.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            YamlValue::Scalar(_) => false,
            YamlValue::Sequence(s) => s.items.is_empty(),
            YamlValue::Mapping(m) => m.entries.is_empty(),
        }
    }

    /// Whether this value may be rendered in block form. Scalars always can;
    /// collections can unless pinned to flow.
    pub fn is_block_capable(&self) -> bool {
        match self {
            YamlValue::Scalar(_) => true,
            YamlValue::Sequence(s) => s.style.is_block_capable(),
            YamlValue::Mapping(m) => m.style.is_block_capable(),
        }
    }

    /// Look up a value by key, comparing keys structurally.
    pub fn get(&self, key: &YamlValue) -> Option<&YamlValue> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

macro_rules! scalar_from {
    ($($ty:ty),* $(,)?) => {
        $(impl From<$ty> for YamlValue {
            fn from(value: $ty) -> Self {
                YamlValue::Scalar(value.into())
            }
        })*
    };
}

scalar_from!(&str, String, i32, i64, u32, f32, f64, bool, ());

impl From<ScalarValue> for YamlValue {
    fn from(value: ScalarValue) -> Self {
        YamlValue::Scalar(value)
    }
}

impl From<Vec<YamlValue>> for YamlValue {
    fn from(items: Vec<YamlValue>) -> Self {
        YamlValue::sequence(items)
    }
}

impl From<Vec<(YamlValue, YamlValue)>> for YamlValue {
    fn from(entries: Vec<(YamlValue, YamlValue)>) -> Self {
        YamlValue::mapping(entries)
    }
}
