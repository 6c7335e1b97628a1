//! Post-processing of block-encoded replacements: trims line breaks that
//! would dangle or duplicate at the splice boundary.

use crate::scalar::{ScalarRepr, ScalarStyle, ScalarValue};
use crate::value::YamlValue;

/// The rightmost-deepest scalar reachable by following last-child edges.
/// `None` when the walk dead-ends in an empty collection.
pub fn terminal_scalar(value: &YamlValue) -> Option<&ScalarValue> {
    match value {
        YamlValue::Scalar(s) => Some(s),
        YamlValue::Sequence(seq) => terminal_scalar(seq.items.last()?),
        YamlValue::Mapping(map) => terminal_scalar(&map.entries.last()?.1),
    }
}

/// Normalize an encoded block replacement against its splice point.
///
/// * Values ending in a literal or folded scalar pass through: their line
///   breaks are semantic.
/// * A plain-styled terminal string that itself ends in a line break passes
///   through: the break is the value's own.
/// * Otherwise, when the byte before `end_offset` is already a line break,
///   one trailing break is dropped from the replacement so the document
///   does not gain a blank line; at the end of the document all trailing
///   whitespace goes.
pub fn normalize_block(
    source: &str,
    line_ending: &str,
    end_offset: usize,
    value: &YamlValue,
    encoded: String,
) -> String {
    let Some(terminal) = terminal_scalar(value) else {
        return encoded;
    };

    match terminal.style() {
        ScalarStyle::Literal | ScalarStyle::Folded => return encoded,
        ScalarStyle::Plain | ScalarStyle::Any => {
            if let ScalarRepr::Str(s) = terminal.repr() {
                if s.ends_with('\n') {
                    return encoded;
                }
            }
        }
        _ => {}
    }

    let splice_after_break = end_offset > 0
        && end_offset <= source.len()
        && source.as_bytes()[end_offset - 1] == b'\n';

    if splice_after_break {
        if let Some(trimmed) = encoded.strip_suffix(line_ending) {
            return trimmed.to_string();
        }
        if let Some(trimmed) = encoded.strip_suffix('\n') {
            return trimmed.to_string();
        }
        encoded
    } else {
        encoded.trim_end().to_string()
    }
}
