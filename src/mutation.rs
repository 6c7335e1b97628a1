//! The mutation planners: given the parsed tree, the raw source and an
//! intended change, each planner computes the single text splice whose
//! application produces the new logical value while leaving every byte
//! outside the splice untouched.
//!
//! There are eight families: {sequence, mapping} x {block, flow} x
//! {insert, replace, remove}, plus whole-document replacement.

use crate::encode::{encode_block, encode_flow, strip_first_indent, EncodeContext};
use crate::error::{EditError, EditResult};
use crate::normalize::normalize_block;
use crate::scan::{
    block_list_indent, block_map_indent, content_end, detect_line_ending, entry_content_end,
    node_column, skip_comments,
};
use crate::value::YamlValue;
use crate::yaml::{node_span, node_to_value, Document, Entry, Mapping, Sequence, SyntaxNode};
use rowan::ast::AstNode;

/// A single text splice: replace `length` bytes at `offset` with
/// `replacement`. Applying a batch in descending offset order keeps the
/// earlier offsets valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    /// Byte offset of the splice
    pub offset: usize,
    /// Number of bytes replaced
    pub length: usize,
    /// The text spliced in
    pub replacement: String,
}

impl SourceEdit {
    /// A pure insertion at `offset`.
    pub fn insert(offset: usize, replacement: String) -> Self {
        SourceEdit {
            offset,
            length: 0,
            replacement,
        }
    }

    /// Replace the bytes in `[start, end)`.
    pub fn replace(start: usize, end: usize, replacement: String) -> Self {
        SourceEdit {
            offset: start,
            length: end.saturating_sub(start),
            replacement,
        }
    }

    /// Apply this edit to a source string.
    pub fn apply(&self, source: &mut String) {
        let end = (self.offset + self.length).min(source.len());
        source.replace_range(self.offset.min(source.len())..end, &self.replacement);
    }
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// Render one block sequence element: indent, `- ` marker, encoded value.
/// Element content anchors at `indent + 2` (the marker width) so that
/// multi-line elements line up under the first line.
fn render_seq_item(value: &YamlValue, indent: usize, step: usize, line_ending: &str) -> String {
    let ctx = EncodeContext {
        indent: indent + 2,
        step,
        line_ending,
    };
    let encoded = encode_block(value, ctx);
    format!("{}- {}", spaces(indent), strip_first_indent(&encoded))
}

fn entry_key_start(entry: &Entry) -> usize {
    entry
        .key_node()
        .map(|k| node_span(&k).0)
        .unwrap_or_else(|| node_span(entry.syntax()).0)
}

/// The string a key orders by for the alphabetical-insertion heuristic.
fn key_sort_string(value: &YamlValue) -> String {
    value
        .as_scalar()
        .map(|s| s.coerce_string())
        .unwrap_or_else(|| encode_flow(value))
}

fn entry_key_string(entry: &Entry) -> String {
    entry
        .key_node()
        .and_then(|k| node_to_value(&k).ok())
        .map(|v| key_sort_string(&v))
        .unwrap_or_default()
}

/// Insertion index for a new key: when the existing keys are already in
/// strictly ascending order, the first key greater than the new one;
/// otherwise the end.
fn alphabetical_index(existing: &[String], new_key: &str) -> usize {
    let ascending = existing.windows(2).all(|w| w[0] < w[1]);
    if ascending {
        existing
            .iter()
            .position(|k| k.as_str() > new_key)
            .unwrap_or(existing.len())
    } else {
        existing.len()
    }
}

/// Append a new element to a block sequence.
pub(crate) fn block_seq_push(
    source: &str,
    seq: &Sequence,
    value: &YamlValue,
    step: usize,
) -> EditResult<SourceEdit> {
    let items: Vec<SyntaxNode> = seq.items().collect();
    let last = items.last().ok_or(EditError::EmptyBlockIndent)?;
    let line_ending = detect_line_ending(source);
    let indent = block_list_indent(source, node_span(last).0)?;
    let end0 = content_end(last);
    let (off, _comments) = skip_comments(source, end0, None, true);

    let item = render_seq_item(value, indent, step, line_ending);
    let item = normalize_block(source, line_ending, off, value, item);

    if off >= source.len() {
        if source.ends_with('\n') {
            Ok(SourceEdit::insert(
                source.len(),
                format!("{}{}", item, line_ending),
            ))
        } else {
            Ok(SourceEdit::insert(
                source.len(),
                format!("{}{}", line_ending, item),
            ))
        }
    } else {
        // The greedy scan stopped on a following sibling's line; splice at
        // that line's start so the sibling keeps its leading indent.
        let line_start = source[..off].rfind('\n').map(|p| p + 1).unwrap_or(0);
        if line_start <= end0 {
            // No line break between the element and the stop point.
            Ok(SourceEdit::insert(end0, format!("{}{}", line_ending, item)))
        } else {
            Ok(SourceEdit::insert(
                line_start,
                format!("{}{}", item, line_ending),
            ))
        }
    }
}

/// Insert an element into a block sequence before index `index`.
pub(crate) fn block_seq_insert(
    source: &str,
    seq: &Sequence,
    index: usize,
    value: &YamlValue,
    step: usize,
) -> EditResult<SourceEdit> {
    let items: Vec<SyntaxNode> = seq.items().collect();
    if index >= items.len() {
        return block_seq_push(source, seq, value, step);
    }
    let elem = &items[index];
    let elem_start = node_span(elem).0;
    let line_ending = detect_line_ending(source);
    let indent = block_list_indent(source, elem_start)?;
    let hyphen = source[..elem_start]
        .rfind('-')
        .ok_or(EditError::EmptyBlockIndent)?;

    let ctx = EncodeContext {
        indent: indent + 2,
        step,
        line_ending,
    };
    let encoded = encode_block(value, ctx);
    let encoded = strip_first_indent(&encoded);

    let prev_newline = source[..hyphen].rfind('\n');
    let prev_dash = source[..hyphen].rfind('-');
    let nested = match (prev_newline, prev_dash) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(nl), Some(d)) => d > nl,
    };

    if nested {
        // This element sits right after an outer `- `. Splice at its own
        // dash and pad the tail so the shifted element keeps its column.
        let column = node_column(source, hyphen);
        Ok(SourceEdit::insert(
            hyphen,
            format!("- {}{}{}", encoded, line_ending, spaces(column)),
        ))
    } else {
        let line_start = prev_newline.map(|p| p + 1).unwrap_or(0);
        Ok(SourceEdit::insert(
            line_start,
            format!("{}- {}{}", spaces(indent), encoded, line_ending),
        ))
    }
}

/// Replace the element at `index` of a block sequence.
pub(crate) fn block_seq_set(
    source: &str,
    seq: &Sequence,
    index: usize,
    value: &YamlValue,
    step: usize,
) -> EditResult<SourceEdit> {
    let items: Vec<SyntaxNode> = seq.items().collect();
    let elem = items
        .get(index)
        .ok_or_else(|| EditError::Path(format!("sequence index {} out of range", index)))?;
    let (start, span_end) = node_span(elem);
    let line_ending = detect_line_ending(source);
    let column = node_column(source, start);

    let ctx = EncodeContext {
        indent: column,
        step,
        line_ending,
    };
    let encoded = encode_block(value, ctx);
    let encoded = strip_first_indent(&encoded).to_string();

    if span_end <= start {
        // Empty slot after a bare dash.
        return Ok(SourceEdit::insert(start, format!(" {}", encoded)));
    }

    let end = content_end(elem);
    let encoded = normalize_block(source, line_ending, end, value, encoded);
    Ok(SourceEdit::replace(start, end, encoded))
}

/// Remove the element at `index` of a block sequence.
pub(crate) fn block_seq_remove(
    source: &str,
    seq: &Sequence,
    index: usize,
) -> EditResult<SourceEdit> {
    let items: Vec<SyntaxNode> = seq.items().collect();
    let elem = items
        .get(index)
        .ok_or_else(|| EditError::Path(format!("sequence index {} out of range", index)))?;
    let elem_start = node_span(elem).0;
    let dash = source[..elem_start]
        .rfind('-')
        .ok_or(EditError::EmptyBlockIndent)?;
    let end0 = content_end(elem);
    let (off, _comments) = skip_comments(source, end0, None, true);

    let single = items.len() == 1;
    let last = index + 1 == items.len();
    let mut start = dash;
    let mut end = off.min(source.len());

    if single {
        // An empty block sequence has no textual form; fall back to flow.
        if end < source.len() {
            if let Some(nl) = source[..end].rfind('\n') {
                if nl + 1 >= end0 {
                    end = nl;
                }
            }
        }
        return Ok(SourceEdit::replace(start, end, "[]".to_string()));
    }

    if last {
        // Consume the element's own leading indent so it does not leak
        // onto the next line.
        let line_start = source[..start].rfind('\n').map(|p| p + 1).unwrap_or(0);
        if source[line_start..start].chars().all(|c| c == ' ' || c == '\t') {
            start = line_start;
        }
        // Reclaim: the greedy scan swallowed the following sibling's
        // leading indent; give its line back.
        if end < source.len() {
            if let Some(nl) = source[..end].rfind('\n') {
                if nl + 1 >= end0 {
                    end = nl + 1;
                }
            }
        }
    }

    Ok(SourceEdit::replace(start, end, String::new()))
}

/// Add a new key-value entry to a block mapping.
pub(crate) fn block_map_add(
    source: &str,
    map: &Mapping,
    key: &YamlValue,
    value: &YamlValue,
    step: usize,
) -> EditResult<SourceEdit> {
    let line_ending = detect_line_ending(source);
    let entries: Vec<Entry> = map.entries().collect();
    let key_text = encode_flow(key);

    if entries.is_empty() {
        // Only reachable for style-unpinned empty mappings.
        let at = node_span(map.syntax()).1;
        return Ok(SourceEdit::insert(
            at,
            format!("{}: {}", key_text, encode_flow(value)),
        ));
    }

    let keys: Vec<String> = entries.iter().map(entry_key_string).collect();
    let index = alphabetical_index(&keys, &key_sort_string(key));

    let last_entry = entries.last().expect("non-empty");
    let indent = block_map_indent(source, entry_key_start(last_entry))?;
    let ctx = EncodeContext {
        indent: indent + step,
        step,
        line_ending,
    };

    let body = if value.is_block_capable() && !value.is_empty_collection() && !value.is_scalar() {
        format!(
            "{}:{}{}",
            key_text,
            line_ending,
            encode_block(value, ctx)
        )
    } else {
        let encoded = encode_block(value, ctx);
        format!("{}: {}", key_text, strip_first_indent(&encoded))
    };

    if index == entries.len() {
        let cend = entry_content_end(last_entry);
        match source[cend.min(source.len())..].find('\n') {
            Some(rel) => Ok(SourceEdit::insert(
                cend + rel + 1,
                format!("{}{}{}", spaces(indent), body, line_ending),
            )),
            None => Ok(SourceEdit::insert(
                source.len(),
                format!("{}{}{}", line_ending, spaces(indent), body),
            )),
        }
    } else {
        let key_start = entry_key_start(&entries[index]);
        let line_start = source[..key_start].rfind('\n').map(|p| p + 1).unwrap_or(0);
        if source[line_start..key_start]
            .chars()
            .all(|c| c == ' ' || c == '\t')
        {
            Ok(SourceEdit::insert(
                line_start,
                format!("{}{}{}", spaces(indent), body, line_ending),
            ))
        } else {
            // The displaced entry shares its line with outer structure
            // (for example an enclosing `- `); splice at the key itself.
            let column = node_column(source, key_start);
            Ok(SourceEdit::insert(
                key_start,
                format!("{}{}{}", body, line_ending, spaces(column)),
            ))
        }
    }
}

/// Replace the value of an existing block mapping entry.
pub(crate) fn block_map_set(
    source: &str,
    entry: &Entry,
    value: &YamlValue,
    step: usize,
) -> EditResult<SourceEdit> {
    let line_ending = detect_line_ending(source);
    let indent = block_map_indent(source, entry_key_start(entry))?;
    let colon_end = entry
        .colon_end()
        .ok_or_else(|| EditError::Path("mapping entry has no ':' separator".to_string()))?;
    let ctx = EncodeContext {
        indent: indent + step,
        step,
        line_ending,
    };

    let value_node = entry.value_node();
    let (value_start, value_span_end) = value_node
        .as_ref()
        .map(node_span)
        .unwrap_or((colon_end, colon_end));

    if value.is_block_capable() && !value.is_empty_collection() && !value.is_scalar() {
        let end = if value_span_end <= value_start {
            value_start
        } else {
            content_end(value_node.as_ref().expect("span implies node"))
        };
        let replacement = format!("{}{}", line_ending, encode_block(value, ctx));
        let replacement = normalize_block(source, line_ending, end, value, replacement);
        return Ok(SourceEdit::replace(colon_end, end, replacement));
    }

    let encoded = encode_block(value, ctx);
    let encoded = strip_first_indent(&encoded).to_string();

    if value_span_end <= value_start {
        // Null with a zero-length span: an empty slot just past the ':'.
        return Ok(SourceEdit::insert(value_start, format!(" {}", encoded)));
    }

    let end = content_end(value_node.as_ref().expect("span implies node"));
    if source[colon_end..value_start].contains('\n') {
        // The old value sat on its own line(s); take over from the ':'
        // with a fresh single-space separator.
        let encoded = format!(" {}", encoded);
        let encoded = normalize_block(source, line_ending, end, value, encoded);
        return Ok(SourceEdit::replace(colon_end, end, encoded));
    }
    let encoded = normalize_block(source, line_ending, end, value, encoded);
    Ok(SourceEdit::replace(value_start, end, encoded))
}

/// Remove the entry at `index` of a block mapping.
pub(crate) fn block_map_remove(
    source: &str,
    map: &Mapping,
    index: usize,
) -> EditResult<SourceEdit> {
    let entries: Vec<Entry> = map.entries().collect();
    let entry = entries
        .get(index)
        .ok_or_else(|| EditError::Path(format!("mapping entry {} out of range", index)))?;
    let key_start = entry_key_start(entry);

    let end0 = match entry.value_node() {
        Some(value) => {
            let (vstart, vend) = node_span(&value);
            if vend <= vstart {
                // Spans that terminate on the ':' need a nudge past it.
                (entry.colon_end().unwrap_or(vstart) + 1).min(source.len())
            } else {
                content_end(&value)
            }
        }
        None => node_span(entry.syntax()).1,
    };
    let (off, _comments) = skip_comments(source, end0, None, true);

    let single = entries.len() == 1;
    let last = index + 1 == entries.len();
    let mut start = key_start;
    let mut end = off.min(source.len());

    if single {
        if end < source.len() {
            if let Some(nl) = source[..end].rfind('\n') {
                if nl + 1 >= end0 {
                    end = nl;
                }
            }
        }
        return Ok(SourceEdit::replace(start, end, "{}".to_string()));
    }

    if last {
        let line_start = source[..start].rfind('\n').map(|p| p + 1).unwrap_or(0);
        if source[line_start..start].chars().all(|c| c == ' ' || c == '\t') {
            start = line_start;
        }
        if end < source.len() {
            if let Some(nl) = source[..end].rfind('\n') {
                if nl + 1 >= end0 {
                    end = nl + 1;
                }
            }
        }
    }

    Ok(SourceEdit::replace(start, end, String::new()))
}

/// Append to a flow sequence: splice just before the closing `]`.
pub(crate) fn flow_seq_push(
    source: &str,
    seq: &Sequence,
    value: &YamlValue,
) -> EditResult<SourceEdit> {
    let _ = source;
    let close = seq
        .close_bracket_offset()
        .ok_or_else(|| EditError::Path("flow sequence has no closing ']'".to_string()))?;
    let encoded = encode_flow(value);
    if seq.is_empty() {
        Ok(SourceEdit::insert(close, encoded))
    } else {
        Ok(SourceEdit::insert(close, format!(", {}", encoded)))
    }
}

/// Insert into a flow sequence before index `index`.
pub(crate) fn flow_seq_insert(
    source: &str,
    seq: &Sequence,
    index: usize,
    value: &YamlValue,
) -> EditResult<SourceEdit> {
    let items: Vec<SyntaxNode> = seq.items().collect();
    if index >= items.len() {
        return flow_seq_push(source, seq, value);
    }
    let elem_start = node_span(&items[index]).0;
    Ok(SourceEdit::insert(
        elem_start,
        format!("{}, ", encode_flow(value)),
    ))
}

/// Replace the element at `index` of a flow sequence: splice its span.
pub(crate) fn flow_seq_set(
    source: &str,
    seq: &Sequence,
    index: usize,
    value: &YamlValue,
) -> EditResult<SourceEdit> {
    let _ = source;
    let items: Vec<SyntaxNode> = seq.items().collect();
    let elem = items
        .get(index)
        .ok_or_else(|| EditError::Path(format!("sequence index {} out of range", index)))?;
    let (start, _) = node_span(elem);
    Ok(SourceEdit::replace(
        start,
        content_end(elem),
        encode_flow(value),
    ))
}

/// Remove the element at `index` of a flow sequence.
pub(crate) fn flow_seq_remove(
    source: &str,
    seq: &Sequence,
    index: usize,
) -> EditResult<SourceEdit> {
    let items: Vec<SyntaxNode> = seq.items().collect();
    let elem = items
        .get(index)
        .ok_or_else(|| EditError::Path(format!("sequence index {} out of range", index)))?;

    if index == 0 {
        let open = node_span(seq.syntax()).0 + 1;
        let end = match items.get(1) {
            Some(next) => node_span(next).0,
            None => seq
                .close_bracket_offset()
                .ok_or_else(|| EditError::Path("flow sequence has no closing ']'".to_string()))?,
        };
        Ok(SourceEdit::replace(open, end, String::new()))
    } else {
        let elem_start = node_span(elem).0;
        let comma = source[..elem_start]
            .rfind(',')
            .ok_or_else(|| EditError::Path("malformed flow sequence".to_string()))?;
        Ok(SourceEdit::replace(comma, content_end(elem), String::new()))
    }
}

/// Add a key-value entry to a flow mapping.
pub(crate) fn flow_map_add(
    source: &str,
    map: &Mapping,
    key: &YamlValue,
    value: &YamlValue,
) -> EditResult<SourceEdit> {
    let _ = source;
    let close = map
        .close_brace_offset()
        .ok_or_else(|| EditError::Path("flow mapping has no closing '}'".to_string()))?;
    let entries: Vec<Entry> = map.entries().collect();
    let pair = format!("{}: {}", encode_flow(key), encode_flow(value));

    if entries.is_empty() {
        return Ok(SourceEdit::insert(close, pair));
    }

    let keys: Vec<String> = entries.iter().map(entry_key_string).collect();
    let index = alphabetical_index(&keys, &key_sort_string(key));

    if index < entries.len() {
        let key_start = entry_key_start(&entries[index]);
        Ok(SourceEdit::insert(key_start, format!("{}, ", pair)))
    } else {
        Ok(SourceEdit::insert(close, format!(", {}", pair)))
    }
}

/// Replace the value of a flow mapping entry: splice the entire value span.
pub(crate) fn flow_map_set(
    source: &str,
    entry: &Entry,
    value: &YamlValue,
) -> EditResult<SourceEdit> {
    let _ = source;
    let colon_end = entry
        .colon_end()
        .ok_or_else(|| EditError::Path("mapping entry has no ':' separator".to_string()))?;
    let value_node = entry.value_node();
    let (value_start, value_span_end) = value_node
        .as_ref()
        .map(node_span)
        .unwrap_or((colon_end, colon_end));
    let encoded = encode_flow(value);

    if value_span_end <= value_start {
        Ok(SourceEdit::insert(value_start, format!(" {}", encoded)))
    } else {
        Ok(SourceEdit::replace(
            value_start,
            content_end(value_node.as_ref().expect("span implies node")),
            encoded,
        ))
    }
}

/// Remove the entry at `index` of a flow mapping.
pub(crate) fn flow_map_remove(
    source: &str,
    map: &Mapping,
    index: usize,
) -> EditResult<SourceEdit> {
    let entries: Vec<Entry> = map.entries().collect();
    let entry = entries
        .get(index)
        .ok_or_else(|| EditError::Path(format!("mapping entry {} out of range", index)))?;

    if index == 0 {
        let open = node_span(map.syntax()).0 + 1;
        let end = match entries.get(1) {
            Some(next) => entry_key_start(next),
            None => map
                .close_brace_offset()
                .ok_or_else(|| EditError::Path("flow mapping has no closing '}'".to_string()))?,
        };
        Ok(SourceEdit::replace(open, end, String::new()))
    } else {
        let key_start = entry_key_start(entry);
        let comma = source[..key_start]
            .rfind(',')
            .ok_or_else(|| EditError::Path("malformed flow mapping".to_string()))?;
        Ok(SourceEdit::replace(
            comma,
            entry_content_end(entry),
            String::new(),
        ))
    }
}

/// Replace the whole document body.
pub(crate) fn replace_root(
    source: &str,
    document: &Document,
    value: &YamlValue,
    step: usize,
) -> EditResult<SourceEdit> {
    let line_ending = detect_line_ending(source);
    match document.root_node() {
        Some(root) => {
            let (start, _) = node_span(&root);
            let end = content_end(&root);
            let column = node_column(source, start);
            // Scalars are encoded one step in so block scalar content
            // lands deeper than the indicator line.
            let indent = if value.is_scalar() {
                column + step
            } else {
                column
            };
            let ctx = EncodeContext {
                indent,
                step,
                line_ending,
            };
            let encoded = encode_block(value, ctx);
            let encoded = strip_first_indent(&encoded).to_string();
            let encoded = normalize_block(source, line_ending, end, value, encoded);
            Ok(SourceEdit::replace(start, end, encoded))
        }
        None => {
            let ctx = EncodeContext {
                indent: 0,
                step,
                line_ending,
            };
            Ok(SourceEdit::insert(source.len(), encode_block(value, ctx)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::Yaml;

    fn seq_of(source: &str) -> (Sequence, Yaml) {
        let tree = Yaml::parse(source).tree();
        let seq = tree.document().unwrap().as_sequence().unwrap();
        (seq, tree)
    }

    fn apply(source: &str, edit: SourceEdit) -> String {
        let mut text = source.to_string();
        edit.apply(&mut text);
        text
    }

    #[test]
    fn test_source_edit_apply() {
        let mut text = "hello world".to_string();
        SourceEdit::replace(6, 11, "there".to_string()).apply(&mut text);
        assert_eq!(text, "hello there");

        let mut text = "ab".to_string();
        SourceEdit::insert(1, "-".to_string()).apply(&mut text);
        assert_eq!(text, "a-b");
    }

    #[test]
    fn test_block_push_preserves_trailing_newline() {
        let source = "- a\n- b\n";
        let (seq, _tree) = seq_of(source);
        let edit = block_seq_push(source, &seq, &YamlValue::from("c"), 2).unwrap();
        assert_eq!(apply(source, edit), "- a\n- b\n- c\n");
    }

    #[test]
    fn test_block_push_without_trailing_newline() {
        let source = "- a\n- b";
        let (seq, _tree) = seq_of(source);
        let edit = block_seq_push(source, &seq, &YamlValue::from("c"), 2).unwrap();
        assert_eq!(apply(source, edit), "- a\n- b\n- c");
    }

    #[test]
    fn test_block_remove_middle() {
        let source = "- a\n- b\n- c\n";
        let (seq, _tree) = seq_of(source);
        let edit = block_seq_remove(source, &seq, 1).unwrap();
        assert_eq!(apply(source, edit), "- a\n- c\n");
    }

    #[test]
    fn test_block_remove_last() {
        let source = "- a\n- b\n";
        let (seq, _tree) = seq_of(source);
        let edit = block_seq_remove(source, &seq, 1).unwrap();
        assert_eq!(apply(source, edit), "- a\n");
    }

    #[test]
    fn test_block_remove_only_becomes_flow_empty() {
        let source = "- a\n";
        let (seq, _tree) = seq_of(source);
        let edit = block_seq_remove(source, &seq, 0).unwrap();
        assert_eq!(apply(source, edit), "[]");
    }

    #[test]
    fn test_block_insert_at_front() {
        let source = "- a\n- b\n";
        let (seq, _tree) = seq_of(source);
        let edit = block_seq_insert(source, &seq, 0, &YamlValue::from("z"), 2).unwrap();
        assert_eq!(apply(source, edit), "- z\n- a\n- b\n");
    }

    #[test]
    fn test_alphabetical_index() {
        let keys: Vec<String> = ["a", "b", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(alphabetical_index(&keys, "c"), 2);
        assert_eq!(alphabetical_index(&keys, "e"), 3);
        assert_eq!(alphabetical_index(&keys, "A"), 0);

        let unordered: Vec<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(alphabetical_index(&unordered, "c"), 2);
    }
}
