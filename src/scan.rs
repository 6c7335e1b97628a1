//! Raw-text scanners: line endings, indentation recovery, content-sensitive
//! node ends and the comment skipper the planners are built on.

use crate::error::EditError;
use crate::lex::SyntaxKind;
use crate::yaml::{node_span, Document, Entry, Mapping, Sequence, SyntaxNode};
use rowan::ast::AstNode;

/// The dominant line ending of a document: `"\r\n"` iff Windows line
/// endings strictly outnumber Unix ones, `"\n"` otherwise.
pub fn detect_line_ending(source: &str) -> &'static str {
    let bytes = source.as_bytes();
    let mut windows = 0usize;
    let mut unix = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\n' {
            if i > 0 && bytes[i - 1] == b'\r' {
                windows += 1;
            } else {
                unix += 1;
            }
        }
    }
    if windows > unix {
        "\r\n"
    } else {
        "\n"
    }
}

/// Column of the first byte of a node (bytes since the preceding newline).
pub fn node_column(source: &str, offset: usize) -> usize {
    let line_start = source[..offset].rfind('\n').map(|p| p + 1).unwrap_or(0);
    offset - line_start
}

/// The document's indentation step, probed from the first block collection
/// nested directly under the root collection. Defaults to 2 when the
/// document has no such collection; clamped to at least 1.
pub fn indent_step(source: &str, document: &Document) -> usize {
    let Some(root) = document.root_node() else {
        return 2;
    };
    let root_col = node_column(source, node_span(&root).0);

    let children: Vec<SyntaxNode> = match root.kind() {
        SyntaxKind::MAPPING => Mapping::cast(root.clone())
            .map(|m| m.entries().filter_map(|e| e.value_node()).collect())
            .unwrap_or_default(),
        SyntaxKind::SEQUENCE => Sequence::cast(root.clone())
            .map(|s| s.items().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    for child in children {
        let is_block_collection = match child.kind() {
            SyntaxKind::MAPPING => !Mapping::cast(child.clone()).is_some_and(|m| m.is_flow()),
            SyntaxKind::SEQUENCE => !Sequence::cast(child.clone()).is_some_and(|s| s.is_flow()),
            _ => false,
        };
        if !is_block_collection {
            continue;
        }
        let col = node_column(source, node_span(&child).0);
        if col > root_col {
            return (col - root_col).max(1);
        }
    }
    2
}

/// Indentation of a block sequence, recovered from the raw text around the
/// start offset of its last element: the nearest `-` behind the element,
/// measured from the nearest line break before that.
pub fn block_list_indent(source: &str, last_elem_start: usize) -> Result<usize, EditError> {
    let hyphen = source[..last_elem_start]
        .rfind('-')
        .ok_or(EditError::EmptyBlockIndent)?;
    if hyphen == 0 {
        return Ok(0);
    }
    match source[..hyphen].rfind('\n') {
        Some(newline) => Ok(hyphen - newline - 1),
        None => Ok(hyphen),
    }
}

/// Indentation of a block mapping, recovered from the start offset of its
/// last key. A `?` complex-key marker on the same line takes precedence
/// over the key itself.
pub fn block_map_indent(source: &str, last_key_start: usize) -> Result<usize, EditError> {
    let line_start = source[..last_key_start]
        .rfind('\n')
        .map(|p| p + 1)
        .unwrap_or(0);
    if let Some(q) = source[line_start..last_key_start].find('?') {
        return Ok(q);
    }
    Ok(last_key_start - line_start)
}

/// The offset just past the last semantically meaningful byte of a node.
/// Block collections recurse into their last child; flow collections and
/// scalars end at their span.
pub fn content_end(node: &SyntaxNode) -> usize {
    match node.kind() {
        SyntaxKind::SEQUENCE => {
            let seq = Sequence::cast(node.clone()).expect("kind checked");
            if seq.is_flow() {
                return node_span(node).1;
            }
            match seq.items().last() {
                Some(last) => content_end(&last),
                None => node_span(node).1,
            }
        }
        SyntaxKind::MAPPING => {
            let map = Mapping::cast(node.clone()).expect("kind checked");
            if map.is_flow() {
                return node_span(node).1;
            }
            match map.entries().last() {
                Some(entry) => entry_content_end(&entry),
                None => node_span(node).1,
            }
        }
        _ => node_span(node).1,
    }
}

/// Content end of a mapping entry: its value's content end, or just past
/// the `:` when the entry has no written value.
pub fn entry_content_end(entry: &Entry) -> usize {
    match entry.value_node() {
        Some(value) => {
            let (start, end) = node_span(&value);
            if end > start {
                content_end(&value)
            } else {
                // Zero-length value: the span already sits just past the ':'.
                start
            }
        }
        None => node_span(entry.syntax()).1,
    }
}

/// Skip-and-extract comment scanner.
///
/// With `end` given, collects the `#…` parts of every line in
/// `source[start..end]` and returns `end` unchanged.
///
/// Without `end`, advances a cursor from `start`:
/// * lazy (`greedy == false`): skips inline spaces and comment lines, and
///   stops just past the first line break not preceded by a comment;
/// * greedy (`greedy == true`): skips all whitespace, line breaks and
///   comments until EOF or the next non-whitespace, non-comment character
///   (deliberately consuming a following sibling's leading indent, which
///   the planners reclaim).
///
/// Both modes collect every comment seen.
pub fn skip_comments(
    source: &str,
    start: usize,
    end: Option<usize>,
    greedy: bool,
) -> (usize, Vec<String>) {
    if let Some(end) = end {
        let end = end.min(source.len());
        let mut comments = Vec::new();
        for line in source[start.min(end)..end].lines() {
            if let Some(pos) = find_comment_start(line) {
                comments.push(line[pos..].trim_end().to_string());
            }
        }
        return (end, comments);
    }

    let bytes = source.as_bytes();
    let len = source.len();
    let mut comments = Vec::new();
    let mut i = start.min(len);

    loop {
        while i < len && (bytes[i] == b' ' || bytes[i] == b'\t') {
            i += 1;
        }
        if i >= len {
            return (i, comments);
        }
        match bytes[i] {
            b'#' => {
                let eol = source[i..]
                    .find(['\n', '\r'])
                    .map(|p| i + p)
                    .unwrap_or(len);
                comments.push(source[i..eol].to_string());
                i = eol;
                // Consume the break terminating the comment line.
                i += line_break_len(bytes, i);
            }
            b'\n' | b'\r' => {
                let brk = line_break_len(bytes, i);
                i += brk;
                if !greedy {
                    return (i, comments);
                }
            }
            _ => return (i, comments),
        }
    }
}

fn line_break_len(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'\n') => 1,
        Some(b'\r') => {
            if bytes.get(i + 1) == Some(&b'\n') {
                2
            } else {
                1
            }
        }
        _ => 0,
    }
}

/// Where a comment starts on `line`, honoring the rule that `#` only opens
/// a comment at the line start or after whitespace.
fn find_comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && (i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t') {
            return Some(i);
        }
    }
    None
}
