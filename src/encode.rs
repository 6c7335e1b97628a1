//! Rendering values back to YAML text, in flow or block style, with the
//! scalar quoting rules the edit planners rely on.

use crate::scalar::{ScalarRepr, ScalarStyle, ScalarValue};
use crate::value::YamlValue;
use crate::yaml::Scalar;
use rowan::ast::AstNode;

/// Context for block encoding.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    /// Column the first line of the encoding starts at
    pub indent: usize,
    /// Indentation step for nested structures
    pub step: usize,
    /// Line ending to emit
    pub line_ending: &'a str,
}

impl<'a> EncodeContext<'a> {
    /// A context one indentation step deeper.
    fn deeper(self) -> Self {
        EncodeContext {
            indent: self.indent + self.step,
            ..self
        }
    }
}

/// Render a value in flow style: `[a, b]`, `{k: v}`, scalars inline.
pub fn encode_flow(value: &YamlValue) -> String {
    match value {
        YamlValue::Scalar(s) => encode_scalar_flow(s),
        YamlValue::Sequence(seq) => {
            let items: Vec<String> = seq.items.iter().map(encode_flow).collect();
            format!("[{}]", items.join(", "))
        }
        YamlValue::Mapping(map) => {
            let entries: Vec<String> = map
                .entries
                .iter()
                .map(|(k, v)| format!("{}: {}", encode_flow(k), encode_flow(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Render a value in block style. The first line carries `ctx.indent`
/// spaces; callers that splice mid-line strip them. Values pinned to flow
/// style, and empty collections, fall back to flow.
pub fn encode_block(value: &YamlValue, ctx: EncodeContext<'_>) -> String {
    let pad = " ".repeat(ctx.indent);
    if !value.is_block_capable() || value.is_empty_collection() {
        return format!("{}{}", pad, encode_flow(value));
    }
    match value {
        YamlValue::Scalar(s) => format!("{}{}", pad, encode_scalar_block(s, ctx)),
        YamlValue::Sequence(seq) => {
            // Element content anchors two columns in, right after `- `, so
            // multi-line elements stay aligned whatever the document step.
            let item_ctx = EncodeContext {
                indent: ctx.indent + 2,
                ..ctx
            };
            let lines: Vec<String> = seq
                .items
                .iter()
                .map(|item| {
                    let child = encode_block(item, item_ctx);
                    format!("{}- {}", pad, strip_first_indent(&child))
                })
                .collect();
            lines.join(ctx.line_ending)
        }
        YamlValue::Mapping(map) => {
            let lines: Vec<String> = map
                .entries
                .iter()
                .map(|(k, v)| {
                    let key = encode_flow(k);
                    if v.is_block_capable() && !v.is_empty_collection() && !v.is_scalar() {
                        format!(
                            "{}{}:{}{}",
                            pad,
                            key,
                            ctx.line_ending,
                            encode_block(v, ctx.deeper())
                        )
                    } else {
                        let child = encode_block(v, ctx.deeper());
                        format!("{}{}: {}", pad, key, strip_first_indent(&child))
                    }
                })
                .collect();
            lines.join(ctx.line_ending)
        }
    }
}

/// Drop the indentation of the first line of a block encoding, so the text
/// can sit right after `- ` or `key: `.
pub fn strip_first_indent(encoded: &str) -> &str {
    encoded.trim_start_matches(' ')
}

fn encode_scalar_flow(scalar: &ScalarValue) -> String {
    match scalar.repr() {
        ScalarRepr::Null => "null".to_string(),
        ScalarRepr::Bool(b) => b.to_string(),
        ScalarRepr::Int(i) => i.to_string(),
        ScalarRepr::Float(f) => format_float(*f),
        ScalarRepr::Str(s) => {
            if has_unprintable(s) || s.contains('\n') {
                return double_quote(s);
            }
            match scalar.style() {
                ScalarStyle::SingleQuoted => single_quote(s),
                ScalarStyle::DoubleQuoted | ScalarStyle::Literal | ScalarStyle::Folded => {
                    double_quote(s)
                }
                ScalarStyle::Plain | ScalarStyle::Any => {
                    if is_dangerous(s) {
                        double_quote(s)
                    } else {
                        s.clone()
                    }
                }
            }
        }
    }
}

/// Render a scalar for block context. `ctx.indent` is the column block
/// scalar content is written at; the indicator line itself carries no
/// leading indent here.
fn encode_scalar_block(scalar: &ScalarValue, ctx: EncodeContext<'_>) -> String {
    match scalar.repr() {
        ScalarRepr::Str(s) => {
            if has_unprintable(s) {
                return double_quote(s);
            }
            match scalar.style() {
                ScalarStyle::Plain | ScalarStyle::Any => {
                    if is_dangerous(s) {
                        double_quote(s)
                    } else {
                        s.clone()
                    }
                }
                ScalarStyle::SingleQuoted => {
                    if s.contains('\n') {
                        double_quote(s)
                    } else {
                        single_quote(s)
                    }
                }
                ScalarStyle::DoubleQuoted => double_quote(s),
                ScalarStyle::Literal => {
                    if s.is_empty() || s.starts_with(' ') || s.starts_with('\t') {
                        double_quote(s)
                    } else {
                        literal_block(s, ctx)
                    }
                }
                ScalarStyle::Folded => {
                    if s.is_empty() || s.starts_with(' ') || s.starts_with('\t') {
                        double_quote(s)
                    } else {
                        folded_block(s, ctx)
                    }
                }
            }
        }
        _ => encode_scalar_flow(scalar),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        // Debug formatting keeps a decimal point on whole floats.
        format!("{:?}", f)
    }
}

/// Is `s` unsafe to write as a plain scalar? True when it is empty,
/// contains a flow indicator, starts with a reserved indicator, or fails
/// the re-parse probe: parsing it back (with warnings silenced) must yield
/// exactly the same plain string.
pub fn is_dangerous(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    if s.contains(['{', '}', '[', ']', ',']) {
        return true;
    }
    if s.starts_with(['!', '&', '*', '@', '`', '%', '#', '|', '>', '"', '\'']) {
        return true;
    }
    if matches!(s, "-" | "?" | ":")
        || s.starts_with("- ")
        || s.starts_with("? ")
        || s.starts_with(": ")
    {
        return true;
    }
    probe_disagrees(s)
}

/// Re-parse `s` as a standalone document and check the result is a plain
/// scalar with the very same string value. The probe parse keeps its
/// warnings to itself.
fn probe_disagrees(s: &str) -> bool {
    let parsed = crate::yaml::parse(s);
    if !parsed.errors.is_empty() {
        return true;
    }
    let root = crate::Yaml::from(crate::yaml::SyntaxNode::new_root_mut(parsed.green_node));
    let Some(document) = root.document() else {
        return true;
    };
    let Some(node) = document.root_node() else {
        return true;
    };
    let Some(scalar) = Scalar::cast(node) else {
        return true;
    };
    if scalar.style() != ScalarStyle::Plain {
        return true;
    }
    // Anything outside the scalar's own span (a comment, a second line)
    // means the plain rendition would not round-trip.
    if scalar.syntax().text_range().len() != rowan::TextSize::of(s) {
        return true;
    }
    scalar.to_scalar_value().repr() != &ScalarRepr::Str(s.to_string())
}

/// Code units that always force double quoting.
fn has_unprintable(s: &str) -> bool {
    s.chars().any(|c| {
        matches!(
            c,
            '\0' | '\u{7}'
                | '\u{8}'
                | '\u{B}'
                | '\u{C}'
                | '\r'
                | '\u{1B}'
                | '\u{85}'
                | '\u{A0}'
                | '\u{2028}'
                | '\u{2029}'
        ) || (c.is_control() && c != '\t' && c != '\n')
    })
}

/// Double-quote `s`, escaping per the YAML escape table.
pub fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{B}' => out.push_str("\\v"),
            '\u{C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1B}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{A0}' => out.push_str("\\_"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            '"' => out.push_str("\\\""),
            '/' => out.push_str("\\/"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// `|<chomp>` literal emission: content indented under the indicator,
/// keep-chomping when the string ends in trailing space or a line break.
fn literal_block(s: &str, ctx: EncodeContext<'_>) -> String {
    let chomp = block_chomp(s);
    let pad = " ".repeat(ctx.indent);
    let body = s.replace('\n', &format!("{}{}", ctx.line_ending, pad));
    format!("|{}{}{}{}", chomp, ctx.line_ending, pad, body)
}

/// `><chomp>` folded emission. Interior `\n` must survive the fold, so a
/// break between two non-indented lines gets a paragraph separator (an
/// extra line ending). Trailing whitespace is split off first and
/// re-appended indented.
fn folded_block(s: &str, ctx: EncodeContext<'_>) -> String {
    let chomp = block_chomp(s);
    let pad = " ".repeat(ctx.indent);
    let body_len = s.trim_end_matches([' ', '\t', '\n']).len();
    let (body, tail) = s.split_at(body_len);

    let mut out = format!(">{}", chomp);
    let mut prev_nonempty = false;
    let mut prev_indented = false;
    for (i, line) in body.split('\n').enumerate() {
        let indented = line.starts_with(' ') || line.starts_with('\t');
        if i > 0 && prev_nonempty && !line.is_empty() && !indented && !prev_indented {
            // Paragraph separator so the break survives re-parsing.
            out.push_str(ctx.line_ending);
        }
        out.push_str(ctx.line_ending);
        out.push_str(&pad);
        out.push_str(line);
        prev_nonempty = !line.is_empty();
        prev_indented = indented;
    }
    for c in tail.chars() {
        if c == '\n' {
            out.push_str(ctx.line_ending);
            out.push_str(&pad);
        } else {
            out.push(c);
        }
    }
    out
}

fn block_chomp(s: &str) -> char {
    if s.ends_with('\n') || s.ends_with(' ') {
        '+'
    } else {
        '-'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::YamlValue;

    fn ctx(indent: usize) -> EncodeContext<'static> {
        EncodeContext {
            indent,
            step: 2,
            line_ending: "\n",
        }
    }

    #[test]
    fn test_flow_scalars() {
        assert_eq!(encode_flow(&YamlValue::from("hello")), "hello");
        assert_eq!(encode_flow(&YamlValue::from(42)), "42");
        assert_eq!(encode_flow(&YamlValue::from(3.14)), "3.14");
        assert_eq!(encode_flow(&YamlValue::from(1.0)), "1.0");
        assert_eq!(encode_flow(&YamlValue::from(true)), "true");
        assert_eq!(encode_flow(&YamlValue::null()), "null");
    }

    #[test]
    fn test_flow_collections() {
        let seq = YamlValue::sequence(vec![YamlValue::from(1), YamlValue::from("two")]);
        assert_eq!(encode_flow(&seq), "[1, two]");

        let map = YamlValue::mapping(vec![(YamlValue::from("a"), YamlValue::from(1))]);
        assert_eq!(encode_flow(&map), "{a: 1}");

        assert_eq!(encode_flow(&YamlValue::sequence(vec![])), "[]");
        assert_eq!(encode_flow(&YamlValue::mapping(vec![])), "{}");
    }

    #[test]
    fn test_dangerous_strings_get_quoted() {
        for s in [
            "true", "false", "null", "~", "42", "3.14", "- item", "a: b", "{x}", "[x]", "a,b",
            "# note", "", " lead", "trail ", "multi\nline", "YAML Ain't Markup Language",
            "'quoted'", "&anchor", "*alias", "!tag", "%pct", "@at",
        ] {
            assert!(is_dangerous(s), "{:?} should be dangerous", s);
            let encoded = encode_flow(&YamlValue::from(s));
            assert!(
                encoded.starts_with('"'),
                "{:?} should be double-quoted, got {:?}",
                s,
                encoded
            );
        }
    }

    #[test]
    fn test_safe_strings_stay_plain() {
        for s in ["hello", "hello world", "x-y_z", "12:30", "v1.2.3-beta", "-x"] {
            assert!(!is_dangerous(s), "{:?} should be safe", s);
            assert_eq!(encode_flow(&YamlValue::from(s)), s);
        }
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(double_quote("a\nb"), "\"a\\nb\"");
        assert_eq!(double_quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(double_quote("a/b"), "\"a\\/b\"");
        assert_eq!(double_quote("tab\there"), "\"tab\\there\"");
        assert_eq!(double_quote("\u{1B}"), "\"\\e\"");
        assert_eq!(double_quote("\u{1}"), "\"\\x01\"");
    }

    #[test]
    fn test_single_quote_fallbacks() {
        let v = YamlValue::Scalar(crate::ScalarValue::single_quoted("it's"));
        assert_eq!(encode_flow(&v), "'it''s'");

        // Newline forces double quoting even when single was requested.
        let v = YamlValue::Scalar(crate::ScalarValue::single_quoted("a\nb"));
        assert_eq!(encode_flow(&v), "\"a\\nb\"");
    }

    #[test]
    fn test_block_scalar_plain() {
        let v = YamlValue::from("hello");
        assert_eq!(encode_block(&v, ctx(2)), "  hello");
    }

    #[test]
    fn test_block_sequence() {
        let v = YamlValue::sequence(vec![YamlValue::from("a"), YamlValue::from("b")]);
        assert_eq!(encode_block(&v, ctx(0)), "- a\n- b");
        assert_eq!(encode_block(&v, ctx(2)), "  - a\n  - b");
    }

    #[test]
    fn test_block_mapping() {
        let v = YamlValue::mapping(vec![
            (YamlValue::from("a"), YamlValue::from(1)),
            (
                YamlValue::from("b"),
                YamlValue::sequence(vec![YamlValue::from("x")]),
            ),
        ]);
        assert_eq!(encode_block(&v, ctx(0)), "a: 1\nb:\n  - x");
    }

    #[test]
    fn test_nested_collection_attaches_to_dash() {
        let v = YamlValue::sequence(vec![YamlValue::sequence(vec![
            YamlValue::from("x"),
            YamlValue::from("y"),
        ])]);
        assert_eq!(encode_block(&v, ctx(0)), "- - x\n  - y");
    }

    #[test]
    fn test_empty_collections_render_flow() {
        assert_eq!(encode_block(&YamlValue::sequence(vec![]), ctx(2)), "  []");
        assert_eq!(encode_block(&YamlValue::mapping(vec![]), ctx(0)), "{}");
        let v = YamlValue::mapping(vec![(
            YamlValue::from("a"),
            YamlValue::sequence(vec![]),
        )]);
        assert_eq!(encode_block(&v, ctx(0)), "a: []");
    }

    #[test]
    fn test_flow_pinned_collection_in_block_context() {
        let v = YamlValue::mapping(vec![(
            YamlValue::from("a"),
            YamlValue::flow_sequence(vec![YamlValue::from(1), YamlValue::from(2)]),
        )]);
        assert_eq!(encode_block(&v, ctx(0)), "a: [1, 2]");
    }

    #[test]
    fn test_literal_block() {
        let v = YamlValue::Scalar(crate::ScalarValue::literal("line1\nline2"));
        assert_eq!(encode_block(&v, ctx(2)), "  |-\n  line1\n  line2");

        let v = YamlValue::Scalar(crate::ScalarValue::literal("keep\n"));
        assert_eq!(encode_block(&v, ctx(2)), "  |+\n  keep\n  ");
    }

    #[test]
    fn test_folded_block() {
        let v = YamlValue::Scalar(crate::ScalarValue::folded("para1\npara2"));
        assert_eq!(encode_block(&v, ctx(2)), "  >-\n  para1\n\n  para2");
    }

    #[test]
    fn test_literal_fallback_to_double_quote() {
        let v = YamlValue::Scalar(crate::ScalarValue::literal(" leading"));
        assert_eq!(encode_block(&v, ctx(0)), "\" leading\"");
        let v = YamlValue::Scalar(crate::ScalarValue::literal(""));
        assert_eq!(encode_block(&v, ctx(0)), "\"\"");
    }
}
