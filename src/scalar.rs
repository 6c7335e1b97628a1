//! Typed scalar values with style metadata, plus the decoding of scalar
//! source text (quote unescaping, block-scalar folding and chomping).

use std::fmt;

/// Style of scalar representation in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Plain scalar (no quotes)
    Plain,
    /// Single-quoted scalar
    SingleQuoted,
    /// Double-quoted scalar
    DoubleQuoted,
    /// Literal block scalar (|)
    Literal,
    /// Folded block scalar (>)
    Folded,
    /// Style not pinned; the encoder picks one
    Any,
}

/// The typed payload of a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarRepr {
    /// The null value
    Null,
    /// A boolean
    Bool(bool),
    /// An integer
    Int(i64),
    /// A floating point number
    Float(f64),
    /// A string
    Str(String),
}

/// A scalar value together with its requested rendering style.
///
/// Equality compares the logical value only; two scalars with different
/// styles but the same payload are equal.
#[derive(Debug, Clone)]
pub struct ScalarValue {
    repr: ScalarRepr,
    style: ScalarStyle,
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl ScalarValue {
    /// Create a scalar with an explicit style.
    pub fn with_style(repr: ScalarRepr, style: ScalarStyle) -> Self {
        Self { repr, style }
    }

    /// Create a null scalar.
    pub fn null() -> Self {
        Self {
            repr: ScalarRepr::Null,
            style: ScalarStyle::Plain,
        }
    }

    /// Create a string scalar with unpinned style.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            repr: ScalarRepr::Str(value.into()),
            style: ScalarStyle::Any,
        }
    }

    /// Create a plain-styled string scalar.
    pub fn plain(value: impl Into<String>) -> Self {
        Self::with_style(ScalarRepr::Str(value.into()), ScalarStyle::Plain)
    }

    /// Create a single-quoted string scalar.
    pub fn single_quoted(value: impl Into<String>) -> Self {
        Self::with_style(ScalarRepr::Str(value.into()), ScalarStyle::SingleQuoted)
    }

    /// Create a double-quoted string scalar.
    pub fn double_quoted(value: impl Into<String>) -> Self {
        Self::with_style(ScalarRepr::Str(value.into()), ScalarStyle::DoubleQuoted)
    }

    /// Create a literal block scalar.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::with_style(ScalarRepr::Str(value.into()), ScalarStyle::Literal)
    }

    /// Create a folded block scalar.
    pub fn folded(value: impl Into<String>) -> Self {
        Self::with_style(ScalarRepr::Str(value.into()), ScalarStyle::Folded)
    }

    /// The typed payload.
    pub fn repr(&self) -> &ScalarRepr {
        &self.repr
    }

    /// The requested rendering style.
    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    /// Replace the style, keeping the payload.
    pub fn restyled(mut self, style: ScalarStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether this is the null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self.repr, ScalarRepr::Null)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            ScalarRepr::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The string a mapping key sorts and compares by.
    pub fn coerce_string(&self) -> String {
        match &self.repr {
            ScalarRepr::Null => "null".to_string(),
            ScalarRepr::Bool(b) => b.to_string(),
            ScalarRepr::Int(i) => i.to_string(),
            ScalarRepr::Float(f) => f.to_string(),
            ScalarRepr::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coerce_string())
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::with_style(ScalarRepr::Int(value as i64), ScalarStyle::Plain)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::with_style(ScalarRepr::Int(value), ScalarStyle::Plain)
    }
}

impl From<u32> for ScalarValue {
    fn from(value: u32) -> Self {
        Self::with_style(ScalarRepr::Int(value as i64), ScalarStyle::Plain)
    }
}

impl From<f32> for ScalarValue {
    fn from(value: f32) -> Self {
        Self::with_style(ScalarRepr::Float(value as f64), ScalarStyle::Plain)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::with_style(ScalarRepr::Float(value), ScalarStyle::Plain)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::with_style(ScalarRepr::Bool(value), ScalarStyle::Plain)
    }
}

impl From<()> for ScalarValue {
    fn from(_: ()) -> Self {
        Self::null()
    }
}

/// Interpret plain scalar text as a typed value (YAML 1.2 core-ish rules).
pub fn parse_plain(text: &str) -> ScalarRepr {
    match text {
        "" | "null" | "Null" | "NULL" | "~" => return ScalarRepr::Null,
        "true" | "True" | "TRUE" => return ScalarRepr::Bool(true),
        "false" | "False" | "FALSE" => return ScalarRepr::Bool(false),
        ".inf" | "+.inf" => return ScalarRepr::Float(f64::INFINITY),
        "-.inf" => return ScalarRepr::Float(f64::NEG_INFINITY),
        ".nan" => return ScalarRepr::Float(f64::NAN),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        return ScalarRepr::Int(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        return ScalarRepr::Float(f);
    }
    ScalarRepr::Str(text.to_string())
}

/// Unescape the inside of a single-quoted scalar (quotes already stripped).
pub fn unescape_single(inner: &str) -> String {
    inner.replace("''", "'")
}

/// Unescape the inside of a double-quoted scalar (quotes already stripped).
/// Unknown escapes are kept verbatim rather than failing; the parser reports
/// a positioned error separately when it spots one.
pub fn unescape_double(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('v') => out.push('\u{B}'),
            Some('f') => out.push('\u{C}'),
            Some('r') => out.push('\r'),
            Some('e') => out.push('\u{1B}'),
            Some('N') => out.push('\u{85}'),
            Some('_') => out.push('\u{A0}'),
            Some('L') => out.push('\u{2028}'),
            Some('P') => out.push('\u{2029}'),
            Some('"') => out.push('"'),
            Some('/') => out.push('/'),
            Some('\\') => out.push('\\'),
            Some('x') => push_hex(&mut out, &mut chars, 2),
            Some('u') => push_hex(&mut out, &mut chars, 4),
            Some('U') => push_hex(&mut out, &mut chars, 8),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn push_hex(out: &mut String, chars: &mut std::str::Chars<'_>, digits: usize) {
    let mut value: u32 = 0;
    let mut taken = String::new();
    for _ in 0..digits {
        match chars.next() {
            Some(c) if c.is_ascii_hexdigit() => {
                taken.push(c);
                value = value * 16 + c.to_digit(16).unwrap();
            }
            Some(c) => {
                // Malformed escape: keep the raw text.
                out.push_str("\\x");
                out.push_str(&taken);
                out.push(c);
                return;
            }
            None => {
                out.push_str("\\x");
                out.push_str(&taken);
                return;
            }
        }
    }
    match char::from_u32(value) {
        Some(c) => out.push(c),
        None => out.push('\u{FFFD}'),
    }
}

/// Decode the raw source text of a block scalar (starting at its `|` or `>`
/// indicator, ending at the last content character) into its string value.
pub fn decode_block_scalar(raw: &str, folded: bool) -> String {
    let mut lines = raw.split('\n');
    let header = lines.next().unwrap_or("");
    let chomp = if header.contains('+') {
        Chomp::Keep
    } else if header[1..].contains('-') {
        Chomp::Strip
    } else {
        Chomp::Clip
    };
    let explicit_indent: Option<usize> = header
        .chars()
        .find(|c| c.is_ascii_digit())
        .and_then(|c| c.to_digit(10))
        .map(|d| d as usize);

    let content: Vec<&str> = lines.map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    let indent = explicit_indent.unwrap_or_else(|| {
        content
            .iter()
            .find(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start_matches(' ').len())
            .unwrap_or(0)
    });

    let stripped: Vec<&str> = content
        .iter()
        .map(|l| {
            if l.len() >= indent {
                &l[indent.min(prefix_spaces(l))..]
            } else {
                l.trim_start_matches(' ')
            }
        })
        .collect();

    let mut body = if folded {
        fold_lines(&stripped)
    } else {
        stripped.join("\n")
    };

    match chomp {
        Chomp::Strip => {
            while body.ends_with('\n') {
                body.pop();
            }
        }
        Chomp::Clip => {
            while body.ends_with('\n') {
                body.pop();
            }
            if !body.is_empty() {
                body.push('\n');
            }
        }
        Chomp::Keep => {
            body.push('\n');
        }
    }
    body
}

#[derive(Clone, Copy, PartialEq)]
enum Chomp {
    Strip,
    Clip,
    Keep,
}

fn prefix_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// YAML folding: a single break between two non-indented, non-empty lines
/// becomes a space; empty lines become literal newlines; more-indented
/// lines keep their breaks.
fn fold_lines(lines: &[&str]) -> String {
    let mut out = String::new();
    let mut first = true;
    let mut prev_indented = false;
    let mut pending_breaks = 0usize;
    for line in lines {
        if line.is_empty() {
            pending_breaks += 1;
            continue;
        }
        let indented = line.starts_with(' ') || line.starts_with('\t');
        if first {
            out.push_str(line);
            first = false;
        } else if pending_breaks > 0 {
            for _ in 0..pending_breaks {
                out.push('\n');
            }
            out.push_str(line);
        } else if indented || prev_indented {
            out.push('\n');
            out.push_str(line);
        } else {
            out.push(' ');
            out.push_str(line);
        }
        pending_breaks = 0;
        prev_indented = indented;
    }
    for _ in 0..pending_breaks {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_classification() {
        assert_eq!(parse_plain("hello"), ScalarRepr::Str("hello".to_string()));
        assert_eq!(parse_plain("42"), ScalarRepr::Int(42));
        assert_eq!(parse_plain("3.14"), ScalarRepr::Float(3.14));
        assert_eq!(parse_plain("true"), ScalarRepr::Bool(true));
        assert_eq!(parse_plain("~"), ScalarRepr::Null);
        assert_eq!(parse_plain(""), ScalarRepr::Null);
        assert_eq!(parse_plain("12:30"), ScalarRepr::Str("12:30".to_string()));
    }

    #[test]
    fn test_scalar_equality_ignores_style() {
        assert_eq!(ScalarValue::plain("x"), ScalarValue::double_quoted("x"));
        assert_ne!(ScalarValue::plain("x"), ScalarValue::plain("y"));
        assert_eq!(ScalarValue::from(5), ScalarValue::from(5i64));
    }

    #[test]
    fn test_unescape_single() {
        assert_eq!(unescape_single("it''s"), "it's");
        assert_eq!(unescape_single("plain"), "plain");
    }

    #[test]
    fn test_unescape_double() {
        assert_eq!(unescape_double(r"a\nb"), "a\nb");
        assert_eq!(unescape_double(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_double(r"back\\slash"), "back\\slash");
        assert_eq!(unescape_double(r"\x41"), "A");
        assert_eq!(unescape_double(r"é"), "é");
        assert_eq!(unescape_double(r"tab\there"), "tab\there");
        assert_eq!(unescape_double(r"slash\/"), "slash/");
    }

    #[test]
    fn test_decode_literal() {
        assert_eq!(decode_block_scalar("|\n  a\n  b", false), "a\nb\n");
        assert_eq!(decode_block_scalar("|-\n  a\n  b", false), "a\nb");
        assert_eq!(decode_block_scalar("|\n  a\n\n  b", false), "a\n\nb\n");
    }

    #[test]
    fn test_decode_folded() {
        assert_eq!(decode_block_scalar(">\n  a\n  b", true), "a b\n");
        assert_eq!(decode_block_scalar(">-\n  a\n\n  b", true), "a\nb");
        assert_eq!(
            decode_block_scalar(">-\n  a\n    more\n  b", true),
            "a\n  more\nb"
        );
    }

    #[test]
    fn test_decode_explicit_indent() {
        assert_eq!(decode_block_scalar("|2\n  a\n   b", false), "a\n b\n");
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(ScalarValue::null().coerce_string(), "null");
        assert_eq!(ScalarValue::from(true).coerce_string(), "true");
        assert_eq!(ScalarValue::from(7).coerce_string(), "7");
        assert_eq!(ScalarValue::string("k").coerce_string(), "k");
    }
}
