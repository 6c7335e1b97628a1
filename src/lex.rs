//! Lexer for YAML source text.

/// Lexical analysis: the variants are different kinds of "tokens".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // Structural nodes
    /// Root node of the syntax tree
    ROOT = 0,
    /// A YAML document
    DOCUMENT,
    /// A YAML sequence (list)
    SEQUENCE,
    /// A YAML mapping (key-value pairs)
    MAPPING,
    /// A single key-value entry inside a mapping
    ENTRY,
    /// The key of a mapping entry
    KEY,
    /// A YAML scalar value
    SCALAR,
    /// An alias node (`*reference`)
    ALIAS,
    /// Parse error marker
    ERROR,

    // Tokens
    /// Dash character '-' used as a sequence item marker
    DASH,
    /// Colon character ':'
    COLON,
    /// Question mark '?' (complex key marker)
    QUESTION,
    /// Left bracket '['
    LEFT_BRACKET,
    /// Right bracket ']'
    RIGHT_BRACKET,
    /// Left brace '{'
    LEFT_BRACE,
    /// Right brace '}'
    RIGHT_BRACE,
    /// Comma ','
    COMMA,
    /// Pipe '|' starting a literal block scalar
    PIPE,
    /// Greater-than '>' starting a folded block scalar
    GREATER,

    // Document markers
    /// Document start marker '---'
    DOC_START,
    /// Document end marker '...'
    DOC_END,

    // Content tokens
    /// Plain scalar text
    STRING,
    /// Integer literal
    INT,
    /// Float literal
    FLOAT,
    /// Boolean literal (true/false)
    BOOL,
    /// Null literal
    NULL,
    /// A complete single-quoted scalar, quotes included
    SINGLE_QUOTED,
    /// A complete double-quoted scalar, quotes included
    DOUBLE_QUOTED,
    /// YAML tag like '!tag'
    TAG,
    /// YAML anchor like '&anchor'
    ANCHOR,
    /// YAML alias reference like '*reference'
    REFERENCE,
    /// YAML directive like '%YAML 1.2'
    DIRECTIVE,

    // Whitespace and formatting
    /// Spaces and tabs inside a line
    WHITESPACE,
    /// Newline characters
    NEWLINE,
    /// Leading whitespace that determines structure
    INDENT,
    /// Comments starting with '#'
    COMMENT,
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl SyntaxKind {
    /// Whitespace, line breaks and comments: tokens without structural meaning.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::INDENT | SyntaxKind::COMMENT
        )
    }
}

/// Category of a lexer-level validation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexWarningKind {
    /// A tab character used in structural indentation
    TabIndentation,
    /// Trailing whitespace before a line break
    TrailingWhitespace,
}

/// A non-fatal problem noticed while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexWarning {
    /// What kind of problem this is
    pub kind: LexWarningKind,
    /// Human-readable description
    pub message: String,
    /// Byte offset of the offending text
    pub offset: usize,
}

/// Tokenize YAML input.
pub fn lex(input: &str) -> Vec<(SyntaxKind, &str)> {
    lex_with_warnings(input).0
}

/// Tokenize YAML input, also collecting whitespace validation warnings.
pub fn lex_with_warnings(input: &str) -> (Vec<(SyntaxKind, &str)>, Vec<LexWarning>) {
    use SyntaxKind::*;

    let mut tokens: Vec<(SyntaxKind, &str)> = Vec::new();
    let mut warnings = Vec::new();
    let bytes = input.as_bytes();
    let len = input.len();
    let mut i = 0;

    while i < len {
        let start = i;
        let ch = input[i..].chars().next().unwrap();

        match ch {
            '\n' => {
                check_trailing(&tokens, start, &mut warnings);
                tokens.push((NEWLINE, &input[start..start + 1]));
                i += 1;
            }
            '\r' => {
                check_trailing(&tokens, start, &mut warnings);
                if bytes.get(i + 1) == Some(&b'\n') {
                    tokens.push((NEWLINE, &input[start..start + 2]));
                    i += 2;
                } else {
                    tokens.push((NEWLINE, &input[start..start + 1]));
                    i += 1;
                }
            }
            ' ' | '\t' => {
                while i < len && (bytes[i] == b' ' || bytes[i] == b'\t') {
                    i += 1;
                }
                let at_line_start = start == 0 || bytes[start - 1] == b'\n';
                let kind = if at_line_start { INDENT } else { WHITESPACE };
                let text = &input[start..i];
                if kind == INDENT && text.contains('\t') {
                    warnings.push(LexWarning {
                        kind: LexWarningKind::TabIndentation,
                        message: "tab character used for indentation".to_string(),
                        offset: start,
                    });
                }
                tokens.push((kind, text));
            }
            '-' => {
                let line_start = input[..start].rfind('\n').map(|p| p + 1).unwrap_or(0);
                let before = &input[line_start..start];
                let ws_before = before.chars().all(|c| c == ' ' || c == '\t');
                let marker_ctx = before.chars().all(|c| matches!(c, ' ' | '\t' | '-'));
                let next = input[start + 1..].chars().next();

                if ws_before
                    && input[start..].starts_with("---")
                    && matches!(
                        input[start + 3..].chars().next(),
                        None | Some(' ') | Some('\t') | Some('\n') | Some('\r')
                    )
                {
                    tokens.push((DOC_START, &input[start..start + 3]));
                    i += 3;
                } else if marker_ctx
                    && matches!(next, None | Some(' ') | Some('\t') | Some('\n') | Some('\r'))
                {
                    tokens.push((DASH, &input[start..start + 1]));
                    i += 1;
                } else {
                    i = read_plain(input, start, &mut tokens);
                }
            }
            ':' => {
                tokens.push((COLON, &input[start..start + 1]));
                i += 1;
            }
            '?' => {
                tokens.push((QUESTION, &input[start..start + 1]));
                i += 1;
            }
            '[' => {
                tokens.push((LEFT_BRACKET, &input[start..start + 1]));
                i += 1;
            }
            ']' => {
                tokens.push((RIGHT_BRACKET, &input[start..start + 1]));
                i += 1;
            }
            '{' => {
                tokens.push((LEFT_BRACE, &input[start..start + 1]));
                i += 1;
            }
            '}' => {
                tokens.push((RIGHT_BRACE, &input[start..start + 1]));
                i += 1;
            }
            ',' => {
                tokens.push((COMMA, &input[start..start + 1]));
                i += 1;
            }
            '|' => {
                tokens.push((PIPE, &input[start..start + 1]));
                i += 1;
            }
            '>' => {
                tokens.push((GREATER, &input[start..start + 1]));
                i += 1;
            }
            '&' => {
                let name_end = scan_anchor_name(input, start + 1);
                if name_end > start + 1 {
                    tokens.push((ANCHOR, &input[start..name_end]));
                    i = name_end;
                } else {
                    i = read_plain(input, start, &mut tokens);
                }
            }
            '*' => {
                let name_end = scan_anchor_name(input, start + 1);
                if name_end > start + 1 {
                    tokens.push((REFERENCE, &input[start..name_end]));
                    i = name_end;
                } else {
                    i = read_plain(input, start, &mut tokens);
                }
            }
            '!' => {
                let name_end = scan_anchor_name(input, start + 1);
                tokens.push((TAG, &input[start..name_end]));
                i = name_end;
            }
            '%' => {
                let at_line_start = start == 0 || bytes[start - 1] == b'\n';
                if at_line_start {
                    let end = line_end(input, start);
                    tokens.push((DIRECTIVE, &input[start..end]));
                    i = end;
                } else {
                    i = read_plain(input, start, &mut tokens);
                }
            }
            '"' => {
                i = scan_double_quoted(input, start);
                tokens.push((DOUBLE_QUOTED, &input[start..i]));
            }
            '\'' => {
                i = scan_single_quoted(input, start);
                tokens.push((SINGLE_QUOTED, &input[start..i]));
            }
            '.' => {
                let line_start = input[..start].rfind('\n').map(|p| p + 1).unwrap_or(0);
                let ws_before = input[line_start..start]
                    .chars()
                    .all(|c| c == ' ' || c == '\t');
                if ws_before
                    && input[start..].starts_with("...")
                    && matches!(
                        input[start + 3..].chars().next(),
                        None | Some(' ') | Some('\t') | Some('\n') | Some('\r')
                    )
                {
                    tokens.push((DOC_END, &input[start..start + 3]));
                    i += 3;
                } else {
                    i = read_plain(input, start, &mut tokens);
                }
            }
            '#' => {
                let starts_comment = start == 0
                    || matches!(bytes[start - 1], b' ' | b'\t' | b'\n' | b'[' | b'{' | b',');
                if starts_comment {
                    let end = line_end(input, start);
                    tokens.push((COMMENT, &input[start..end]));
                    i = end;
                } else {
                    i = read_plain(input, start, &mut tokens);
                }
            }
            _ => {
                i = read_plain(input, start, &mut tokens);
            }
        }
    }

    if !tokens.is_empty() {
        check_trailing(&tokens, len, &mut warnings);
    }

    (tokens, warnings)
}

fn check_trailing(tokens: &[(SyntaxKind, &str)], offset: usize, warnings: &mut Vec<LexWarning>) {
    if let Some((SyntaxKind::WHITESPACE, text)) = tokens.last() {
        warnings.push(LexWarning {
            kind: LexWarningKind::TrailingWhitespace,
            message: "trailing whitespace before line break".to_string(),
            offset: offset - text.len(),
        });
    }
}

fn line_end(input: &str, from: usize) -> usize {
    input[from..]
        .find(['\n', '\r'])
        .map(|p| from + p)
        .unwrap_or(input.len())
}

/// Anchor/alias/tag names stop at whitespace and flow indicators.
fn scan_anchor_name(input: &str, from: usize) -> usize {
    let mut end = from;
    for (idx, ch) in input[from..].char_indices() {
        if ch.is_whitespace() || matches!(ch, '[' | ']' | '{' | '}' | ',' | ':' | '#') {
            break;
        }
        end = from + idx + ch.len_utf8();
    }
    end
}

/// Read one plain-scalar word starting at `start`, classify it, push it.
/// Returns the index just past the word.
fn read_plain<'a>(input: &'a str, start: usize, tokens: &mut Vec<(SyntaxKind, &'a str)>) -> usize {
    let mut end = input.len();
    for (idx, ch) in input[start..].char_indices() {
        if idx == 0 {
            continue;
        }
        if ch.is_whitespace() || is_word_break(ch) {
            end = start + idx;
            break;
        }
    }
    let text = &input[start..end];
    tokens.push((classify_scalar(text), text));
    end
}

/// Characters that terminate a plain-scalar word. Quotes break words so that
/// a stray quote inside plain text surfaces as an (unterminated) quoted
/// scalar rather than silently becoming content.
fn is_word_break(ch: char) -> bool {
    matches!(ch, ':' | ',' | '[' | ']' | '{' | '}' | '\'' | '"')
}

/// Classify a scalar token based on its content.
fn classify_scalar(text: &str) -> SyntaxKind {
    use SyntaxKind::*;

    match text {
        "true" | "false" | "True" | "False" | "TRUE" | "FALSE" => return BOOL,
        "null" | "Null" | "NULL" | "~" => return NULL,
        _ => {}
    }

    if text.parse::<i64>().is_ok() {
        return INT;
    }

    if text.parse::<f64>().is_ok() {
        return FLOAT;
    }

    STRING
}

/// Scan a double-quoted scalar starting at the opening quote. Handles
/// backslash escapes and line breaks; an unterminated scalar runs to EOF.
fn scan_double_quoted(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut i = start + 1;
    while i < input.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    input.len()
}

/// Scan a single-quoted scalar starting at the opening quote. A doubled
/// quote (`''`) escapes a literal quote; an unterminated scalar runs to EOF.
fn scan_single_quoted(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut i = start + 1;
    while i < input.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
            } else {
                return i + 1;
            }
        } else {
            i += 1;
        }
    }
    input.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(SyntaxKind, &str)> {
        lex(input)
    }

    #[test]
    fn test_simple_mapping() {
        let tokens = kinds("key: value");
        assert_eq!(
            tokens,
            vec![
                (SyntaxKind::STRING, "key"),
                (SyntaxKind::COLON, ":"),
                (SyntaxKind::WHITESPACE, " "),
                (SyntaxKind::STRING, "value"),
            ]
        );
    }

    #[test]
    fn test_scalar_classification() {
        assert_eq!(kinds("42")[0], (SyntaxKind::INT, "42"));
        assert_eq!(kinds("3.14")[0], (SyntaxKind::FLOAT, "3.14"));
        assert_eq!(kinds("true")[0], (SyntaxKind::BOOL, "true"));
        assert_eq!(kinds("~")[0], (SyntaxKind::NULL, "~"));
        assert_eq!(kinds("null")[0], (SyntaxKind::NULL, "null"));
        assert_eq!(kinds("-40")[0], (SyntaxKind::INT, "-40"));
        assert_eq!(kinds("hello")[0], (SyntaxKind::STRING, "hello"));
    }

    #[test]
    fn test_sequence_markers() {
        let tokens = kinds("- item1\n- item2");
        assert_eq!(tokens[0], (SyntaxKind::DASH, "-"));
        assert_eq!(tokens[2], (SyntaxKind::STRING, "item1"));
        assert_eq!(tokens[4], (SyntaxKind::DASH, "-"));
    }

    #[test]
    fn test_nested_dash_is_marker() {
        let tokens = kinds("- - x");
        assert_eq!(tokens[0], (SyntaxKind::DASH, "-"));
        assert_eq!(tokens[2], (SyntaxKind::DASH, "-"));
        assert_eq!(tokens[4], (SyntaxKind::STRING, "x"));
    }

    #[test]
    fn test_hyphen_in_scalars() {
        let tokens = kinds("Name: example-project");
        assert_eq!(tokens[3], (SyntaxKind::STRING, "example-project"));

        let tokens = kinds("id: 123e4567-e89b-12d3");
        assert_eq!(tokens[3], (SyntaxKind::STRING, "123e4567-e89b-12d3"));
    }

    #[test]
    fn test_doc_markers() {
        let tokens = kinds("---\nkey: value\n...");
        assert_eq!(tokens[0], (SyntaxKind::DOC_START, "---"));
        assert_eq!(tokens.last().unwrap(), &(SyntaxKind::DOC_END, "..."));

        // Four dashes are content, not a marker.
        assert_eq!(kinds("----")[0], (SyntaxKind::STRING, "----"));
    }

    #[test]
    fn test_quoted_scalars_are_single_tokens() {
        let tokens = kinds("a: 'it''s'");
        assert_eq!(tokens[3], (SyntaxKind::SINGLE_QUOTED, "'it''s'"));

        let tokens = kinds(r#"a: "x \" y""#);
        assert_eq!(tokens[3], (SyntaxKind::DOUBLE_QUOTED, r#""x \" y""#));
    }

    #[test]
    fn test_unterminated_quote_runs_to_eof() {
        let tokens = kinds("a: 'oops");
        assert_eq!(tokens[3], (SyntaxKind::SINGLE_QUOTED, "'oops"));
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("key: value # trailing\n# full line");
        let comments: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == SyntaxKind::COMMENT)
            .collect();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].1, "# trailing");
        assert_eq!(comments[1].1, "# full line");
    }

    #[test]
    fn test_hash_inside_word_is_content() {
        let tokens = kinds("key: a#b");
        assert_eq!(tokens[3], (SyntaxKind::STRING, "a#b"));
    }

    #[test]
    fn test_indent_vs_whitespace() {
        let tokens = kinds("key:\n  nested: 1");
        assert!(tokens.contains(&(SyntaxKind::INDENT, "  ")));
        let tokens = kinds("a: b");
        assert!(tokens.contains(&(SyntaxKind::WHITESPACE, " ")));
    }

    #[test]
    fn test_crlf_newlines() {
        let tokens = kinds("a: 1\r\nb: 2\r\n");
        let newlines: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == SyntaxKind::NEWLINE)
            .collect();
        assert_eq!(newlines.len(), 2);
        assert_eq!(newlines[0].1, "\r\n");
    }

    #[test]
    fn test_anchor_and_reference() {
        let tokens = kinds("key: &anchor value");
        assert!(tokens.contains(&(SyntaxKind::ANCHOR, "&anchor")));

        let tokens = kinds("key: *ref");
        assert!(tokens.contains(&(SyntaxKind::REFERENCE, "*ref")));
    }

    #[test]
    fn test_block_scalar_indicators() {
        let tokens = kinds("key: |\n  text");
        assert!(tokens.contains(&(SyntaxKind::PIPE, "|")));

        let tokens = kinds("key: >\n  text");
        assert!(tokens.contains(&(SyntaxKind::GREATER, ">")));
    }

    #[test]
    fn test_tab_indentation_warning() {
        let (_, warnings) = lex_with_warnings("a:\n\tb: 1");
        assert!(warnings
            .iter()
            .any(|w| w.kind == LexWarningKind::TabIndentation));
    }

    #[test]
    fn test_trailing_whitespace_warning() {
        let (_, warnings) = lex_with_warnings("a: 1  \nb: 2");
        assert!(warnings
            .iter()
            .any(|w| w.kind == LexWarningKind::TrailingWhitespace));
    }

    #[test]
    fn test_lossless_tokenization() {
        let inputs = [
            "a: 1\nb:\n  - x\n  - y # tail\n",
            "{a: [1, 2], b: 'q'}\r\n",
            "# only a comment\n",
            "key: |\n  line1\n  line2\n",
            "",
        ];
        for input in inputs {
            let joined: String = lex(input).iter().map(|(_, t)| *t).collect();
            assert_eq!(joined, input);
        }
    }
}
