//! Lossless YAML parser: tokens in, rowan green tree out.
//!
//! Every token of the input appears in the tree exactly once, so the tree's
//! text is byte-identical to the source and every node's `text_range()` is
//! an exact byte span. The edit planners rely on that.

use crate::{
    lex::{lex_with_warnings, LexWarning, SyntaxKind},
    scalar::{
        decode_block_scalar, parse_plain, unescape_double, unescape_single, ScalarStyle,
        ScalarValue,
    },
    value::{CollectionStyle, YamlValue},
    EditError, PositionedParseError,
};
use rowan::ast::AstNode;
use rowan::{GreenNodeBuilder, TextRange, TextSize};
use std::str::FromStr;

/// The output of a raw parse: tree plus collected problems.
#[derive(Debug, Clone)]
pub struct ParsedYaml {
    /// The lossless green tree
    pub green_node: rowan::GreenNode,
    /// Parse error messages
    pub errors: Vec<String>,
    /// Parse errors with source locations
    pub positioned_errors: Vec<PositionedParseError>,
    /// Lexer validation warnings
    pub warnings: Vec<LexWarning>,
}

/// YAML language type for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lang {}

impl rowan::Language for Lang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub(crate) type SyntaxNode = rowan::SyntaxNode<Lang>;
#[allow(dead_code)]
pub(crate) type SyntaxToken = rowan::SyntaxToken<Lang>;

/// A macro to create AST node wrappers.
macro_rules! ast_node {
    ($ast:ident, $kind:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $ast(SyntaxNode);

        impl std::fmt::Debug for $ast {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($ast))
                    .field("syntax", &self.0)
                    .finish()
            }
        }

        impl AstNode for $ast {
            type Language = Lang;

            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                if Self::can_cast(syntax.kind()) {
                    Some(Self(syntax))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }

        impl From<SyntaxNode> for $ast {
            fn from(node: SyntaxNode) -> Self {
                $ast(node)
            }
        }

        impl std::fmt::Display for $ast {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.text())
            }
        }
    };
}

ast_node!(Yaml, ROOT, "A parsed YAML file holding one or more documents");
ast_node!(Document, DOCUMENT, "A single YAML document");
ast_node!(Sequence, SEQUENCE, "A YAML sequence (list)");
ast_node!(Mapping, MAPPING, "A YAML mapping (key-value pairs)");
ast_node!(Entry, ENTRY, "A single key-value entry of a mapping");
ast_node!(Scalar, SCALAR, "A YAML scalar value");
ast_node!(Alias, ALIAS, "A YAML alias (`*reference`)");

/// Node kinds that represent a value.
pub(crate) fn is_value_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::SCALAR | SyntaxKind::SEQUENCE | SyntaxKind::MAPPING | SyntaxKind::ALIAS
    )
}

/// Byte span of a node in the source text.
pub(crate) fn node_span(node: &SyntaxNode) -> (usize, usize) {
    let range = node.text_range();
    (usize::from(range.start()), usize::from(range.end()))
}

impl Yaml {
    /// Parse YAML text, returning a [`crate::Parse`] result.
    pub fn parse(text: &str) -> crate::Parse<Yaml> {
        crate::Parse::parse_yaml(text)
    }

    /// All documents in this file.
    pub fn documents(&self) -> impl Iterator<Item = Document> {
        self.0.children().filter_map(Document::cast)
    }

    /// The first document, if any.
    pub fn document(&self) -> Option<Document> {
        self.documents().next()
    }
}

impl FromStr for Yaml {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Yaml::parse(s).to_result()
    }
}

impl Document {
    /// The root value node of this document (mapping, sequence, scalar or alias).
    pub fn root_node(&self) -> Option<SyntaxNode> {
        self.0.children().find(|child| is_value_kind(child.kind()))
    }

    /// This document's root as a mapping, if it is one.
    pub fn as_mapping(&self) -> Option<Mapping> {
        self.root_node().and_then(Mapping::cast)
    }

    /// This document's root as a sequence, if it is one.
    pub fn as_sequence(&self) -> Option<Sequence> {
        self.root_node().and_then(Sequence::cast)
    }

    /// This document's root as a scalar, if it is one.
    pub fn as_scalar(&self) -> Option<Scalar> {
        self.root_node().and_then(Scalar::cast)
    }
}

impl Sequence {
    /// The item value nodes, in order.
    pub fn items(&self) -> impl Iterator<Item = SyntaxNode> {
        self.0.children().filter(|c| is_value_kind(c.kind()))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items().count()
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    /// Whether this sequence was written in flow style (`[a, b]`).
    pub fn is_flow(&self) -> bool {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .next()
            .is_some_and(|t| t.kind() == SyntaxKind::LEFT_BRACKET)
    }

    /// Offset of the closing `]`, for flow sequences.
    pub(crate) fn close_bracket_offset(&self) -> Option<usize> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::RIGHT_BRACKET)
            .last()
            .map(|t| usize::from(t.text_range().start()))
    }
}

impl Mapping {
    /// The entries, in order.
    pub fn entries(&self) -> impl Iterator<Item = Entry> {
        self.0.children().filter_map(Entry::cast)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Whether this mapping was written in flow style (`{k: v}`).
    pub fn is_flow(&self) -> bool {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .next()
            .is_some_and(|t| t.kind() == SyntaxKind::LEFT_BRACE)
    }

    /// Offset of the closing `}`, for flow mappings.
    pub(crate) fn close_brace_offset(&self) -> Option<usize> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::RIGHT_BRACE)
            .last()
            .map(|t| usize::from(t.text_range().start()))
    }

    /// Find the entry whose key equals `key` (deep structural equality).
    pub fn entry_for(&self, key: &YamlValue) -> Option<Entry> {
        self.entries().find(|e| {
            e.key_node()
                .and_then(|k| node_to_value(&k).ok())
                .is_some_and(|k| &k == key)
        })
    }

    /// The value node stored under `key`, if present.
    pub fn get(&self, key: &YamlValue) -> Option<SyntaxNode> {
        self.entry_for(key).and_then(|e| e.value_node())
    }
}

impl Entry {
    /// The node holding this entry's key.
    pub fn key_node(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::KEY)
            .and_then(|k| k.children().find(|c| is_value_kind(c.kind())))
    }

    /// The key as a scalar, when it is one.
    pub fn key_scalar(&self) -> Option<Scalar> {
        self.key_node().and_then(Scalar::cast)
    }

    /// The node holding this entry's value. An entry with no written value
    /// holds an empty scalar node with a zero-length span just past the `:`.
    pub fn value_node(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|c| c.kind() != SyntaxKind::KEY && is_value_kind(c.kind()))
    }

    /// Offset just past this entry's `:` separator.
    pub(crate) fn colon_end(&self) -> Option<usize> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::COLON)
            .map(|t| usize::from(t.text_range().end()))
    }
}

impl Scalar {
    /// The style this scalar was written in.
    pub fn style(&self) -> ScalarStyle {
        let first = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia());
        match first.map(|t| t.kind()) {
            Some(SyntaxKind::SINGLE_QUOTED) => ScalarStyle::SingleQuoted,
            Some(SyntaxKind::DOUBLE_QUOTED) => ScalarStyle::DoubleQuoted,
            Some(SyntaxKind::PIPE) => ScalarStyle::Literal,
            Some(SyntaxKind::GREATER) => ScalarStyle::Folded,
            _ => ScalarStyle::Plain,
        }
    }

    /// The raw source text of this scalar.
    pub fn raw(&self) -> String {
        self.0.text().to_string()
    }

    /// Interpret the source text as a typed value.
    pub fn to_scalar_value(&self) -> ScalarValue {
        let text = self.raw();
        match self.style() {
            ScalarStyle::Plain | ScalarStyle::Any => {
                ScalarValue::with_style(parse_plain(&text), ScalarStyle::Plain)
            }
            ScalarStyle::SingleQuoted => {
                let inner = strip_quotes(&text, '\'');
                ScalarValue::single_quoted(unescape_single(inner))
            }
            ScalarStyle::DoubleQuoted => {
                let inner = strip_quotes(&text, '"');
                ScalarValue::double_quoted(unescape_double(inner))
            }
            ScalarStyle::Literal => ScalarValue::literal(decode_block_scalar(&text, false)),
            ScalarStyle::Folded => ScalarValue::folded(decode_block_scalar(&text, true)),
        }
    }
}

fn strip_quotes(text: &str, quote: char) -> &str {
    let text = text.strip_prefix(quote).unwrap_or(text);
    text.strip_suffix(quote).unwrap_or(text)
}

impl Alias {
    /// The referenced anchor name, without the leading `*`.
    pub fn name(&self) -> String {
        self.0
            .text()
            .to_string()
            .trim_start_matches('*')
            .to_string()
    }
}

/// Convert a parsed node into its logical value. Fails with
/// [`EditError::Alias`] when the node or any descendant is an alias.
pub(crate) fn node_to_value(node: &SyntaxNode) -> Result<YamlValue, EditError> {
    match node.kind() {
        SyntaxKind::SCALAR => Ok(YamlValue::Scalar(
            Scalar::cast(node.clone()).expect("kind checked").to_scalar_value(),
        )),
        SyntaxKind::ALIAS => {
            let alias = Alias::cast(node.clone()).expect("kind checked");
            Err(EditError::Alias(alias.name()))
        }
        SyntaxKind::SEQUENCE => {
            let seq = Sequence::cast(node.clone()).expect("kind checked");
            let style = if seq.is_flow() {
                CollectionStyle::Flow
            } else {
                CollectionStyle::Block
            };
            let items = seq
                .items()
                .map(|item| node_to_value(&item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(YamlValue::Sequence(crate::value::SequenceValue {
                style,
                items,
            }))
        }
        SyntaxKind::MAPPING => {
            let map = Mapping::cast(node.clone()).expect("kind checked");
            let style = if map.is_flow() {
                CollectionStyle::Flow
            } else {
                CollectionStyle::Block
            };
            let mut entries = Vec::new();
            for entry in map.entries() {
                let key = match entry.key_node() {
                    Some(k) => node_to_value(&k)?,
                    None => YamlValue::null(),
                };
                let value = match entry.value_node() {
                    Some(v) => node_to_value(&v)?,
                    None => YamlValue::null(),
                };
                entries.push((key, value));
            }
            Ok(YamlValue::Mapping(crate::value::MappingValue {
                style,
                entries,
            }))
        }
        other => Err(EditError::Path(format!(
            "unexpected node kind {:?} in document",
            other
        ))),
    }
}

/// Parse YAML text into a lossless tree.
pub fn parse(text: &str) -> ParsedYaml {
    Parser::new(text).parse()
}

/// Internal parser state.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(SyntaxKind, &'a str)>,
    offsets: Vec<usize>,
    cursor: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<String>,
    positioned_errors: Vec<PositionedParseError>,
    warnings: Vec<LexWarning>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let (tokens, warnings) = lex_with_warnings(text);
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        for (_, tok) in &tokens {
            offsets.push(offset);
            offset += tok.len();
        }
        Self {
            source: text,
            tokens,
            offsets,
            cursor: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            positioned_errors: Vec::new(),
            warnings,
        }
    }

    fn parse(mut self) -> ParsedYaml {
        self.builder.start_node(SyntaxKind::ROOT.into());

        loop {
            match self.current() {
                Some(k) if k.is_trivia() => self.bump(),
                Some(SyntaxKind::DIRECTIVE) => self.bump(),
                _ => break,
            }
        }

        if self.current().is_some() {
            self.parse_document();
        }

        loop {
            match self.current() {
                None => break,
                Some(k) if k.is_trivia() => self.bump(),
                Some(SyntaxKind::DOC_START) => self.parse_document(),
                Some(_) => {
                    self.error_here("unexpected content after document end");
                    self.builder.start_node(SyntaxKind::ERROR.into());
                    while self.current().is_some() {
                        self.bump();
                    }
                    self.builder.finish_node();
                }
            }
        }

        self.builder.finish_node();
        ParsedYaml {
            green_node: self.builder.finish(),
            errors: self.errors,
            positioned_errors: self.positioned_errors,
            warnings: self.warnings,
        }
    }

    fn parse_document(&mut self) {
        self.builder.start_node(SyntaxKind::DOCUMENT.into());

        if self.current() == Some(SyntaxKind::DOC_START) {
            self.bump();
            while matches!(self.current(), Some(k) if k.is_trivia()) {
                self.bump();
            }
        }

        if !matches!(
            self.current(),
            None | Some(SyntaxKind::DOC_START) | Some(SyntaxKind::DOC_END)
        ) {
            let col = self.col_at(self.cursor);
            self.parse_node(col);
        }

        if let Some((idx, _, kind)) = self.peek_content() {
            if kind == SyntaxKind::DOC_END {
                self.consume_until(idx);
                self.bump();
            }
        }

        self.builder.finish_node();
    }

    /// Parse one value node. `col` is the column the value starts at; block
    /// children must be indented past it.
    fn parse_node(&mut self, col: usize) {
        match self.current() {
            Some(SyntaxKind::DASH) => self.parse_block_sequence(col),
            Some(SyntaxKind::LEFT_BRACKET) => self.parse_flow_sequence(),
            Some(SyntaxKind::LEFT_BRACE) => self.parse_flow_mapping(),
            Some(SyntaxKind::PIPE) | Some(SyntaxKind::GREATER) => self.parse_block_scalar(),
            Some(SyntaxKind::REFERENCE) => {
                self.builder.start_node(SyntaxKind::ALIAS.into());
                self.bump();
                self.builder.finish_node();
            }
            Some(SyntaxKind::ANCHOR) => {
                // The anchor token stays in the surrounding structure so the
                // anchored value keeps a tight span.
                self.bump();
                if self.current() == Some(SyntaxKind::WHITESPACE) {
                    self.bump();
                }
                match self.current() {
                    None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT) => {
                        match self.peek_content().filter(|(_, c, k)| {
                            *c > col && !matches!(k, SyntaxKind::DOC_START | SyntaxKind::DOC_END)
                        }) {
                            Some((idx, c, _)) => {
                                self.consume_until(idx);
                                self.parse_node(c);
                            }
                            None => self.empty_scalar(),
                        }
                    }
                    _ => {
                        let c = self.col_at(self.cursor);
                        self.parse_node(c);
                    }
                }
            }
            Some(_) if self.is_key_at(self.cursor) => self.parse_block_mapping(col),
            Some(_) => self.parse_scalar_line(),
            None => self.empty_scalar(),
        }
    }

    fn parse_block_sequence(&mut self, col: usize) {
        self.builder.start_node(SyntaxKind::SEQUENCE.into());
        loop {
            self.bump(); // DASH

            let inline = match self.current() {
                Some(SyntaxKind::WHITESPACE) => !matches!(
                    self.kind_at(self.cursor + 1),
                    None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT)
                ),
                None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT) => false,
                Some(_) => true,
            };

            if inline {
                if self.current() == Some(SyntaxKind::WHITESPACE) {
                    self.bump();
                }
                // An anchored value keeps the sequence's own column as its
                // nesting threshold.
                let c = if self.current() == Some(SyntaxKind::ANCHOR) {
                    col
                } else {
                    self.col_at(self.cursor)
                };
                self.parse_node(c);
            } else {
                match self.peek_content().filter(|(_, c, k)| {
                    *c > col && !matches!(k, SyntaxKind::DOC_START | SyntaxKind::DOC_END)
                }) {
                    Some((idx, c, _)) => {
                        self.consume_until(idx);
                        self.parse_node(c);
                    }
                    None => self.empty_scalar(),
                }
            }

            match self.peek_content() {
                Some((idx, c, SyntaxKind::DASH)) if c == col => {
                    self.consume_until(idx);
                }
                _ => break,
            }
        }
        self.builder.finish_node();
    }

    fn parse_block_mapping(&mut self, col: usize) {
        self.builder.start_node(SyntaxKind::MAPPING.into());
        loop {
            self.parse_entry(col);

            match self.peek_content() {
                Some((idx, c, kind))
                    if c == col
                        && !matches!(
                            kind,
                            SyntaxKind::DASH | SyntaxKind::DOC_START | SyntaxKind::DOC_END
                        )
                        && self.is_key_at(idx) =>
                {
                    self.consume_until(idx);
                }
                _ => break,
            }
        }
        self.builder.finish_node();
    }

    fn parse_entry(&mut self, col: usize) {
        self.builder.start_node(SyntaxKind::ENTRY.into());

        self.builder.start_node(SyntaxKind::KEY.into());
        self.builder.start_node(SyntaxKind::SCALAR.into());
        loop {
            match self.current() {
                Some(SyntaxKind::COLON) if self.colon_is_separator(self.cursor) => break,
                None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT) => break,
                Some(SyntaxKind::WHITESPACE)
                    if self.kind_at(self.cursor + 1) == Some(SyntaxKind::COLON)
                        && self.colon_is_separator(self.cursor + 1) =>
                {
                    break
                }
                Some(_) => self.bump(),
            }
        }
        self.builder.finish_node();
        self.builder.finish_node();

        if self.current() == Some(SyntaxKind::WHITESPACE) {
            self.bump();
        }
        if self.current() == Some(SyntaxKind::COLON) {
            self.bump();
        } else {
            self.error_here("expected ':' after mapping key");
        }

        let inline = match self.current() {
            Some(SyntaxKind::WHITESPACE) => !matches!(
                self.kind_at(self.cursor + 1),
                None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT)
            ),
            None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT) => false,
            Some(_) => true,
        };

        if inline {
            if self.current() == Some(SyntaxKind::WHITESPACE) {
                self.bump();
            }
            let c = if self.current() == Some(SyntaxKind::ANCHOR) {
                col
            } else {
                self.col_at(self.cursor)
            };
            self.parse_node(c);
        } else {
            // A deeper-indented block, or a sequence at the key's own column.
            match self.peek_content().filter(|(_, c, k)| {
                !matches!(k, SyntaxKind::DOC_START | SyntaxKind::DOC_END)
                    && (*c > col || (*c == col && *k == SyntaxKind::DASH))
            }) {
                Some((idx, c, _)) => {
                    self.consume_until(idx);
                    self.parse_node(c);
                }
                None => self.empty_scalar(),
            }
        }

        self.builder.finish_node();
    }

    /// A plain or quoted scalar confined to one line of block context.
    fn parse_scalar_line(&mut self) {
        self.builder.start_node(SyntaxKind::SCALAR.into());

        let first = self.current();
        let mut last = None;
        let mut j = self.cursor;
        loop {
            match self.kind_at(j) {
                None | Some(SyntaxKind::NEWLINE) | Some(SyntaxKind::COMMENT) => break,
                Some(SyntaxKind::WHITESPACE) => j += 1,
                Some(SyntaxKind::SINGLE_QUOTED) | Some(SyntaxKind::DOUBLE_QUOTED)
                    if j != self.cursor =>
                {
                    // A quote opening mid-scalar never terminates cleanly.
                    self.error_here("quote character inside plain scalar");
                    last = Some(j);
                    j += 1;
                }
                Some(_) => {
                    last = Some(j);
                    j += 1;
                }
            }
        }
        if let Some(last) = last {
            if matches!(
                first,
                Some(SyntaxKind::SINGLE_QUOTED) | Some(SyntaxKind::DOUBLE_QUOTED)
            ) {
                self.check_quote_termination();
                if last != self.cursor {
                    self.error_here("unexpected content after quoted scalar");
                }
            }
            while self.cursor <= last {
                self.bump();
            }
        }

        self.builder.finish_node();
    }

    fn check_quote_termination(&mut self) {
        let (kind, text) = self.tokens[self.cursor];
        let quote = if kind == SyntaxKind::SINGLE_QUOTED {
            '\''
        } else {
            '"'
        };
        let terminated = text.len() >= 2 && text.ends_with(quote);
        if !terminated {
            self.error_here("unterminated quoted scalar");
        }
    }

    fn parse_block_scalar(&mut self) {
        let off = self.offsets[self.cursor];
        let line_start = self.source[..off].rfind('\n').map(|p| p + 1).unwrap_or(0);
        let line_indent = self.source[line_start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();

        self.builder.start_node(SyntaxKind::SCALAR.into());

        // Header: indicator plus the rest of its line.
        while !matches!(self.current(), None | Some(SyntaxKind::NEWLINE)) {
            self.bump();
        }

        // Content: every following line indented past the indicator's line.
        loop {
            if self.current() != Some(SyntaxKind::NEWLINE) {
                break;
            }
            let mut j = self.cursor;
            let mut content: Option<(usize, usize)> = None;
            while let Some(k) = self.kind_at(j) {
                match k {
                    SyntaxKind::NEWLINE | SyntaxKind::INDENT | SyntaxKind::WHITESPACE => j += 1,
                    _ => {
                        content = Some((j, self.col_at(j)));
                        break;
                    }
                }
            }
            match content {
                Some((idx, c)) if c > line_indent => {
                    self.consume_until(idx);
                    while !matches!(self.current(), None | Some(SyntaxKind::NEWLINE)) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        self.builder.finish_node();
    }

    fn parse_flow_sequence(&mut self) {
        self.builder.start_node(SyntaxKind::SEQUENCE.into());
        self.bump(); // '['
        loop {
            self.skip_flow_trivia();
            match self.current() {
                Some(SyntaxKind::RIGHT_BRACKET) => {
                    self.bump();
                    break;
                }
                None => {
                    self.error_here("unterminated flow sequence");
                    break;
                }
                Some(SyntaxKind::COMMA) => {
                    self.error_here("empty flow sequence element");
                    self.bump();
                }
                Some(_) => {
                    self.parse_flow_value();
                    self.skip_flow_trivia();
                    match self.current() {
                        Some(SyntaxKind::COMMA) => self.bump(),
                        Some(SyntaxKind::RIGHT_BRACKET) | None => {}
                        Some(_) => {
                            self.error_here("expected ',' or ']' in flow sequence");
                            self.bump_into_error();
                        }
                    }
                }
            }
        }
        self.builder.finish_node();
    }

    fn parse_flow_mapping(&mut self) {
        self.builder.start_node(SyntaxKind::MAPPING.into());
        self.bump(); // '{'
        loop {
            self.skip_flow_trivia();
            match self.current() {
                Some(SyntaxKind::RIGHT_BRACE) => {
                    self.bump();
                    break;
                }
                None => {
                    self.error_here("unterminated flow mapping");
                    break;
                }
                Some(_) => {
                    self.builder.start_node(SyntaxKind::ENTRY.into());
                    self.builder.start_node(SyntaxKind::KEY.into());
                    self.parse_flow_value();
                    self.builder.finish_node();
                    self.skip_flow_trivia();
                    if self.current() == Some(SyntaxKind::COLON) {
                        self.bump();
                    } else {
                        self.error_here("expected ':' in flow mapping");
                    }
                    match self.current() {
                        Some(SyntaxKind::COMMA) | Some(SyntaxKind::RIGHT_BRACE) | None => {
                            self.empty_scalar();
                        }
                        Some(SyntaxKind::WHITESPACE)
                            if matches!(
                                self.kind_at(self.cursor + 1),
                                Some(SyntaxKind::COMMA) | Some(SyntaxKind::RIGHT_BRACE) | None
                            ) =>
                        {
                            self.empty_scalar();
                            self.bump();
                        }
                        Some(_) => {
                            self.skip_flow_trivia();
                            self.parse_flow_value();
                        }
                    }
                    self.builder.finish_node();
                    self.skip_flow_trivia();
                    match self.current() {
                        Some(SyntaxKind::COMMA) => self.bump(),
                        Some(SyntaxKind::RIGHT_BRACE) | None => {}
                        Some(_) => {
                            self.error_here("expected ',' or '}' in flow mapping");
                            self.bump_into_error();
                        }
                    }
                }
            }
        }
        self.builder.finish_node();
    }

    fn parse_flow_value(&mut self) {
        match self.current() {
            Some(SyntaxKind::LEFT_BRACKET) => self.parse_flow_sequence(),
            Some(SyntaxKind::LEFT_BRACE) => self.parse_flow_mapping(),
            Some(SyntaxKind::REFERENCE) => {
                self.builder.start_node(SyntaxKind::ALIAS.into());
                self.bump();
                self.builder.finish_node();
            }
            Some(SyntaxKind::ANCHOR) => {
                self.bump();
                if self.current() == Some(SyntaxKind::WHITESPACE) {
                    self.bump();
                }
                self.parse_flow_value();
            }
            Some(SyntaxKind::SINGLE_QUOTED) | Some(SyntaxKind::DOUBLE_QUOTED) => {
                self.builder.start_node(SyntaxKind::SCALAR.into());
                self.check_quote_termination();
                self.bump();
                self.builder.finish_node();
            }
            _ => {
                self.builder.start_node(SyntaxKind::SCALAR.into());
                let mut last = None;
                let mut j = self.cursor;
                loop {
                    match self.kind_at(j) {
                        None
                        | Some(SyntaxKind::COMMA)
                        | Some(SyntaxKind::RIGHT_BRACKET)
                        | Some(SyntaxKind::RIGHT_BRACE)
                        | Some(SyntaxKind::LEFT_BRACKET)
                        | Some(SyntaxKind::LEFT_BRACE)
                        | Some(SyntaxKind::NEWLINE)
                        | Some(SyntaxKind::COMMENT) => break,
                        Some(SyntaxKind::COLON) if self.colon_is_separator(j) => break,
                        Some(SyntaxKind::WHITESPACE) => j += 1,
                        Some(SyntaxKind::SINGLE_QUOTED) | Some(SyntaxKind::DOUBLE_QUOTED)
                            if j != self.cursor =>
                        {
                            self.error_here("quote character inside plain scalar");
                            last = Some(j);
                            j += 1;
                        }
                        Some(_) => {
                            last = Some(j);
                            j += 1;
                        }
                    }
                }
                if let Some(last) = last {
                    while self.cursor <= last {
                        self.bump();
                    }
                }
                self.builder.finish_node();
            }
        }
    }

    fn empty_scalar(&mut self) {
        self.builder.start_node(SyntaxKind::SCALAR.into());
        self.builder.finish_node();
    }

    fn skip_flow_trivia(&mut self) {
        while matches!(self.current(), Some(k) if k.is_trivia()) {
            self.bump();
        }
    }

    fn bump_into_error(&mut self) {
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.bump();
        self.builder.finish_node();
    }

    fn bump(&mut self) {
        if let Some((kind, text)) = self.tokens.get(self.cursor) {
            self.builder.token((*kind).into(), text);
            self.cursor += 1;
        }
    }

    fn consume_until(&mut self, idx: usize) {
        while self.cursor < idx {
            self.bump();
        }
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.kind_at(self.cursor)
    }

    fn kind_at(&self, idx: usize) -> Option<SyntaxKind> {
        self.tokens.get(idx).map(|(kind, _)| *kind)
    }

    /// Index, column and kind of the next non-trivia token.
    fn peek_content(&self) -> Option<(usize, usize, SyntaxKind)> {
        let mut j = self.cursor;
        while let Some(k) = self.kind_at(j) {
            if k.is_trivia() {
                j += 1;
            } else {
                return Some((j, self.col_at(j), k));
            }
        }
        None
    }

    fn col_at(&self, idx: usize) -> usize {
        let off = self.offsets.get(idx).copied().unwrap_or(self.source.len());
        let line_start = self.source[..off].rfind('\n').map(|p| p + 1).unwrap_or(0);
        off - line_start
    }

    fn is_key_at(&self, i: usize) -> bool {
        let mut j = i;
        while let Some(k) = self.kind_at(j) {
            match k {
                SyntaxKind::COLON => {
                    if self.colon_is_separator(j) {
                        return true;
                    }
                    j += 1;
                }
                SyntaxKind::NEWLINE | SyntaxKind::COMMENT => return false,
                SyntaxKind::LEFT_BRACKET | SyntaxKind::LEFT_BRACE => return false,
                _ => j += 1,
            }
        }
        false
    }

    fn colon_is_separator(&self, i: usize) -> bool {
        matches!(
            self.kind_at(i + 1),
            None | Some(SyntaxKind::WHITESPACE)
                | Some(SyntaxKind::NEWLINE)
                | Some(SyntaxKind::COMMENT)
        )
    }

    fn error_here(&mut self, message: &str) {
        let offset = self
            .offsets
            .get(self.cursor)
            .copied()
            .unwrap_or(self.source.len());
        let end = offset
            + self
                .tokens
                .get(self.cursor)
                .map(|(_, t)| t.len())
                .unwrap_or(0);
        self.errors.push(message.to_string());
        self.positioned_errors.push(PositionedParseError {
            message: message.to_string(),
            range: TextRange::new(
                TextSize::from(offset as u32),
                TextSize::from(end as u32),
            ),
            code: None,
        });
    }
}
