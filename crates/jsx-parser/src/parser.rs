//! Recursive descent parser for JSX embedded in TS/JS source.
//!
//! Host-language source is not parsed; it is scanned just far enough to skip
//! strings, comments, template literals and regex literals, and to tell whether
//! a `<` starts an element or is a comparison/type argument.

use crate::error::{ParseError, ParseErrorKind};
use crate::scan;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::syntax::SyntaxKind;
use crate::{JsxDocument, ParseResult};
use rowan::GreenNodeBuilder;
use source_map::Span;

/// Keywords after which `<` starts an expression rather than a comparison.
const EXPRESSION_KEYWORDS: &[&str] = &["return", "yield", "default", "case", "await"];

/// Where a script region stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptEnd {
    /// The end of the file.
    Eof,
    /// The `}` that closes an expression container.
    Brace,
}

/// The JSX parser.
pub struct Parser<'src> {
    /// The source being parsed.
    source: &'src str,
    /// Current byte offset.
    pos: usize,
    /// Green tree under construction.
    builder: GreenNodeBuilder<'static>,
    /// Parse errors collected during parsing.
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    /// Parses the source into a JSX document.
    pub fn parse(mut self) -> ParseResult {
        self.builder.start_node(SyntaxKind::Root.into());
        self.parse_script(ScriptEnd::Eof);
        self.builder.finish_node();

        ParseResult {
            document: JsxDocument::new(self.builder.finish(), self.source),
            errors: self.errors,
        }
    }

    // === Token helpers ===

    /// Returns the unconsumed part of the source.
    fn rest(&self) -> &'src str {
        let source = self.source;
        &source[self.pos..]
    }

    /// Returns the next tag-interior token without consuming it.
    fn peek(&self) -> Token {
        Lexer::at(self.source, self.pos)
            .next()
            .unwrap_or_else(|| self.eof_token())
    }

    /// Returns the next token that is not whitespace.
    fn peek_non_trivia(&self) -> Token {
        Lexer::at(self.source, self.pos)
            .find(|t| t.kind != TokenKind::Whitespace)
            .unwrap_or_else(|| self.eof_token())
    }

    fn eof_token(&self) -> Token {
        Token {
            kind: TokenKind::Eof,
            span: Span::from_usize(self.source.len(), self.source.len()),
        }
    }

    /// Consumes `token`, adding it to the tree.
    fn bump(&mut self, token: Token) {
        self.push_token(token.kind.into(), token.end());
    }

    /// Consumes an unusable token, always making progress.
    fn bump_error(&mut self, token: Token) {
        let next_char = self.rest().chars().next().map_or(0, char::len_utf8);
        let mut end = token.end().max(self.pos + next_char);
        while !self.source.is_char_boundary(end) {
            end += 1;
        }
        self.push_token(SyntaxKind::Error, end);
    }

    /// Adds `source[pos..end]` as one token of `kind`.
    fn push_token(&mut self, kind: SyntaxKind, end: usize) {
        if end > self.pos {
            self.builder.token(kind.into(), &self.source[self.pos..end]);
            self.pos = end;
        }
    }

    /// Consumes whitespace inside a tag.
    fn eat_trivia(&mut self) {
        let token = self.peek();
        if token.kind == TokenKind::Whitespace {
            self.bump(token);
        }
    }

    /// Reports an error at the given span.
    fn error(&mut self, kind: ParseErrorKind, span: Span) {
        self.errors.push(ParseError::new(kind, span));
    }

    // === Script regions ===

    /// Scans host-language source, emitting it as `ScriptText` and descending
    /// into markup wherever an element can start.
    ///
    /// Returns true when stopped at the `}` closing an expression container.
    fn parse_script(&mut self, end: ScriptEnd) -> bool {
        let mut chunk_start = self.pos;
        let mut depth = 0usize;
        // Whether the scanner sits where an expression may begin.
        let mut expr_start = true;

        while let Some(c) = self.rest().chars().next() {
            let next = self.rest()[c.len_utf8()..].chars().next();
            match c {
                '"' | '\'' => {
                    self.pos = scan::string_end(self.source, self.pos);
                    expr_start = false;
                }
                '`' => {
                    self.pos = scan::template_end(self.source, self.pos);
                    expr_start = false;
                }
                '/' if next == Some('/') => {
                    self.pos = scan::line_comment_end(self.source, self.pos)
                }
                '/' if next == Some('*') => {
                    self.pos = scan::block_comment_end(self.source, self.pos)
                }
                '/' if expr_start => {
                    self.pos = scan::regex_end(self.source, self.pos);
                    expr_start = false;
                }
                '{' | '(' | '[' => {
                    depth += 1;
                    self.pos += 1;
                    expr_start = true;
                }
                '}' if depth == 0 && end == ScriptEnd::Brace => {
                    self.flush_script(chunk_start);
                    return true;
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                    expr_start = true;
                }
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                    expr_start = false;
                }
                '<' if expr_start && self.at_element_start() => {
                    self.flush_script(chunk_start);
                    self.parse_element();
                    chunk_start = self.pos;
                    expr_start = false;
                }
                c if is_ident_char(c) => {
                    let rest = self.rest();
                    let len = rest
                        .find(|ch: char| !is_ident_char(ch))
                        .unwrap_or(rest.len());
                    expr_start = EXPRESSION_KEYWORDS.contains(&&rest[..len]);
                    self.pos += len;
                }
                c if c.is_whitespace() => self.pos += c.len_utf8(),
                c => {
                    self.pos += c.len_utf8();
                    expr_start = true;
                }
            }
        }

        self.flush_script(chunk_start);
        false
    }

    /// Emits the script text scanned since `chunk_start`.
    fn flush_script(&mut self, chunk_start: usize) {
        if self.pos > chunk_start {
            self.builder.token(
                SyntaxKind::ScriptText.into(),
                &self.source[chunk_start..self.pos],
            );
        }
    }

    /// Returns true if the `<` at the cursor opens an element.
    ///
    /// Rejects TSX generic arrows like `<T,>(x) => x`.
    fn at_element_start(&self) -> bool {
        let rest = &self.rest()[1..];
        match rest.chars().next() {
            Some('>') => true,
            Some(c) if is_ident_start(c) => {
                let name_len = rest
                    .find(|ch: char| !(is_ident_char(ch) || matches!(ch, '-' | '.' | ':')))
                    .unwrap_or(rest.len());
                let after = rest[name_len..].trim_start();
                match after.chars().next() {
                    Some('>' | '/' | '{') => true,
                    Some(ch) => is_ident_start(ch),
                    None => false,
                }
            }
            _ => false,
        }
    }

    // === Markup ===

    /// Parses an element starting at `<`.
    fn parse_element(&mut self) {
        let checkpoint = self.builder.checkpoint();
        let open = self.peek();
        self.bump(open);
        self.eat_trivia();
        let name = self.parse_tag_name();
        self.parse_attributes();

        let token = self.peek();
        match token.kind {
            TokenKind::SlashRAngle => {
                self.bump(token);
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::JsxSelfClosingElement.into());
                self.builder.finish_node();
            }
            TokenKind::RAngle => {
                self.bump(token);
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::JsxOpeningElement.into());
                self.builder.finish_node();

                self.parse_children(name.as_deref().unwrap_or_default(), open.span);

                self.builder
                    .start_node_at(checkpoint, SyntaxKind::JsxElement.into());
                self.builder.finish_node();
            }
            _ => {
                self.error(
                    ParseErrorKind::UnclosedTag {
                        tag_name: name.unwrap_or_default(),
                    },
                    open.span,
                );
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::JsxSelfClosingElement.into());
                self.builder.finish_node();
            }
        }
    }

    /// Parses a tag name such as `div`, `Tooltip.Root` or `svg:path`.
    fn parse_tag_name(&mut self) -> Option<String> {
        let token = self.peek();
        if token.kind != TokenKind::Ident {
            return None;
        }

        let start = self.pos;
        self.builder.start_node(SyntaxKind::JsxTagName.into());
        self.bump(token);
        loop {
            let separator = self.peek();
            if !matches!(separator.kind, TokenKind::Dot | TokenKind::Colon) {
                break;
            }
            match Lexer::at(self.source, separator.end()).next() {
                Some(segment) if segment.kind == TokenKind::Ident => {
                    self.bump(separator);
                    self.bump(segment);
                }
                _ => break,
            }
        }
        self.builder.finish_node();

        Some(self.source[start..self.pos].to_string())
    }

    /// Parses attributes up to (not including) `>` or `/>`.
    fn parse_attributes(&mut self) {
        loop {
            self.eat_trivia();
            let token = self.peek();
            match token.kind {
                TokenKind::Ident => self.parse_attribute(),
                // Spread attribute: `{...props}`
                TokenKind::LBrace => self.parse_expression_container(),
                TokenKind::RAngle | TokenKind::SlashRAngle => return,
                TokenKind::Eof => {
                    self.error(
                        ParseErrorKind::UnexpectedEof {
                            expected: "'>'".to_string(),
                        },
                        token.span,
                    );
                    return;
                }
                TokenKind::LAngle | TokenKind::LAngleSlash => {
                    self.error(
                        ParseErrorKind::UnexpectedToken {
                            expected: "'>'".to_string(),
                            found: token.kind.name().to_string(),
                        },
                        token.span,
                    );
                    return;
                }
                _ => {
                    self.error(
                        ParseErrorKind::UnexpectedToken {
                            expected: "attribute".to_string(),
                            found: token.kind.name().to_string(),
                        },
                        token.span,
                    );
                    self.bump_error(token);
                }
            }
        }
    }

    /// Parses a single `name`, `name="value"` or `name={expr}` attribute.
    fn parse_attribute(&mut self) {
        self.builder.start_node(SyntaxKind::JsxAttribute.into());

        self.builder.start_node(SyntaxKind::JsxAttributeName.into());
        let name = self.peek();
        self.bump(name);
        let separator = self.peek();
        if separator.kind == TokenKind::Colon {
            if let Some(segment) = Lexer::at(self.source, separator.end())
                .next()
                .filter(|t| t.kind == TokenKind::Ident)
            {
                self.bump(separator);
                self.bump(segment);
            }
        }
        self.builder.finish_node();

        if self.peek_non_trivia().kind == TokenKind::Eq {
            self.eat_trivia();
            let eq = self.peek();
            self.bump(eq);
            self.eat_trivia();

            let value = self.peek();
            match value.kind {
                TokenKind::String => {
                    self.builder.start_node(SyntaxKind::JsxString.into());
                    self.bump(value);
                    self.builder.finish_node();
                }
                TokenKind::LBrace => self.parse_expression_container(),
                TokenKind::LAngle => self.parse_element(),
                _ => self.error(
                    ParseErrorKind::InvalidAttribute {
                        message: format!("expected a value, found {}", value.kind.name()),
                    },
                    value.span,
                ),
            }
        }

        self.builder.finish_node();
    }

    /// Parses `{…}` at the cursor.
    fn parse_expression_container(&mut self) {
        let open = Span::from_usize(self.pos, self.pos + 1);
        self.builder.start_node(SyntaxKind::JsxExpression.into());
        self.push_token(SyntaxKind::LBrace, self.pos + 1);

        if self.parse_script(ScriptEnd::Brace) {
            self.push_token(SyntaxKind::RBrace, self.pos + 1);
        } else {
            self.error(ParseErrorKind::UnclosedExpression, open);
        }

        self.builder.finish_node();
    }

    /// Parses element content up to and including the closing tag.
    fn parse_children(&mut self, name: &str, open: Span) {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                self.error(
                    ParseErrorKind::UnclosedTag {
                        tag_name: name.to_string(),
                    },
                    open,
                );
                return;
            }

            if rest.starts_with("</") {
                self.parse_closing_tag(name);
                return;
            }
            if rest.starts_with('<') {
                self.parse_element();
                continue;
            }
            if rest.starts_with('{') {
                self.parse_expression_container();
                continue;
            }

            let len = rest
                .find(|c: char| c == '<' || c == '{')
                .unwrap_or(rest.len());
            self.builder.start_node(SyntaxKind::JsxText.into());
            self.push_token(SyntaxKind::Text, self.pos + len);
            self.builder.finish_node();
        }
    }

    /// Parses a closing tag.
    fn parse_closing_tag(&mut self, expected: &str) {
        let start = self.pos;
        self.builder.start_node(SyntaxKind::JsxClosingElement.into());
        self.push_token(SyntaxKind::LAngleSlash, self.pos + 2);
        self.eat_trivia();
        let found = self.parse_tag_name().unwrap_or_default();
        self.eat_trivia();

        let close = self.peek();
        if close.kind == TokenKind::RAngle {
            self.bump(close);
        } else {
            self.error(
                ParseErrorKind::UnexpectedToken {
                    expected: "'>'".to_string(),
                    found: close.kind.name().to_string(),
                },
                close.span,
            );
        }
        self.builder.finish_node();

        if found != expected {
            self.error(
                ParseErrorKind::MismatchedClosingTag {
                    expected: expected.to_string(),
                    found,
                },
                Span::from_usize(start, self.pos),
            );
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
