//! Tag-interior lexer using logos.
//!
//! The lexer only tokenizes the inside of JSX tags (`<Button onClick={f} />`).
//! Script regions and expression containers are scanned by the parser, which
//! knows about strings, comments, template literals and regex literals.

use logos::Logos;
use source_map::Span;
use text_size::TextSize;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token in the source.
    pub span: Span,
}

impl Token {
    /// Returns the byte offset just past this token.
    #[inline]
    pub fn end(&self) -> usize {
        u32::from(self.span.end) as usize
    }
}

/// Token kinds found inside JSX tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Default)]
pub enum TokenKind {
    /// `<`
    #[token("<")]
    LAngle,

    /// `</`
    #[token("</")]
    LAngleSlash,

    /// `>`
    #[token(">")]
    RAngle,

    /// `/>`
    #[token("/>")]
    SlashRAngle,

    /// A stray `/`
    #[token("/")]
    Slash,

    /// `=`
    #[token("=")]
    Eq,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `.` in member tag names (`Tooltip.Root`)
    #[token(".")]
    Dot,

    /// `:` in namespaced names (`xlink:href`)
    #[token(":")]
    Colon,

    /// A tag or attribute name. JSX names may contain hyphens (`aria-label`).
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$\-]*")]
    Ident,

    /// A quoted attribute value.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    String,

    /// Whitespace, kept so the syntax tree stays lossless.
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// End of file
    Eof,

    /// Invalid/unknown token
    #[default]
    Error,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LAngle => "'<'",
            TokenKind::LAngleSlash => "'</'",
            TokenKind::RAngle => "'>'",
            TokenKind::SlashRAngle => "'/>'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Ident => "identifier",
            TokenKind::String => "string",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        }
    }
}

/// A lexer over the tail of a source string, reporting absolute spans.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    offset: usize,
    end: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Self::at(source, 0)
    }

    /// Creates a lexer that starts at byte `offset` of `source`.
    pub fn at(source: &'src str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        Self {
            inner: TokenKind::lexer(&source[offset..]),
            offset,
            end: source.len(),
            finished: false,
        }
    }

    fn span(&self) -> Span {
        let range = self.inner.span();
        Span::from_usize(self.offset + range.start, self.offset + range.end)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(Ok(kind)) => Some(Token {
                kind,
                span: self.span(),
            }),
            Some(Err(())) => Some(Token {
                kind: TokenKind::Error,
                span: self.span(),
            }),
            None => {
                self.finished = true;
                let end = TextSize::from(self.end as u32);
                Some(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof | TokenKind::Whitespace))
            .collect()
    }

    #[test]
    fn test_opening_tag() {
        assert_eq!(
            tokenize(r#"<div className="flex">"#),
            vec![
                TokenKind::LAngle,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::String,
                TokenKind::RAngle
            ]
        );
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(
            tokenize("<img/>"),
            vec![TokenKind::LAngle, TokenKind::Ident, TokenKind::SlashRAngle]
        );
    }

    #[test]
    fn test_closing_tag() {
        assert_eq!(
            tokenize("</div>"),
            vec![TokenKind::LAngleSlash, TokenKind::Ident, TokenKind::RAngle]
        );
    }

    #[test]
    fn test_member_tag_name() {
        assert_eq!(
            tokenize("<Tooltip.Root>"),
            vec![
                TokenKind::LAngle,
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::RAngle
            ]
        );
    }

    #[test]
    fn test_hyphenated_attribute() {
        assert_eq!(
            tokenize("aria-label='Close'"),
            vec![TokenKind::Ident, TokenKind::Eq, TokenKind::String]
        );
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let tokens = tokenize("title=\"oops");
        assert_eq!(tokens[0], TokenKind::Ident);
        assert_eq!(tokens[1], TokenKind::Eq);
        assert_eq!(tokens[2], TokenKind::Error);
    }

    #[test]
    fn test_lexer_at_offset_reports_absolute_spans() {
        let source = "return <a>";
        let token = Lexer::at(source, 7).next().unwrap();
        assert_eq!(token.kind, TokenKind::LAngle);
        assert_eq!(token.span, Span::from_usize(7, 8));
    }

    #[test]
    fn test_eof_at_end() {
        let token = Lexer::at("abc", 3).next().unwrap();
        assert_eq!(token.kind, TokenKind::Eof);
    }
}
