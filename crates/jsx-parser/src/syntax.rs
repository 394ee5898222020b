//! Lossless syntax tree types built on `rowan`.
//!
//! Every byte of the input ends up in exactly one token, so the text of the
//! root node is the original source and node ranges can be used for in-place
//! replacement.

use crate::lexer::TokenKind;

/// Kinds of tokens and nodes in the JSX syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // === Tokens ===
    /// Whitespace inside a tag.
    Whitespace,
    /// Host-language source outside of markup, or inside an expression container.
    ScriptText,
    /// Literal text between tags.
    Text,
    /// `<`
    LAngle,
    /// `</`
    LAngleSlash,
    /// `>`
    RAngle,
    /// `/>`
    SlashRAngle,
    /// `/`
    Slash,
    /// `=`
    Eq,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// A tag or attribute name segment.
    Ident,
    /// A quoted attribute value, quotes included.
    String,
    /// Input the parser could not place.
    Error,

    // === Nodes ===
    /// The whole file.
    Root,
    /// `<a>…</a>` or a fragment `<>…</>`.
    JsxElement,
    /// `<a />`
    JsxSelfClosingElement,
    /// `<a …>`
    JsxOpeningElement,
    /// `</a>`
    JsxClosingElement,
    /// `a`, `Tooltip.Root`, `svg:path`
    JsxTagName,
    /// `name`, `name="v"`, `name={v}`
    JsxAttribute,
    /// The name part of an attribute.
    JsxAttributeName,
    /// A quoted attribute value.
    JsxString,
    /// Text content between tags.
    JsxText,
    /// `{expr}` as a child, attribute value or spread.
    JsxExpression,
}

impl SyntaxKind {
    const ALL: [SyntaxKind; 27] = [
        SyntaxKind::Whitespace,
        SyntaxKind::ScriptText,
        SyntaxKind::Text,
        SyntaxKind::LAngle,
        SyntaxKind::LAngleSlash,
        SyntaxKind::RAngle,
        SyntaxKind::SlashRAngle,
        SyntaxKind::Slash,
        SyntaxKind::Eq,
        SyntaxKind::LBrace,
        SyntaxKind::RBrace,
        SyntaxKind::Dot,
        SyntaxKind::Colon,
        SyntaxKind::Ident,
        SyntaxKind::String,
        SyntaxKind::Error,
        SyntaxKind::Root,
        SyntaxKind::JsxElement,
        SyntaxKind::JsxSelfClosingElement,
        SyntaxKind::JsxOpeningElement,
        SyntaxKind::JsxClosingElement,
        SyntaxKind::JsxTagName,
        SyntaxKind::JsxAttribute,
        SyntaxKind::JsxAttributeName,
        SyntaxKind::JsxString,
        SyntaxKind::JsxText,
        SyntaxKind::JsxExpression,
    ];

    /// Returns true for the two element node kinds.
    pub fn is_element(self) -> bool {
        matches!(
            self,
            SyntaxKind::JsxElement | SyntaxKind::JsxSelfClosingElement
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::LAngle => SyntaxKind::LAngle,
            TokenKind::LAngleSlash => SyntaxKind::LAngleSlash,
            TokenKind::RAngle => SyntaxKind::RAngle,
            TokenKind::SlashRAngle => SyntaxKind::SlashRAngle,
            TokenKind::Slash => SyntaxKind::Slash,
            TokenKind::Eq => SyntaxKind::Eq,
            TokenKind::LBrace => SyntaxKind::LBrace,
            TokenKind::RBrace => SyntaxKind::RBrace,
            TokenKind::Dot => SyntaxKind::Dot,
            TokenKind::Colon => SyntaxKind::Colon,
            TokenKind::Ident => SyntaxKind::Ident,
            TokenKind::String => SyntaxKind::String,
            TokenKind::Whitespace => SyntaxKind::Whitespace,
            TokenKind::Eof | TokenKind::Error => SyntaxKind::Error,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// The `rowan` language tag for JSX trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsxLanguage {}

impl rowan::Language for JsxLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::ALL
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A node in the JSX syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<JsxLanguage>;
/// A token in the JSX syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<JsxLanguage>;
/// A node or token in the JSX syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<JsxLanguage>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn test_kind_raw_roundtrip() {
        for kind in SyntaxKind::ALL {
            let raw = JsxLanguage::kind_to_raw(kind);
            assert_eq!(JsxLanguage::kind_from_raw(raw), kind);
        }
    }

    #[test]
    fn test_unknown_raw_kind_maps_to_error() {
        assert_eq!(
            JsxLanguage::kind_from_raw(rowan::SyntaxKind(u16::MAX)),
            SyntaxKind::Error
        );
    }
}
