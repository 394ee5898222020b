//! JSX parser for gpui-codemod.
//!
//! This crate parses `.tsx`/`.jsx` sources into a lossless `rowan` tree:
//! - Tag interiors are tokenized with `logos`
//! - Host-language code is kept verbatim as `ScriptText`
//! - Markup nested inside expression containers is parsed too
//! - Errors are collected and parsing continues
//!
//! # Example
//!
//! ```
//! use jsx_parser::{parse, SyntaxKind};
//!
//! let source = r#"export const App = () => <div className="flex">Hi</div>;"#;
//!
//! let result = parse(source);
//! assert!(result.errors.is_empty());
//!
//! let element = result.document.elements().next().unwrap();
//! assert_eq!(element.kind(), SyntaxKind::JsxElement);
//! assert_eq!(result.document.syntax().text().to_string(), source);
//! ```

mod error;
mod lexer;
mod parser;
pub mod scan;
mod syntax;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use source_map::Span;
pub use syntax::{JsxLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use rowan::GreenNode;

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct JsxDocument {
    green: GreenNode,
    source: String,
}

impl JsxDocument {
    fn new(green: GreenNode, source: &str) -> Self {
        Self {
            green,
            source: source.to_string(),
        }
    }

    /// Returns the root node of the syntax tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Returns the source text this document was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns every element node, outer elements first.
    pub fn elements(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax()
            .descendants()
            .filter(|node| node.kind().is_element())
    }
}

/// The result of parsing a JSX/TSX file.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed document.
    pub document: JsxDocument,
    /// Any errors encountered during parsing.
    pub errors: Vec<ParseError>,
}

/// Parses a source file into a lossless syntax tree.
///
/// Parsing always produces a tree covering the full input; problems are
/// reported in [`ParseResult::errors`].
pub fn parse(source: &str) -> ParseResult {
    parser::Parser::new(source).parse()
}
