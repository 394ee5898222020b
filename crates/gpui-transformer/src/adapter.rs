//! [`MarkupTree`] over `jsx-parser` syntax trees.

use crate::query::{MarkupNode, MarkupTree, NodeKind};
use jsx_parser::{JsxDocument, SyntaxKind, SyntaxNode};
use source_map::Span;

/// A node of a parsed JSX document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsxNode(SyntaxNode);

impl JsxNode {
    /// Returns the underlying syntax node.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl MarkupNode for JsxNode {
    fn kind(&self) -> NodeKind {
        match self.0.kind() {
            SyntaxKind::JsxElement => NodeKind::Element,
            SyntaxKind::JsxSelfClosingElement => NodeKind::SelfClosingElement,
            SyntaxKind::JsxOpeningElement => NodeKind::OpeningElement,
            SyntaxKind::JsxClosingElement => NodeKind::ClosingElement,
            SyntaxKind::JsxTagName => NodeKind::Identifier,
            SyntaxKind::JsxAttribute => NodeKind::Attribute,
            SyntaxKind::JsxAttributeName => NodeKind::AttributeName,
            SyntaxKind::JsxString => NodeKind::StringLiteral,
            SyntaxKind::JsxText => NodeKind::Text,
            SyntaxKind::JsxExpression => NodeKind::Expression,
            _ => NodeKind::Other,
        }
    }

    fn children(&self) -> Vec<Self> {
        self.0.children().map(JsxNode).collect()
    }

    fn text(&self) -> String {
        self.0.text().to_string()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().map(JsxNode)
    }

    fn span(&self) -> Span {
        self.0.text_range().into()
    }
}

/// A parsed JSX document viewed as a [`MarkupTree`].
#[derive(Debug, Clone, Copy)]
pub struct JsxTree<'a> {
    document: &'a JsxDocument,
}

impl<'a> JsxTree<'a> {
    /// Wraps a parsed document.
    pub fn new(document: &'a JsxDocument) -> Self {
        Self { document }
    }
}

impl MarkupTree for JsxTree<'_> {
    type Node = JsxNode;

    fn root(&self) -> JsxNode {
        JsxNode(self.document.syntax())
    }

    fn source(&self) -> &str {
        self.document.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_kinds() {
        let parsed = jsx_parser::parse(r#"<a href="/x">go {x}</a>"#);
        let tree = JsxTree::new(&parsed.document);
        let element = tree.find_all(&[NodeKind::Element]).remove(0);
        let kinds: Vec<_> = element.children().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::OpeningElement,
                NodeKind::Text,
                NodeKind::Expression,
                NodeKind::ClosingElement
            ]
        );

        let opening = &element.children()[0];
        let attribute_kinds: Vec<_> = opening.children().iter().map(|n| n.kind()).collect();
        assert_eq!(attribute_kinds, vec![NodeKind::Identifier, NodeKind::Attribute]);
    }

    #[test]
    fn test_replace_covers_node() {
        let source = "let a = <b/>;";
        let parsed = jsx_parser::parse(source);
        let tree = JsxTree::new(&parsed.document);
        let node = tree.find_all(&[NodeKind::SelfClosingElement]).remove(0);
        let applied = tree.commit_edits(vec![node.replace("b()")]);
        assert_eq!(applied.text, "let a = b();");
    }
}
