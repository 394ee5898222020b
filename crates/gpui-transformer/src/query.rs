//! The node query interface the transformer works against.
//!
//! The transformer never looks at raw characters. Anything that can expose
//! element structure through [`MarkupTree`] and [`MarkupNode`] can be
//! transformed, whether it is the bundled `jsx-parser` tree or a hand-built
//! test fixture.

use source_map::{apply_edits, AppliedEdits, Edit, Span};

/// Node kinds visible to the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `<a>…</a>`, including fragments.
    Element,
    /// `<a />`
    SelfClosingElement,
    /// The `<a …>` part of a paired element.
    OpeningElement,
    /// The `</a>` part of a paired element.
    ClosingElement,
    /// A tag name.
    Identifier,
    /// `name`, `name="v"` or `name={v}`.
    Attribute,
    /// The name part of an attribute.
    AttributeName,
    /// A quoted attribute value.
    StringLiteral,
    /// Literal text between tags.
    Text,
    /// A `{…}` container.
    Expression,
    /// Anything else.
    Other,
}

impl NodeKind {
    /// Returns true for paired and self-closing elements.
    pub fn is_element(self) -> bool {
        matches!(self, NodeKind::Element | NodeKind::SelfClosingElement)
    }
}

/// A node in a markup tree.
pub trait MarkupNode: Clone {
    /// Returns the kind of this node.
    fn kind(&self) -> NodeKind;

    /// Returns the child nodes in source order.
    fn children(&self) -> Vec<Self>;

    /// Returns the exact source text covered by this node.
    fn text(&self) -> String;

    /// Returns the parent node, if any.
    fn parent(&self) -> Option<Self>;

    /// Returns the source range covered by this node.
    fn span(&self) -> Span;

    /// Creates an edit replacing this node's text.
    fn replace(&self, text: impl Into<String>) -> Edit {
        Edit::new(self.span(), text)
    }
}

/// A parsed markup tree.
pub trait MarkupTree {
    /// The node type of this tree.
    type Node: MarkupNode;

    /// Returns the root node.
    fn root(&self) -> Self::Node;

    /// Returns the full source text.
    fn source(&self) -> &str;

    /// Returns every node whose kind is in `kinds`, in document order.
    fn find_all(&self, kinds: &[NodeKind]) -> Vec<Self::Node> {
        let mut found = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if kinds.contains(&node.kind()) {
                found.push(node.clone());
            }
            stack.extend(node.children().into_iter().rev());
        }
        found
    }

    /// Applies `edits` to the source text.
    fn commit_edits(&self, edits: Vec<Edit>) -> AppliedEdits {
        apply_edits(self.source(), edits)
    }
}
