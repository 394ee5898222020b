//! The transformer only sees markup through `MarkupTree`/`MarkupNode`, so a
//! hand-built tree must transform exactly like a parsed one.

use gpui_transformer::{
    top_level_units, transform_tree, MarkupNode, MarkupTree, NodeKind, TransformConfig,
    TransformError,
};
use pretty_assertions::assert_eq;
use source_map::Span;
use std::rc::Rc;

#[derive(Debug)]
struct Entry {
    kind: NodeKind,
    start: usize,
    end: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Arena {
    source: String,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct MockNode {
    arena: Rc<Arena>,
    id: usize,
}

impl MockNode {
    fn entry(&self) -> &Entry {
        &self.arena.entries[self.id]
    }

    fn at(&self, id: usize) -> Self {
        Self {
            arena: Rc::clone(&self.arena),
            id,
        }
    }
}

impl MarkupNode for MockNode {
    fn kind(&self) -> NodeKind {
        self.entry().kind
    }

    fn children(&self) -> Vec<Self> {
        self.entry().children.iter().map(|&id| self.at(id)).collect()
    }

    fn text(&self) -> String {
        let entry = self.entry();
        self.arena.source[entry.start..entry.end].to_string()
    }

    fn parent(&self) -> Option<Self> {
        self.entry().parent.map(|id| self.at(id))
    }

    fn span(&self) -> Span {
        let entry = self.entry();
        Span::from_usize(entry.start, entry.end)
    }
}

struct MockTree {
    arena: Rc<Arena>,
}

impl MarkupTree for MockTree {
    type Node = MockNode;

    fn root(&self) -> MockNode {
        MockNode {
            arena: Rc::clone(&self.arena),
            id: 0,
        }
    }

    fn source(&self) -> &str {
        &self.arena.source
    }
}

/// Builds a tree by appending source text while opening and closing nodes.
struct Builder {
    source: String,
    entries: Vec<Entry>,
    stack: Vec<usize>,
}

impl Builder {
    fn new() -> Self {
        Self {
            source: String::new(),
            entries: vec![Entry {
                kind: NodeKind::Other,
                start: 0,
                end: 0,
                parent: None,
                children: Vec::new(),
            }],
            stack: vec![0],
        }
    }

    fn open(&mut self, kind: NodeKind) -> &mut Self {
        let id = self.entries.len();
        let parent = *self.stack.last().unwrap();
        self.entries.push(Entry {
            kind,
            start: self.source.len(),
            end: self.source.len(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent].children.push(id);
        self.stack.push(id);
        self
    }

    fn text(&mut self, text: &str) -> &mut Self {
        self.source.push_str(text);
        self
    }

    fn leaf(&mut self, kind: NodeKind, text: &str) -> &mut Self {
        self.open(kind).text(text).close()
    }

    fn close(&mut self) -> &mut Self {
        let id = self.stack.pop().unwrap();
        self.entries[id].end = self.source.len();
        self
    }

    fn finish(&mut self) -> MockTree {
        self.entries[0].end = self.source.len();
        MockTree {
            arena: Rc::new(Arena {
                source: std::mem::take(&mut self.source),
                entries: std::mem::take(&mut self.entries),
            }),
        }
    }
}

/// `const a = <div className="flex">Hi {`x ${y}`}</div>;`
fn build_simple(builder: &mut Builder) {
    builder
        .text("const a = ")
        .open(NodeKind::Element)
        .open(NodeKind::OpeningElement)
        .text("<")
        .leaf(NodeKind::Identifier, "div")
        .text(" ")
        .open(NodeKind::Attribute)
        .leaf(NodeKind::AttributeName, "className")
        .text("=")
        .leaf(NodeKind::StringLiteral, "\"flex\"")
        .close()
        .text(">")
        .close()
        .leaf(NodeKind::Text, "Hi ")
        .leaf(NodeKind::Expression, "{`x ${y}`}")
        .open(NodeKind::ClosingElement)
        .text("</")
        .leaf(NodeKind::Identifier, "div")
        .text(">")
        .close()
        .close()
        .text(";");
}

#[test]
fn test_mock_tree_transforms_like_parsed_source() {
    let mut builder = Builder::new();
    build_simple(&mut builder);
    let tree = builder.finish();

    let result = transform_tree(&tree, &TransformConfig::default());
    assert_eq!(
        result.code,
        "use gpui::{div, rgb, px};\nconst a = div()\n    .flex()\n    .children([\"Hi\", format!(\"x {}\", &y)]);"
    );
    assert!(result.errors.is_empty());
}

#[test]
fn test_malformed_unit_is_skipped_and_siblings_continue() {
    let mut builder = Builder::new();
    build_simple(&mut builder);
    // A paired element with no opening tag.
    builder
        .text("\nconst b = ")
        .open(NodeKind::Element)
        .leaf(NodeKind::Text, "orphan")
        .close()
        .text(";");
    let tree = builder.finish();

    let result = transform_tree(&tree, &TransformConfig::default());
    assert_eq!(result.units, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.errors[0],
        TransformError::MissingOpeningElement { .. }
    ));
    assert!(result.code.ends_with("\nconst b = orphan;"));
    assert!(result.code.starts_with("use gpui::{div, rgb, px};\nconst a = div()"));
}

#[test]
fn test_nameless_attribute_is_malformed() {
    let mut builder = Builder::new();
    builder
        .open(NodeKind::SelfClosingElement)
        .text("<")
        .leaf(NodeKind::Identifier, "img")
        .text(" ")
        .open(NodeKind::Attribute)
        .leaf(NodeKind::StringLiteral, "\"x\"")
        .close()
        .text("/>")
        .close();
    let tree = builder.finish();

    let result = transform_tree(&tree, &TransformConfig::default());
    assert_eq!(result.code, "<img \"x\"/>");
    assert!(matches!(
        result.errors[..],
        [TransformError::MalformedAttribute { .. }]
    ));
}

#[test]
fn test_elements_under_expressions_are_excluded() {
    let mut builder = Builder::new();
    builder
        .open(NodeKind::Element)
        .open(NodeKind::OpeningElement)
        .text("<")
        .leaf(NodeKind::Identifier, "ul")
        .text(">")
        .close()
        .open(NodeKind::Expression)
        .text("{xs.map(x => ")
        .open(NodeKind::SelfClosingElement)
        .text("<")
        .leaf(NodeKind::Identifier, "li")
        .text("/>")
        .close()
        .text(")}")
        .close()
        .open(NodeKind::ClosingElement)
        .text("</")
        .leaf(NodeKind::Identifier, "ul")
        .text(">")
        .close()
        .close();
    let tree = builder.finish();

    let units = top_level_units(&tree);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].kind(), NodeKind::Element);

    let result = transform_tree(&tree, &TransformConfig::default());
    assert_eq!(
        result.code,
        "use gpui::{div, rgb, px};\ndiv()\n    .child(xs.map(x => <li/>))"
    );
}

#[test]
fn test_find_all_is_preorder() {
    let mut builder = Builder::new();
    build_simple(&mut builder);
    let tree = builder.finish();

    let kinds: Vec<NodeKind> = tree
        .find_all(&[NodeKind::Identifier, NodeKind::Text, NodeKind::Expression])
        .iter()
        .map(MarkupNode::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Identifier,
            NodeKind::Text,
            NodeKind::Expression,
            NodeKind::Identifier
        ]
    );
}
