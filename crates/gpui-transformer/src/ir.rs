//! The normalized UI tree built from markup nodes.

use crate::error::TransformError;
use crate::extract::{extract_attributes, take_class_tokens};
use crate::query::{MarkupNode, NodeKind};
use indexmap::IndexMap;
use jsx_parser::scan;
use smol_str::SmolStr;

/// Tags that become the generic `div` container.
const COLLAPSED_TAGS: &[&str] = &[
    "div", "span", "p", "section", "article", "header", "footer", "main", "nav", "aside", "ul",
    "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "label", "form", "button", "a", "strong",
    "em", "small", "pre", "code", "blockquote", "figure", "figcaption",
];

const CONTAINER_TAG: &str = "div";

/// A node of the UI tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    /// An element with its attributes, classes and children.
    Element(ElementNode),
    /// Trimmed literal text.
    Text(String),
    /// An embedded expression.
    Expression(ExpressionNode),
}

/// An element of the UI tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// The constructor to call, after collapsing plain tags to `div`.
    pub tag: SmolStr,
    /// The tag as written in the source.
    pub original_tag: SmolStr,
    /// Attributes other than the class attribute, in source order.
    pub attributes: IndexMap<SmolStr, AttributeValue>,
    /// Utility class tokens in source order.
    pub classes: Vec<String>,
    /// Children in source order.
    pub children: Vec<UiNode>,
}

/// An embedded expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionNode {
    /// Source text without the wrapping braces.
    pub source: String,
    /// True for template literals, which render through `format!`.
    pub is_template: bool,
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Bare presence: `disabled`.
    Flag,
    /// A literal: `title="Save"`.
    String(String),
    /// Raw source of `{…}` without the braces.
    Expression(String),
    /// `when={(cond, then)}` split into its two parts.
    Tuple(String, String),
}

/// Builds the UI tree for one element node.
///
/// Constructors used by the tree are appended to `tags`; the caller commits
/// them to the session only once the whole unit succeeds.
pub fn build_element<N: MarkupNode>(
    node: &N,
    tags: &mut Vec<SmolStr>,
) -> Result<ElementNode, TransformError> {
    let children = node.children();
    let opening = match node.kind() {
        NodeKind::SelfClosingElement => node.clone(),
        _ => children
            .iter()
            .find(|child| child.kind() == NodeKind::OpeningElement)
            .cloned()
            .ok_or(TransformError::MissingOpeningElement { span: node.span() })?,
    };

    let mut attributes = extract_attributes(&opening)?;
    let classes = take_class_tokens(&mut attributes);

    let original_tag: SmolStr = opening
        .children()
        .iter()
        .find(|child| child.kind() == NodeKind::Identifier)
        .map(|name| SmolStr::new(name.text().trim()))
        .unwrap_or_else(|| SmolStr::new_static(CONTAINER_TAG));
    let tag = if COLLAPSED_TAGS.contains(&original_tag.as_str()) {
        SmolStr::new_static(CONTAINER_TAG)
    } else {
        original_tag.clone()
    };
    tags.push(tag.clone());

    let mut ui_children = Vec::new();
    if node.kind() == NodeKind::Element {
        for child in &children {
            if let Some(built) = build_child(child, tags)? {
                ui_children.push(built);
            }
        }
    }

    Ok(ElementNode {
        tag,
        original_tag,
        attributes,
        classes,
        children: ui_children,
    })
}

fn build_child<N: MarkupNode>(
    node: &N,
    tags: &mut Vec<SmolStr>,
) -> Result<Option<UiNode>, TransformError> {
    match node.kind() {
        NodeKind::Element | NodeKind::SelfClosingElement => {
            Ok(Some(UiNode::Element(build_element(node, tags)?)))
        }
        NodeKind::Text => {
            let text = node.text();
            let text = text.trim();
            Ok((!text.is_empty()).then(|| UiNode::Text(text.to_string())))
        }
        NodeKind::Expression => Ok(build_expression(&node.text()).map(UiNode::Expression)),
        _ => Ok(None),
    }
}

/// Builds an expression node from `{…}` source, dropping empty containers.
pub fn build_expression(container: &str) -> Option<ExpressionNode> {
    let source = strip_braces(container);
    if is_comment_only(source) {
        return None;
    }
    let is_template = is_single_template(source) || source.contains("${");
    Some(ExpressionNode {
        source: source.to_string(),
        is_template,
    })
}

/// Returns true if `source` is exactly one template literal.
fn is_single_template(source: &str) -> bool {
    source.len() > 1
        && source.starts_with('`')
        && source.ends_with('`')
        && scan::template_end(source, 0) == source.len()
}

/// Removes one pair of wrapping braces and surrounding whitespace.
pub fn strip_braces(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(text)
        .trim()
}

/// Returns true for empty text or text made only of comments.
fn is_comment_only(mut text: &str) -> bool {
    loop {
        text = text.trim_start();
        if text.is_empty() {
            return true;
        }
        if let Some(rest) = text.strip_prefix("/*") {
            match rest.find("*/") {
                Some(end) => text = &rest[end + 2..],
                None => return true,
            }
        } else if let Some(rest) = text.strip_prefix("//") {
            match rest.find('\n') {
                Some(end) => text = &rest[end..],
                None => return true,
            }
        } else {
            return false;
        }
    }
}
