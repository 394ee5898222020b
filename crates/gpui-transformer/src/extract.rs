//! Attribute and class extraction from an opening tag.

use crate::error::TransformError;
use crate::ir::{strip_braces, AttributeValue};
use crate::query::{MarkupNode, NodeKind};
use indexmap::IndexMap;
use smol_str::SmolStr;

/// Attributes whose value may be a `(condition, consequence)` pair.
pub const CONDITIONAL_ATTRIBUTES: &[&str] = &["when", "whenSome"];

/// Class attribute names, in lookup order.
const CLASS_ATTRIBUTES: &[&str] = &["className", "class"];

/// Collects the attributes of an opening tag (or self-closing element).
///
/// A repeated attribute name keeps its first position and takes the last value.
pub fn extract_attributes<N: MarkupNode>(
    opening: &N,
) -> Result<IndexMap<SmolStr, AttributeValue>, TransformError> {
    let mut attributes = IndexMap::new();

    for child in opening.children() {
        match child.kind() {
            NodeKind::Attribute => {
                let (name, value) = extract_attribute(&child)?;
                attributes.insert(name, value);
            }
            NodeKind::Expression => {
                log::debug!("skipping spread attribute {}", child.text().trim());
            }
            _ => {}
        }
    }

    Ok(attributes)
}

fn extract_attribute<N: MarkupNode>(
    attribute: &N,
) -> Result<(SmolStr, AttributeValue), TransformError> {
    let children = attribute.children();
    let name = children
        .iter()
        .find(|child| child.kind() == NodeKind::AttributeName)
        .map(|child| SmolStr::new(child.text().trim()))
        .filter(|name| !name.is_empty())
        .ok_or(TransformError::MalformedAttribute {
            span: attribute.span(),
        })?;

    let value = children
        .iter()
        .find(|child| child.kind() != NodeKind::AttributeName && child.kind() != NodeKind::Other);
    let value = match value {
        None => AttributeValue::Flag,
        Some(value) => match value.kind() {
            NodeKind::Expression => {
                let source = strip_braces(&value.text()).to_string();
                if CONDITIONAL_ATTRIBUTES.contains(&name.as_str()) {
                    split_tuple(&source)
                        .map(|(condition, consequence)| {
                            AttributeValue::Tuple(condition.to_string(), consequence.to_string())
                        })
                        .unwrap_or(AttributeValue::Expression(source))
                } else {
                    AttributeValue::Expression(source)
                }
            }
            NodeKind::Element | NodeKind::SelfClosingElement => {
                AttributeValue::Expression(value.text().trim().to_string())
            }
            _ => AttributeValue::String(strip_quotes(value.text().trim()).to_string()),
        },
    };

    Ok((name, value))
}

/// Removes one pair of wrapping quote, backtick or brace characters.
pub fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'' | '`')), Some(close)) if open == close => &text[1..text.len() - 1],
        (Some('{'), Some('}')) => &text[1..text.len() - 1],
        _ => text,
    }
}

/// Splits `(a, b)` into `a` and `b`.
///
/// The text must be wrapped in one pair of parentheses and contain exactly
/// one comma outside nested brackets and strings.
pub fn split_tuple(text: &str) -> Option<(&str, &str)> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;

    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut comma = None;

    for (i, c) in inner.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                // `(a)(b)` is a call, not a parenthesized pair.
                if depth < 0 {
                    return None;
                }
            }
            ',' if depth == 0 => {
                if comma.is_some() {
                    return None;
                }
                comma = Some(i);
            }
            _ => {}
        }
    }

    let comma = comma?;
    let (first, second) = (inner[..comma].trim(), inner[comma + 1..].trim());
    (!first.is_empty() && !second.is_empty()).then_some((first, second))
}

/// Removes the class attribute from `attributes` and splits it into tokens.
///
/// Only literal class strings are split. A dynamic class expression is
/// dropped with a warning.
pub fn take_class_tokens(attributes: &mut IndexMap<SmolStr, AttributeValue>) -> Vec<String> {
    let Some(name) = CLASS_ATTRIBUTES
        .iter()
        .find(|name| attributes.contains_key(**name))
    else {
        return Vec::new();
    };
    let Some(value) = attributes.shift_remove(*name) else {
        return Vec::new();
    };

    let classes = match &value {
        AttributeValue::String(classes) => classes.as_str(),
        AttributeValue::Expression(source) => match literal_class_string(source) {
            Some(classes) => classes,
            None => {
                log::warn!("dropping dynamic {name} expression: {source}");
                return Vec::new();
            }
        },
        AttributeValue::Flag | AttributeValue::Tuple(..) => return Vec::new(),
    };

    classes.split_whitespace().map(str::to_string).collect()
}

/// Returns the content of a plain quoted string expression.
fn literal_class_string(source: &str) -> Option<&str> {
    let source = source.trim();
    let stripped = strip_quotes(source);
    let quoted = stripped.len() + 2 == source.len() && !source.starts_with('{');
    let inner_quote = source.chars().next()?;
    (quoted && !stripped.contains("${") && !stripped.contains(inner_quote)).then_some(stripped)
}
