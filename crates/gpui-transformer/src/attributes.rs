//! Attribute to builder call mapping.

use crate::config::TransformConfig;
use crate::ir::{AttributeValue, ElementNode};
use crate::session::Session;
use crate::style::classify;

/// Attributes consumed by the transformer itself.
const RESERVED_ATTRIBUTES: &[&str] = &["id", "useDefaults"];

/// Attributes that need a stable element id in GPUI.
const STATEFUL_ATTRIBUTES: &[&str] = &[
    "hover",
    "active",
    "focus",
    "tooltip",
    "group",
    "trackFocus",
    "track_focus",
];

/// Returns true if the attribute makes the element stateful.
pub fn is_stateful(name: &str) -> bool {
    let handler = name
        .strip_prefix("on")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()));
    handler || name.starts_with("on_") || STATEFUL_ATTRIBUTES.contains(&name)
}

/// Returns the `.id(…)` call for an element, if it needs one.
///
/// An explicit `id` wins. Otherwise an id is synthesized for stateful
/// elements, consuming one number from the session.
pub fn identity_call(
    element: &ElementNode,
    config: &TransformConfig,
    session: &mut Session,
) -> Option<String> {
    match element.attributes.get("id") {
        Some(AttributeValue::String(id)) => return Some(format!(".id({id:?})")),
        Some(AttributeValue::Expression(id)) => return Some(format!(".id({id})")),
        _ => {}
    }

    if !element.attributes.keys().any(|name| is_stateful(name)) {
        return None;
    }

    let tag: String = element
        .original_tag
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    Some(format!(
        ".id(\"{}_{}_{}\")",
        config.id_prefix,
        tag,
        session.next_id()
    ))
}

/// Returns the calls for the tag's default style when `useDefaults` is set.
pub fn default_style_calls(element: &ElementNode, config: &TransformConfig) -> Vec<String> {
    if !element.attributes.contains_key("useDefaults") {
        return Vec::new();
    }
    config
        .default_styles
        .get(element.original_tag.as_str())
        .map(|style| {
            style
                .split_whitespace()
                .map(|token| classify(token, config))
                .collect()
        })
        .unwrap_or_default()
}

/// Returns one call per non-reserved attribute, in source order.
pub fn attribute_calls(element: &ElementNode, config: &TransformConfig) -> Vec<String> {
    element
        .attributes
        .iter()
        .filter(|(name, _)| !RESERVED_ATTRIBUTES.contains(&name.as_str()))
        .map(|(name, value)| attribute_call(name, value, config))
        .collect()
}

fn attribute_call(name: &str, value: &AttributeValue, config: &TransformConfig) -> String {
    match (name, value) {
        ("hidden", _) => ".visible(false)".to_string(),
        ("when", AttributeValue::Tuple(condition, consequence)) => {
            format!(".when({condition}, {consequence})")
        }
        ("whenSome", AttributeValue::Tuple(option, consequence)) => {
            format!(".when_some({option}, {consequence})")
        }
        _ => {
            let method = config.method_for_attribute(name);
            match value {
                AttributeValue::Flag => format!(".{method}()"),
                AttributeValue::String(text) => format!(".{method}({text:?})"),
                AttributeValue::Expression(source) => format!(".{method}({source})"),
                AttributeValue::Tuple(first, second) => format!(".{method}(({first}, {second}))"),
            }
        }
    }
}
