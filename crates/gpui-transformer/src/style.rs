//! Utility class classification.
//!
//! Each class token maps to exactly one builder call fragment, such as
//! `.flex()`, `.bg(rgb(0x1E1E2E))` or `.w(px(500.0))`. Rules are tried in
//! order and the first match wins:
//!
//! 1. Arbitrary values: `bg-[#fff]`, `w-[500px]`, `-mt-[4px]`
//! 2. The bare `border` token
//! 3. Palette and named colors: `text-slate-500`, `bg-white`
//! 4. Everything else, normalized to a zero-argument call

use crate::config::{TransformConfig, UnknownTokenPolicy};

/// Prefixes that take a color, longest first.
const COLOR_PREFIXES: &[&str] = &[
    "border-t", "border-b", "border-l", "border-r", "border-x", "border-y", "border", "bg", "text",
];

/// Named colors and the constructor each one emits.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("white", "white()"),
    ("black", "black()"),
    ("transparent", "transparent_black()"),
    ("red", "red()"),
    ("green", "green()"),
    ("blue", "blue()"),
    ("yellow", "yellow()"),
];

/// Trailing segments that carry a value rather than naming a utility.
const VALUE_SEGMENTS: &[&str] = &["px", "full", "auto", "screen"];

/// Classifies one class token into a builder call fragment.
pub fn classify(token: &str, config: &TransformConfig) -> String {
    if let Some(call) = classify_arbitrary(token) {
        return call;
    }
    if token == "border" {
        return ".border_1()".to_string();
    }
    if let Some(call) = classify_color(token, config) {
        return call;
    }
    classify_generic(token, config)
}

/// Returns the method a color prefix maps to.
fn color_method(prefix: &str) -> String {
    match prefix {
        "text" => "text_color".to_string(),
        "bg" => "bg".to_string(),
        "border" => "border_color".to_string(),
        other => other.replace('-', "_"),
    }
}

fn length_method(prefix: &str) -> String {
    match prefix {
        "text" => "text_size".to_string(),
        other => other.replace('-', "_"),
    }
}

/// Rule 1: `<prefix>-[<value>]`.
fn classify_arbitrary(token: &str) -> Option<String> {
    let body = token.strip_suffix(']')?;
    let (prefix, value) = body.split_once("-[")?;
    let (negative, prefix) = match prefix.strip_prefix('-') {
        Some(prefix) => (true, prefix),
        None => (false, prefix),
    };
    if prefix.is_empty() {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        let hex = expand_hex(hex)?;
        return Some(format!(".{}(rgb(0x{hex}))", color_method(prefix)));
    }

    let amount = parse_length(value.strip_suffix("px")?)?;
    let amount = if negative { -amount } else { amount };
    Some(format!(
        ".{}(px({}))",
        length_method(prefix),
        format_length(amount)
    ))
}

/// Parses a plain decimal like `12` or `12.5`.
fn parse_length(digits: &str) -> Option<f64> {
    let valid = digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !valid {
        return None;
    }
    digits.parse().ok()
}

/// Expands `fff` or `ffffff` to uppercase six-digit form.
fn expand_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => Some(
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        6 => Some(hex.to_ascii_uppercase()),
        _ => None,
    }
}

/// Formats a length with at least one decimal place.
fn format_length(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        format!("{amount}")
    }
}

/// Rule 3: palette and named colors.
fn classify_color(token: &str, config: &TransformConfig) -> Option<String> {
    let (prefix, value) = COLOR_PREFIXES.iter().find_map(|prefix| {
        let value = token.strip_prefix(prefix)?.strip_prefix('-')?;
        (!value.is_empty()).then_some((*prefix, value))
    })?;

    let method = color_method(prefix);
    if let Some(code) = config.palette.get(&value.replace('-', "_")) {
        return Some(format!(".{method}(rgb(0x{}))", code.to_ascii_uppercase()));
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, constructor)| format!(".{method}({constructor})"))
}

/// Rule 4: normalization with unknown-token handling.
fn classify_generic(token: &str, config: &TransformConfig) -> String {
    let (negated, body) = match token.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, token),
    };

    let name = if negated {
        match body.split_once('-') {
            Some((first, rest)) => format!("{first}_neg_{rest}"),
            None => format!("{body}_neg"),
        }
    } else {
        body.to_string()
    };
    let name = name.replace('/', "_").replace('.', "p").replace('-', "_");

    if !is_identifier(&name) {
        log::debug!("class '{token}' does not map to a method name");
        return unknown_marker(token);
    }

    let known = match name.strip_prefix("text_") {
        Some(size) => config.is_text_size(size) || in_vocabulary(body, config),
        None => in_vocabulary(body, config),
    };
    if known {
        return format!(".{name}()");
    }

    log::debug!("unknown class '{token}'");
    match config.unknown_tokens {
        UnknownTokenPolicy::Emit => format!(".{name}()"),
        UnknownTokenPolicy::Mark => unknown_marker(token),
    }
}

/// Returns true if `token` or its utility root is in the vocabulary.
fn in_vocabulary(token: &str, config: &TransformConfig) -> bool {
    if config.vocabulary.contains(token) {
        return true;
    }
    token
        .rsplit_once('-')
        .filter(|(_, last)| is_value_segment(last))
        .is_some_and(|(root, _)| config.vocabulary.contains(root))
}

fn is_value_segment(segment: &str) -> bool {
    if VALUE_SEGMENTS.contains(&segment) {
        return true;
    }
    if let Some((numerator, denominator)) = segment.split_once('/') {
        return is_digits(numerator) && is_digits(denominator);
    }
    !segment.is_empty()
        && segment.chars().all(|c| c.is_ascii_digit() || c == '.')
        && segment.parse::<f64>().is_ok()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unknown_marker(token: &str) -> String {
    format!("/* unknown class: {} */", token.replace("*/", "* /"))
}
