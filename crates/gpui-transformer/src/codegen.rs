//! Rendering of UI trees into builder-call chains.

use crate::attributes::{attribute_calls, default_style_calls, identity_call};
use crate::config::TransformConfig;
use crate::ir::{ElementNode, ExpressionNode, UiNode};
use crate::session::Session;
use crate::style::classify;
use jsx_parser::scan;
use std::iter::Peekable;
use std::str::Chars;

const INDENT: &str = "    ";

/// Renders UI trees for one file.
pub struct CodeGenerator<'a> {
    config: &'a TransformConfig,
    session: &'a mut Session,
}

impl<'a> CodeGenerator<'a> {
    /// Creates a generator that draws ids from `session`.
    pub fn new(config: &'a TransformConfig, session: &'a mut Session) -> Self {
        Self { config, session }
    }

    /// Renders any UI node.
    pub fn render(&mut self, node: &UiNode, depth: usize) -> String {
        match node {
            UiNode::Element(element) => self.render_element(element, depth),
            UiNode::Text(text) => format!("{text:?}"),
            UiNode::Expression(expression) => render_expression(expression),
        }
    }

    /// Renders an element and its subtree.
    ///
    /// Calls come in a fixed order: id, default styles, classes, attributes,
    /// then children. Each call sits on its own line, indented one level
    /// deeper than `depth`.
    pub fn render_element(&mut self, element: &ElementNode, depth: usize) -> String {
        let mut calls = Vec::new();
        calls.extend(identity_call(element, self.config, self.session));
        calls.extend(default_style_calls(element, self.config));
        calls.extend(
            element
                .classes
                .iter()
                .map(|token| classify(token, self.config)),
        );
        calls.extend(attribute_calls(element, self.config));
        self.push_child_calls(&element.children, depth, &mut calls);

        let indent = INDENT.repeat(depth + 1);
        let mut out = format!("{}()", element.tag);
        for call in calls {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(&call);
        }
        out
    }

    /// Adds `.child`/`.children` calls.
    ///
    /// Consecutive text and expression children are merged into one
    /// `.children([…])` call; an element child always gets its own `.child`.
    fn push_child_calls(&mut self, children: &[UiNode], depth: usize, calls: &mut Vec<String>) {
        let mut run = Vec::new();
        for child in children {
            match child {
                UiNode::Element(element) => {
                    flush_run(&mut run, calls);
                    let rendered = self.render_element(element, depth + 1);
                    calls.push(format!(".child({rendered})"));
                }
                inline => run.push(self.render(inline, depth + 1)),
            }
        }
        flush_run(&mut run, calls);
    }
}

fn flush_run(run: &mut Vec<String>, calls: &mut Vec<String>) {
    match std::mem::take(run).as_slice() {
        [] => {}
        [single] => calls.push(format!(".child({single})")),
        items => calls.push(format!(".children([{}])", items.join(", "))),
    }
}

/// Renders an expression child.
pub fn render_expression(expression: &ExpressionNode) -> String {
    if expression.is_template {
        render_template(&expression.source)
    } else {
        expression.source.clone()
    }
}

/// Renders a template literal as a `format!` call.
///
/// `` `Hello ${name}` `` becomes `format!("Hello {}", &name)`.
fn render_template(source: &str) -> String {
    let body = source
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
        .unwrap_or(source);

    let mut pattern = String::new();
    let mut args = Vec::new();
    let mut rest = body;
    while let Some(start) = find_interpolation(rest) {
        push_literal(&mut pattern, &rest[..start]);
        let after = &rest[start + 2..];
        let end = scan::closing_brace(after, 0).unwrap_or(after.len());
        args.push(after[..end].trim());
        pattern.push_str("{}");
        rest = after.get(end + 1..).unwrap_or("");
    }
    push_literal(&mut pattern, rest);

    let mut out = format!("format!(\"{pattern}\"");
    for arg in args {
        out.push_str(", &");
        out.push_str(arg);
    }
    out.push(')');
    out
}

/// Appends template text to a `format!` pattern, escaping as needed.
fn push_literal(pattern: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => push_escape(pattern, &mut chars),
            c => push_char(pattern, c),
        }
    }
}

fn push_char(pattern: &mut String, c: char) {
    match c {
        '{' => pattern.push_str("{{"),
        '}' => pattern.push_str("}}"),
        '"' => pattern.push_str("\\\""),
        '\n' => pattern.push_str("\\n"),
        '\r' => pattern.push_str("\\r"),
        c => pattern.push(c),
    }
}

/// Rewrites the escape sequence after a backslash as a Rust string escape.
fn push_escape(pattern: &mut String, chars: &mut Peekable<Chars<'_>>) {
    let Some(c) = chars.next() else {
        pattern.push_str("\\\\");
        return;
    };
    match c {
        'n' | 'r' | 't' | '0' | '\\' | '\'' | '"' => {
            pattern.push('\\');
            pattern.push(c);
        }
        'b' => pattern.push_str("\\u{8}"),
        'f' => pattern.push_str("\\u{c}"),
        'v' => pattern.push_str("\\u{b}"),
        'u' | 'x' => push_code_point(pattern, c, chars),
        // Line continuation.
        '\n' => {}
        '\r' => {
            chars.next_if_eq(&'\n');
        }
        other => push_char(pattern, other),
    }
}

/// Handles `\xHH`, `\uHHHH` and `\u{H…}`.
fn push_code_point(pattern: &mut String, kind: char, chars: &mut Peekable<Chars<'_>>) {
    let braced = kind == 'u' && chars.next_if_eq(&'{').is_some();
    let width = if kind == 'u' { 4 } else { 2 };
    let mut digits = String::new();
    if braced {
        while let Some(d) = chars.next_if(|d| *d != '}') {
            digits.push(d);
        }
    } else {
        while digits.len() < width {
            match chars.next_if(char::is_ascii_hexdigit) {
                Some(d) => digits.push(d),
                None => break,
            }
        }
    }
    let closed = !braced || chars.next_if_eq(&'}').is_some();

    let valid = closed
        && !digits.is_empty()
        && if braced { digits.len() <= 6 } else { digits.len() == width }
        && u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .is_some();
    if valid {
        pattern.push_str(&format!("\\u{{{digits}}}"));
        return;
    }

    // Not a usable code point: keep the characters as plain text.
    push_char(pattern, kind);
    if braced {
        push_char(pattern, '{');
    }
    digits.chars().for_each(|d| push_char(pattern, d));
    if braced && closed {
        push_char(pattern, '}');
    }
}

/// Returns the offset of the first unescaped `${`.
fn find_interpolation(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' if chars.peek().is_some_and(|(_, next)| *next == '{') => return Some(i),
            _ => {}
        }
    }
    None
}
