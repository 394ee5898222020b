//! Text edits applied against an original source buffer.

use crate::Span;

/// A replacement of one span of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The span in the original source being replaced.
    pub span: Span,
    /// The text inserted in place of the span.
    pub replacement: String,
}

impl Edit {
    /// Creates a new edit.
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

/// The outcome of applying a set of edits.
#[derive(Debug, Clone, Default)]
pub struct AppliedEdits {
    /// The rewritten text.
    pub text: String,
    /// Edits that were dropped because they overlapped an earlier edit
    /// or fell outside the source.
    pub rejected: Vec<Edit>,
}

/// Applies non-overlapping edits to `source` in a single pass.
///
/// Edits are ordered by their start offset. An edit that overlaps one already
/// accepted is rejected rather than applied, so the output is always a
/// well-formed splice of the original.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> AppliedEdits {
    edits.sort_by_key(|e| (e.span.start, e.span.end));

    let mut text = String::with_capacity(source.len());
    let mut rejected = Vec::new();
    let mut cursor = 0usize;

    for edit in edits {
        let start = u32::from(edit.span.start) as usize;
        let end = u32::from(edit.span.end) as usize;

        if start < cursor
            || end > source.len()
            || !source.is_char_boundary(start)
            || !source.is_char_boundary(end)
        {
            rejected.push(edit);
            continue;
        }

        text.push_str(&source[cursor..start]);
        text.push_str(&edit.replacement);
        cursor = end;
    }

    text.push_str(&source[cursor..]);

    AppliedEdits { text, rejected }
}
