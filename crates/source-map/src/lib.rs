//! Source position tracking and text edits for gpui-codemod.
//!
//! This crate provides spans and line/column lookup for reporting locations in
//! markup sources, and the edit type used to splice generated builder code back
//! into the original buffer.

mod edit;
mod line_index;
mod span;

pub use edit::{apply_edits, AppliedEdits, Edit};
pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
