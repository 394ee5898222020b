//! Errors recorded for markup units that could not be transformed.

use source_map::Span;
use thiserror::Error;

/// Why a markup unit was left untouched.
///
/// These never abort a file: the unit keeps its original text and the
/// remaining units are still transformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The parser reported a problem inside the unit.
    #[error("markup contains a syntax error: {message}")]
    Syntax {
        /// The parser's message.
        message: String,
        /// The unit that was skipped.
        span: Span,
    },

    /// A paired element has no opening tag among its children.
    #[error("element has no opening tag")]
    MissingOpeningElement {
        /// The element.
        span: Span,
    },

    /// An attribute node carries no name.
    #[error("attribute has no name")]
    MalformedAttribute {
        /// The attribute.
        span: Span,
    },

    /// The replacement collided with another unit's replacement.
    #[error("replacement overlaps another edit")]
    OverlappingEdit {
        /// The rejected replacement.
        span: Span,
    },
}

impl TransformError {
    /// Returns the source location this error refers to.
    pub fn span(&self) -> Span {
        match self {
            TransformError::Syntax { span, .. }
            | TransformError::MissingOpeningElement { span }
            | TransformError::MalformedAttribute { span }
            | TransformError::OverlappingEdit { span } => *span,
        }
    }
}
