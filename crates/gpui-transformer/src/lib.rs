//! JSX to GPUI transformation.
//!
//! This crate rewrites JSX markup styled with utility classes into GPUI
//! fluent builder chains. It handles:
//! - Finding top-level markup units through the [`MarkupTree`] interface
//! - Building a normalized UI tree per unit
//! - Classifying utility classes into builder calls
//! - Mapping attributes, event handlers and element ids
//! - Rendering builder chains and committing them as source edits
//!
//! # Example
//!
//! ```
//! use gpui_transformer::{transform, TransformConfig};
//!
//! let source = r#"const title = <h1 className="text-2xl font-bold">Hello</h1>;"#;
//!
//! let result = transform(source, &TransformConfig::default());
//! assert_eq!(result.units, 1);
//! assert!(result.code.starts_with("use gpui::{div, rgb, px};"));
//! assert!(result.code.contains(".text_2xl()"));
//! ```

mod adapter;
mod attributes;
mod codegen;
mod config;
mod error;
mod extract;
mod ir;
mod palette;
mod query;
mod session;
mod style;
mod transform;
mod walker;

pub use adapter::{JsxNode, JsxTree};
pub use attributes::is_stateful;
pub use codegen::CodeGenerator;
pub use config::{TransformConfig, UnknownTokenPolicy};
pub use error::TransformError;
pub use ir::{build_element, AttributeValue, ElementNode, ExpressionNode, UiNode};
pub use palette::default_palette;
pub use query::{MarkupNode, MarkupTree, NodeKind};
pub use session::Session;
pub use style::classify;
pub use transform::{transform, transform_tree, TransformResult};
pub use walker::top_level_units;
