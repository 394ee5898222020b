//! Read-only tables that drive the transformation.

use crate::palette::default_palette;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// What to emit for a class token the vocabulary does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTokenPolicy {
    /// Emit the best-effort zero-argument call.
    #[default]
    Emit,
    /// Emit a `/* unknown class: … */` marker instead of a call.
    Mark,
}

impl std::str::FromStr for UnknownTokenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emit" => Ok(Self::Emit),
            "mark" => Ok(Self::Mark),
            other => Err(format!(
                "unknown token policy '{other}', expected 'emit' or 'mark'"
            )),
        }
    }
}

/// Configuration for a transformation.
///
/// Shared read-only between files; per-file state lives in
/// [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformConfig {
    /// Palette colors keyed `<family>_<shade>`, values are hex without `#`.
    pub palette: FxHashMap<String, String>,
    /// Attribute name to builder method name.
    pub attribute_names: FxHashMap<String, String>,
    /// Original tag name to the class string applied by `useDefaults`.
    pub default_styles: FxHashMap<String, String>,
    /// Valid suffixes for `text-<size>`.
    pub text_sizes: FxHashSet<String>,
    /// Known utility classes and utility roots (`gap` covers `gap-2`).
    pub vocabulary: FxHashSet<String>,
    /// Handling of tokens outside the vocabulary.
    pub unknown_tokens: UnknownTokenPolicy,
    /// Prefix for synthesized element ids.
    pub id_prefix: String,
    /// Crate named in the generated `use` line.
    pub import_crate: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            attribute_names: pairs(ATTRIBUTE_NAMES),
            default_styles: pairs(DEFAULT_STYLES),
            text_sizes: set(TEXT_SIZES),
            vocabulary: set(VOCABULARY),
            unknown_tokens: UnknownTokenPolicy::Emit,
            id_prefix: "el".to_string(),
            import_crate: "gpui".to_string(),
        }
    }
}

impl TransformConfig {
    /// Returns the builder method for an attribute name.
    pub fn method_for_attribute<'a>(&'a self, name: &'a str) -> &'a str {
        self.attribute_names
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Returns true if `size` is a valid `text-<size>` suffix.
    pub fn is_text_size(&self, size: &str) -> bool {
        if self.text_sizes.contains(size) {
            return true;
        }
        size.strip_suffix("xl").is_some_and(|digits| {
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        })
    }
}

fn pairs(table: &[(&str, &str)]) -> FxHashMap<String, String> {
    table
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn set(items: &[&str]) -> FxHashSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

const ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    ("onClick", "on_click"),
    ("onMouseDown", "on_mouse_down"),
    ("onMouseUp", "on_mouse_up"),
    ("onMouseMove", "on_mouse_move"),
    ("onHover", "on_hover"),
    ("onKeyDown", "on_key_down"),
    ("onKeyUp", "on_key_up"),
    ("onScroll", "on_scroll_wheel"),
    ("onDrag", "on_drag"),
    ("onDrop", "on_drop"),
    ("tabIndex", "tab_index"),
];

const DEFAULT_STYLES: &[(&str, &str)] = &[
    ("button", "px-4 py-2 rounded-md cursor-pointer"),
    ("input", "px-2 py-1 border rounded-md"),
    ("h1", "text-3xl font-bold"),
    ("h2", "text-2xl font-bold"),
    ("h3", "text-xl font-semibold"),
    ("p", "text-base"),
    ("a", "text-blue-500 cursor-pointer"),
];

const TEXT_SIZES: &[&str] = &["xs", "sm", "base", "lg", "xl"];

#[rustfmt::skip]
const VOCABULARY: &[&str] = &[
    // Layout
    "flex", "flex-row", "flex-col", "flex-row-reverse", "flex-col-reverse",
    "flex-wrap", "flex-wrap-reverse", "flex-nowrap", "flex-1", "flex-auto",
    "flex-initial", "flex-none", "flex-grow", "flex-shrink", "flex-shrink-0",
    "grid", "grid-cols", "grid-rows", "col-span", "row-span",
    "block", "hidden", "visible", "invisible", "absolute", "relative",
    "items-start", "items-center", "items-end", "items-baseline",
    "justify-start", "justify-center", "justify-end", "justify-between", "justify-around",
    "content-start", "content-center", "content-end", "content-between", "content-around", "content-stretch",
    "self-start", "self-center", "self-end", "self-stretch",
    "overflow-hidden", "overflow-x-hidden", "overflow-y-hidden",
    "overflow-scroll", "overflow-x-scroll", "overflow-y-scroll",
    // Spacing and sizing
    "gap", "gap-x", "gap-y",
    "p", "px", "py", "pt", "pb", "pl", "pr",
    "m", "mx", "my", "mt", "mb", "ml", "mr",
    "w", "h", "size", "min-w", "min-h", "max-w", "max-h",
    "inset", "top", "bottom", "left", "right",
    // Borders and effects
    "border", "border-t", "border-b", "border-l", "border-r", "border-x", "border-y",
    "border-dashed", "rounded", "rounded-none", "rounded-xs", "rounded-sm", "rounded-md",
    "rounded-lg", "rounded-xl", "rounded-2xl", "rounded-3xl", "rounded-full",
    "rounded-t", "rounded-b", "rounded-l", "rounded-r",
    "rounded-tl", "rounded-tr", "rounded-bl", "rounded-br",
    "shadow", "shadow-none", "shadow-xs", "shadow-sm", "shadow-md", "shadow-lg", "shadow-xl", "shadow-2xl",
    "opacity",
    // Typography
    "font-thin", "font-light", "font-normal", "font-medium", "font-semibold", "font-bold",
    "font-extrabold", "font-black", "italic", "not-italic", "underline", "line-through",
    "truncate", "text-ellipsis", "whitespace-normal", "whitespace-nowrap",
    "text-left", "text-center", "text-right", "leading",
    // Interaction
    "cursor-default", "cursor-pointer", "cursor-text", "cursor-move", "cursor-not-allowed",
    "cursor-grab", "cursor-grabbing", "cursor-col-resize", "cursor-row-resize",
];
