//! Main transformation logic.

use crate::adapter::JsxTree;
use crate::codegen::CodeGenerator;
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::ir::build_element;
use crate::query::{MarkupNode, MarkupTree};
use crate::session::Session;
use crate::walker::top_level_units;
use source_map::Span;

/// The result of transforming one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformResult {
    /// The rewritten source, or the input unchanged if nothing was rewritten.
    pub code: String,
    /// Number of markup units that were rewritten.
    pub units: usize,
    /// Constructors named in the import line, in first-use order.
    pub used_tags: Vec<String>,
    /// Units that were left as they were, and why.
    pub errors: Vec<TransformError>,
}

impl TransformResult {
    fn unchanged(source: &str, errors: Vec<TransformError>) -> Self {
        Self {
            code: source.to_string(),
            units: 0,
            used_tags: Vec::new(),
            errors,
        }
    }

    /// Returns true if any unit was rewritten.
    pub fn is_changed(&self) -> bool {
        self.units > 0
    }
}

/// Parses and transforms a `.tsx`/`.jsx` source file.
///
/// Units containing syntax errors are skipped; the rest of the file is still
/// transformed.
pub fn transform(source: &str, config: &TransformConfig) -> TransformResult {
    let parsed = jsx_parser::parse(source);
    let syntax_errors: Vec<(Span, String)> = parsed
        .errors
        .iter()
        .map(|error| (error.span, error.to_string()))
        .collect();
    transform_units(&JsxTree::new(&parsed.document), config, &syntax_errors)
}

/// Transforms an already parsed markup tree.
pub fn transform_tree<T: MarkupTree>(tree: &T, config: &TransformConfig) -> TransformResult {
    transform_units(tree, config, &[])
}

fn transform_units<T: MarkupTree>(
    tree: &T,
    config: &TransformConfig,
    syntax_errors: &[(Span, String)],
) -> TransformResult {
    let mut session = Session::new();
    let mut edits = Vec::new();
    let mut errors = Vec::new();

    for unit in top_level_units(tree) {
        let span = unit.span();

        if let Some((_, message)) = syntax_errors
            .iter()
            .find(|(error_span, _)| span.contains_span(*error_span))
        {
            log::warn!("skipping markup at {span:?}: {message}");
            errors.push(TransformError::Syntax {
                message: message.clone(),
                span,
            });
            continue;
        }

        let mut tags = Vec::new();
        match build_element(&unit, &mut tags) {
            Ok(element) => {
                let code = CodeGenerator::new(config, &mut session).render_element(&element, 0);
                session.register_tags(tags);
                log::debug!("rewrote <{}> at {span:?}", element.original_tag);
                edits.push(unit.replace(code));
            }
            Err(error) => {
                log::warn!("skipping markup at {span:?}: {error}");
                errors.push(error);
            }
        }
    }

    if edits.is_empty() {
        return TransformResult::unchanged(tree.source(), errors);
    }

    let attempted = edits.len();
    let applied = tree.commit_edits(edits);
    for rejected in &applied.rejected {
        log::warn!("dropping overlapping replacement at {:?}", rejected.span);
        errors.push(TransformError::OverlappingEdit {
            span: rejected.span,
        });
    }

    let units = attempted - applied.rejected.len();
    if units == 0 {
        return TransformResult::unchanged(tree.source(), errors);
    }

    let used_tags: Vec<String> = session.used_tags().map(str::to_string).collect();
    let code = insert_import(&applied.text, &import_line(config, &used_tags));

    TransformResult {
        code,
        units,
        used_tags,
        errors,
    }
}

/// Builds `use gpui::{div, img, rgb, px};`.
fn import_line(config: &TransformConfig, used_tags: &[String]) -> String {
    let names: Vec<&str> = used_tags
        .iter()
        .map(String::as_str)
        .chain(["rgb", "px"])
        .collect();
    format!("use {}::{{{}}};", config.import_crate, names.join(", "))
}

/// Puts the import line first, after a leading `// @ts-nocheck` if present.
fn insert_import(code: &str, import: &str) -> String {
    let (bom, code) = match code.strip_prefix('\u{feff}') {
        Some(rest) => ("\u{feff}", rest),
        None => ("", code),
    };
    if let Some(first_line) = code
        .lines()
        .next()
        .filter(|line| line.trim_start().starts_with("// @ts-nocheck"))
    {
        let rest = &code[first_line.len()..];
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
        return format!("{bom}{first_line}\n{import}\n{rest}");
    }
    format!("{bom}{import}\n{code}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transform_empty() {
        let result = transform("", &TransformConfig::default());
        assert_eq!(result.code, "");
        assert!(!result.is_changed());
    }

    #[test]
    fn test_transform_without_markup_is_identity() {
        let source = "export const add = (a: number, b: number) => a + b;\n";
        let result = transform(source, &TransformConfig::default());
        assert_eq!(result.code, source);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_transform_simple_element() {
        let result = transform(
            "const a = <div className=\"flex\">Hi</div>;",
            &TransformConfig::default(),
        );
        assert_eq!(
            result.code,
            "use gpui::{div, rgb, px};\nconst a = div()\n    .flex()\n    .child(\"Hi\");"
        );
        assert_eq!(result.units, 1);
        assert_eq!(result.used_tags, vec!["div"]);
    }

    #[test]
    fn test_import_after_ts_nocheck() {
        assert_eq!(
            insert_import("// @ts-nocheck\nconst a = 1;", "use gpui::{div, rgb, px};"),
            "// @ts-nocheck\nuse gpui::{div, rgb, px};\nconst a = 1;"
        );
        assert_eq!(
            insert_import("// @ts-nocheck", "use x;"),
            "// @ts-nocheck\nuse x;\n"
        );
        assert_eq!(insert_import("const a = 1;", "use x;"), "use x;\nconst a = 1;");
    }

    #[test]
    fn test_import_keeps_byte_order_mark_first() {
        assert_eq!(
            insert_import("\u{feff}// @ts-nocheck\nconst a = 1;", "use x;"),
            "\u{feff}// @ts-nocheck\nuse x;\nconst a = 1;"
        );
        assert_eq!(
            insert_import("\u{feff}const a = 1;", "use x;"),
            "\u{feff}use x;\nconst a = 1;"
        );
    }

    #[test]
    fn test_import_line_uses_configured_crate() {
        let config = TransformConfig {
            import_crate: "ui".to_string(),
            ..TransformConfig::default()
        };
        assert_eq!(
            import_line(&config, &["div".to_string(), "img".to_string()]),
            "use ui::{div, img, rgb, px};"
        );
    }

    #[test]
    fn test_syntax_error_skips_only_that_unit() {
        let source = "const a = <div>ok</div>;\nconst b = <span>bad</p>;";
        let result = transform(source, &TransformConfig::default());
        assert_eq!(result.units, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], TransformError::Syntax { .. }));
        assert!(result.code.contains("const b = <span>bad</p>;"));
        assert!(result.code.contains("const a = div()\n    .child(\"ok\");"));
    }

    #[test]
    fn test_all_units_failing_leaves_input_unchanged() {
        let source = "const b = <span>bad</p>;";
        let result = transform(source, &TransformConfig::default());
        assert_eq!(result.code, source);
        assert_eq!(result.errors.len(), 1);
    }
}
