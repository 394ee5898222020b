//! Report formatting.

use crate::cli::OutputFormat;
use camino::Utf8PathBuf;
use gpui_transformer::{TransformError, TransformResult};
use serde::Serialize;
use source_map::{LineCol, LineIndex};

/// A skipped unit, positioned for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedError {
    /// The error message.
    pub message: String,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

impl ReportedError {
    fn new(error: &TransformError, line_index: &LineIndex) -> Self {
        let start = error.span().start;
        let position = line_index.line_col(start).unwrap_or(LineCol::new(0, 0));
        Self {
            message: error.to_string(),
            line: position.line + 1,
            column: position.col + 1,
            offset: u32::from(start),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Path relative to the workspace.
    pub path: Utf8PathBuf,
    /// Whether any unit was rewritten.
    pub changed: bool,
    /// Number of rewritten units.
    pub units: usize,
    /// Constructors imported by the rewritten file.
    pub used_tags: Vec<String>,
    /// Units left untouched.
    pub errors: Vec<ReportedError>,
    /// The transformed text, when printing to stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Why the file could not be read or written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FileReport {
    /// Builds a report from a transformation of `source`.
    pub fn from_result(path: Utf8PathBuf, source: &str, result: &TransformResult) -> Self {
        let line_index = LineIndex::new(source);
        Self {
            path,
            changed: result.is_changed(),
            units: result.units,
            used_tags: result.used_tags.clone(),
            errors: result
                .errors
                .iter()
                .map(|error| ReportedError::new(error, &line_index))
                .collect(),
            code: None,
            failure: None,
        }
    }

    /// Builds a report for a file that could not be processed.
    pub fn failed(path: Utf8PathBuf, failure: impl Into<String>) -> Self {
        Self {
            path,
            failure: Some(failure.into()),
            ..Self::default()
        }
    }
}

/// Totals over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of files matched.
    pub file_count: usize,
    /// Number of files with at least one rewritten unit.
    pub changed_count: usize,
    /// Number of rewritten units.
    pub unit_count: usize,
    /// Number of units left untouched.
    pub skipped_count: usize,
    /// Number of files that could not be read or written.
    pub failed_count: usize,
}

impl RunSummary {
    /// Adds up the file reports.
    pub fn from_reports(reports: &[FileReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            summary.file_count += 1;
            summary.changed_count += usize::from(report.changed);
            summary.unit_count += report.units;
            summary.skipped_count += report.errors.len();
            summary.failed_count += usize::from(report.failure.is_some());
            summary
        })
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        let unit_word = if self.unit_count == 1 { "unit" } else { "units" };
        let file_word = if self.changed_count == 1 { "file" } else { "files" };

        let mut line = format!(
            "gpui-codemod rewrote {} {} in {} {} ({} scanned)",
            self.unit_count, unit_word, self.changed_count, file_word, self.file_count
        );
        if self.skipped_count > 0 {
            line.push_str(&format!(", skipped {}", self.skipped_count));
        }
        if self.failed_count > 0 {
            line.push_str(&format!(", {} failed", self.failed_count));
        }
        line
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [FileReport],
    summary: RunSummary,
}

/// Formats run reports.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the whole run.
    pub fn format(&self, reports: &[FileReport], summary: RunSummary) -> String {
        match self.format {
            OutputFormat::Human => {
                let mut output: String = reports.iter().map(Self::format_human).collect();
                output.push_str(&summary.format());
                output.push('\n');
                output
            }
            OutputFormat::Json => {
                let report = JsonReport {
                    files: reports,
                    summary,
                };
                serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }

    /// Formats the problems in one file, one `path:line:col` block per problem.
    fn format_human(report: &FileReport) -> String {
        let mut output = String::new();

        if let Some(failure) = &report.failure {
            output.push_str(&format!("{}\nError: {}\n\n", report.path, failure));
        }
        for error in &report.errors {
            output.push_str(&format!(
                "{}:{}:{}\nSkipped: {}\n\n",
                report.path, error.line, error.column, error.message
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use source_map::Span;

    fn sample_result() -> TransformResult {
        TransformResult {
            code: String::new(),
            units: 1,
            used_tags: vec!["div".to_string()],
            errors: vec![TransformError::Syntax {
                message: "unclosed tag: <span>".to_string(),
                span: Span::from_usize(12, 18),
            }],
        }
    }

    #[test]
    fn test_error_positions_are_one_indexed() {
        let source = "const a = 1;\n<span>";
        let report = FileReport::from_result("App.tsx".into(), source, &sample_result());
        assert_eq!(
            report.errors,
            vec![ReportedError {
                message: "markup contains a syntax error: unclosed tag: <span>".to_string(),
                line: 1,
                column: 13,
                offset: 12,
            }]
        );
    }

    #[test]
    fn test_format_human() {
        let source = "const a = 1;\n<span>";
        let reports = vec![
            FileReport::from_result("App.tsx".into(), source, &sample_result()),
            FileReport::failed("Gone.tsx".into(), "permission denied"),
        ];
        let summary = RunSummary::from_reports(&reports);
        let output = Formatter::new(OutputFormat::Human).format(&reports, summary);

        assert!(output.contains("App.tsx:1:13\nSkipped: markup contains a syntax error"));
        assert!(output.contains("Gone.tsx\nError: permission denied"));
        assert!(output.ends_with(
            "gpui-codemod rewrote 1 unit in 1 file (2 scanned), skipped 1, 1 failed\n"
        ));
    }

    #[test]
    fn test_format_json() {
        let mut report = FileReport::from_result("App.tsx".into(), "<a/>", &TransformResult {
            code: "div()".to_string(),
            units: 1,
            used_tags: vec!["div".to_string()],
            errors: Vec::new(),
        });
        report.code = Some("div()".to_string());
        let reports = vec![report];
        let output =
            Formatter::new(OutputFormat::Json).format(&reports, RunSummary::from_reports(&reports));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["files"][0]["path"], "App.tsx");
        assert_eq!(value["files"][0]["usedTags"][0], "div");
        assert_eq!(value["files"][0]["code"], "div()");
        assert!(value["files"][0].get("failure").is_none());
        assert_eq!(value["summary"]["unitCount"], 1);
        assert_eq!(value["summary"]["failedCount"], 0);
    }

    #[test]
    fn test_summary_plurals() {
        let summary = RunSummary {
            file_count: 5,
            changed_count: 2,
            unit_count: 3,
            skipped_count: 0,
            failed_count: 0,
        };
        assert_eq!(
            summary.format(),
            "gpui-codemod rewrote 3 units in 2 files (5 scanned)"
        );
    }
}
