//! Main orchestration logic.

use crate::cli::{Args, Destination, OutputFormat};
use crate::config::{self, ConfigError};
use crate::output::{FileReport, Formatter, RunSummary};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use gpui_transformer::{transform, TransformConfig};
use miette::Diagnostic;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use thiserror::Error;
use walkdir::WalkDir;

const DEFAULT_IGNORES: [&str; 3] = ["**/node_modules/**", "**/dist/**", "**/target/**"];

/// Orchestration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum CodemodError {
    /// An ignore pattern is not a valid glob.
    #[error("invalid glob pattern: {0}")]
    #[diagnostic(code(gpui_codemod::invalid_glob))]
    InvalidGlob(String),

    /// The config file could not be loaded.
    #[error(transparent)]
    #[diagnostic(
        code(gpui_codemod::config),
        help("check gpui-codemod.json against the documented keys")
    )]
    Config(#[from] ConfigError),

    /// The workspace could not be resolved.
    #[error("invalid workspace {path}: {reason}")]
    #[diagnostic(code(gpui_codemod::workspace))]
    Workspace {
        /// The requested workspace.
        path: Utf8PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// Transforms every matching file under the workspace.
pub fn run(args: &Args) -> Result<RunSummary, CodemodError> {
    let workspace = absolute(&args.workspace)?;
    if !workspace.is_dir() {
        return Err(CodemodError::Workspace {
            path: args.workspace.clone(),
            reason: "not a directory".to_string(),
        });
    }

    let config = config::resolve(args, &workspace)?;
    let destination = match args.destination() {
        Destination::Directory(dir) => Destination::Directory(absolute(&dir)?),
        other => other,
    };
    let ignore_set = build_ignore_set(&args.ignore)?;
    let files = discover(args, &workspace, &ignore_set, &destination);
    log::debug!("found {} files under {workspace}", files.len());

    let print_code = destination == Destination::Stdout;
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| process_file(path, &workspace, &config, &destination, args.output))
        .collect();

    let summary = RunSummary::from_reports(&reports);
    let formatter = Formatter::new(args.output);
    match args.output {
        OutputFormat::Json => println!("{}", formatter.format(&reports, summary)),
        OutputFormat::Human => {
            if print_code {
                let stdout = std::io::stdout();
                let mut stdout = stdout.lock();
                for report in &reports {
                    if let Some(code) = &report.code {
                        let _ = writeln!(stdout, "=== {} ===\n{}", report.path, code);
                    }
                }
            }
            eprint!("{}", formatter.format(&reports, summary));
        }
    }

    Ok(summary)
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, CodemodError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let invalid = |reason: String| CodemodError::Workspace {
        path: path.to_path_buf(),
        reason,
    };
    let cwd = std::env::current_dir().map_err(|e| invalid(e.to_string()))?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| invalid(e.to_string()))?;
    Ok(cwd.join(path))
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, CodemodError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.iter().map(String::as_str).chain(DEFAULT_IGNORES) {
        let glob = Glob::new(pattern).map_err(|e| CodemodError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| CodemodError::InvalidGlob(e.to_string()))
}

/// Lists matching files in a stable order.
fn discover(
    args: &Args,
    workspace: &Utf8Path,
    ignore_set: &GlobSet,
    destination: &Destination,
) -> Vec<Utf8PathBuf> {
    let out_dir = match destination {
        Destination::Directory(dir) => Some(dir.as_path()),
        _ => None,
    };

    let mut files: Vec<Utf8PathBuf> = WalkDir::new(workspace)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        .filter(|p| args.matches_extension(p.file_name().unwrap_or("")))
        .filter(|p| out_dir.map_or(true, |dir| !p.starts_with(dir)))
        .filter(|p| !ignore_set.is_match(relative(p, workspace).as_str()))
        .collect();
    files.sort();
    files
}

fn relative<'a>(path: &'a Utf8Path, workspace: &Utf8Path) -> &'a Utf8Path {
    path.strip_prefix(workspace).unwrap_or(path)
}

/// Reads, transforms and writes one file with its own session.
fn process_file(
    path: &Utf8Path,
    workspace: &Utf8Path,
    config: &TransformConfig,
    destination: &Destination,
    format: OutputFormat,
) -> FileReport {
    let relative_path = relative(path, workspace).to_path_buf();

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            log::warn!("failed to read {path}: {e}");
            return FileReport::failed(relative_path, format!("failed to read: {e}"));
        }
    };

    let result = transform(&source, config);
    for error in &result.errors {
        log::warn!("{relative_path}: skipped unit: {error}");
    }
    log::debug!("{relative_path}: rewrote {} units", result.units);

    let mut report = FileReport::from_result(relative_path.clone(), &source, &result);
    let written = match destination {
        Destination::Stdout => {
            if result.is_changed() || format == OutputFormat::Json {
                report.code = Some(result.code);
            }
            Ok(())
        }
        Destination::InPlace if result.is_changed() => fs::write(path, &result.code),
        Destination::InPlace => Ok(()),
        Destination::Directory(dir) => {
            let target = dir.join(&relative_path);
            target
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| fs::write(&target, &result.code))
        }
    };

    if let Err(e) = written {
        log::warn!("failed to write {relative_path}: {e}");
        report.failure = Some(format!("failed to write: {e}"));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_relative_workspace() {
        let workspace = absolute(Utf8Path::new("src")).unwrap();
        assert!(workspace.is_absolute());
        assert!(workspace.ends_with("src"));
    }

    #[test]
    fn test_default_ignores() {
        let set = build_ignore_set(&[]).unwrap();
        assert!(set.is_match("web/node_modules/react/index.jsx"));
        assert!(set.is_match("target/debug/out.tsx"));
        assert!(!set.is_match("src/App.tsx"));
    }

    #[test]
    fn test_invalid_glob() {
        let result = build_ignore_set(&["src/[".to_string()]);
        assert!(matches!(result, Err(CodemodError::InvalidGlob(_))));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        for file in ["b.tsx", "a.jsx", "c.ts", "vendor/x.tsx", "node_modules/y.tsx"] {
            let path = workspace.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }

        let args = Args::parse_from(["gpui-codemod", "--ignore", "vendor/**"]);
        let set = build_ignore_set(&args.ignore).unwrap();
        let files: Vec<String> = discover(&args, &workspace, &set, &Destination::Stdout)
            .iter()
            .map(|p| relative(p, &workspace).to_string())
            .collect();
        assert_eq!(files, vec!["a.jsx", "b.tsx"]);
    }
}
