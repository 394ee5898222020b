//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use gpui_transformer::UnknownTokenPolicy;

/// Rewrite JSX markup into GPUI builder calls.
#[derive(Debug, Parser)]
#[command(name = "gpui-codemod")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory to search for source files
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// File extensions to transform (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "tsx,jsx")]
    pub extensions: Vec<String>,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Rewrite files in place
    #[arg(long, conflicts_with = "out_dir")]
    pub write: bool,

    /// Write transformed files under this directory, mirroring the workspace layout
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Path to a gpui-codemod.json config file
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// How to handle unknown utility classes (emit or mark)
    #[arg(long = "unknown-tokens")]
    pub unknown_tokens: Option<UnknownTokenPolicy>,

    /// Prefix for synthesized element ids
    #[arg(long = "id-prefix")]
    pub id_prefix: Option<String>,

    /// Log each transformed unit
    #[arg(long, short)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}

/// Where transformed code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Print to stdout.
    Stdout,
    /// Overwrite the source file.
    InPlace,
    /// Write under a separate root.
    Directory(Utf8PathBuf),
}

impl Args {
    /// Returns where transformed code should be written.
    pub fn destination(&self) -> Destination {
        match (&self.out_dir, self.write) {
            (Some(dir), _) => Destination::Directory(dir.clone()),
            (None, true) => Destination::InPlace,
            (None, false) => Destination::Stdout,
        }
    }

    /// Returns true if `file_name` has one of the configured extensions.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            let ext = ext.trim().trim_start_matches('.');
            !ext.is_empty()
                && file_name
                    .strip_suffix(ext)
                    .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}
