//! Configuration loading.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use gpui_transformer::{TransformConfig, UnknownTokenPolicy};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

/// Name of the config file looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "gpui-codemod.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The config file.
        path: Utf8PathBuf,
        /// The I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The config file.
        path: Utf8PathBuf,
        /// The JSON error.
        source: serde_json::Error,
    },
}

/// The contents of `gpui-codemod.json`.
///
/// Every field extends or overrides the built-in tables; nothing here
/// removes a default entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Extra palette colors, keyed like `brand-500` or `brand_500`.
    pub palette: HashMap<String, String>,
    /// Extra attribute name mappings.
    pub attribute_names: HashMap<String, String>,
    /// Extra or replacement default styles per tag.
    pub default_styles: HashMap<String, String>,
    /// Extra `text-<size>` suffixes.
    pub text_sizes: Vec<String>,
    /// Extra known utility classes or roots.
    pub vocabulary: Vec<String>,
    /// Unknown token policy.
    pub unknown_tokens: Option<UnknownTokenPolicy>,
    /// Prefix for synthesized ids.
    pub id_prefix: Option<String>,
    /// Crate named in the generated `use` line.
    pub import_crate: Option<String>,
}

impl ConfigFile {
    /// Loads the config file.
    ///
    /// An explicit path must exist. Without one, `gpui-codemod.json` in the
    /// workspace is used if present.
    pub fn load(workspace: &Utf8Path, explicit: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = workspace.join(CONFIG_FILE_NAME);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        log::debug!("loaded config from {path}");
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Applies this file on top of `config`.
    pub fn apply(self, config: &mut TransformConfig) {
        config.palette.extend(self.palette.into_iter().map(|(key, code)| {
            (
                key.replace('-', "_"),
                code.trim_start_matches('#').to_ascii_lowercase(),
            )
        }));
        config.attribute_names.extend(self.attribute_names);
        config.default_styles.extend(self.default_styles);
        config.text_sizes.extend(self.text_sizes);
        config.vocabulary.extend(self.vocabulary);
        if let Some(policy) = self.unknown_tokens {
            config.unknown_tokens = policy;
        }
        if let Some(prefix) = self.id_prefix {
            config.id_prefix = prefix;
        }
        if let Some(name) = self.import_crate {
            config.import_crate = name;
        }
    }
}

/// Builds the transform configuration: defaults, then the config file,
/// then command-line flags.
pub fn resolve(args: &Args, workspace: &Utf8Path) -> Result<TransformConfig, ConfigError> {
    let mut config = TransformConfig::default();
    ConfigFile::load(workspace, args.config.as_deref())?.apply(&mut config);

    if let Some(policy) = args.unknown_tokens {
        config.unknown_tokens = policy;
    }
    if let Some(prefix) = &args.id_prefix {
        config.id_prefix = prefix.clone();
    }
    Ok(config)
}
