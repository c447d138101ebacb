//! Configuration file support for gradle-dep-graph.
//!
//! Provides YAML-based configuration through `gradle-dep-graph.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shared::error::DepGraphError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "gradle-dep-graph.config.yml";

/// Top-level configuration file schema.
///
/// Every field is optional; command-line flags take precedence over
/// anything set here.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub root_name: Option<String>,
    pub root_version: Option<String>,
    pub package_manager: Option<String>,
    pub coordinate_map: Option<PathBuf>,
    pub hash_index: Option<PathBuf>,
    pub max_concurrency: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Makes relative `coordinate_map` and `hash_index` paths relative to
    /// `base_dir` (the directory holding the config file).
    fn resolve_paths(mut self, base_dir: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base_dir.join(path)
            } else {
                path
            }
        };
        self.coordinate_map = self.coordinate_map.map(resolve);
        self.hash_index = self.hash_index.map(resolve);
        self
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base_dir))
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_concurrency == Some(0) {
        return Err(DepGraphError::Validation {
            message: "max_concurrency must be at least 1".to_string(),
        }
        .into());
    }

    if let Some(root_name) = &config.root_name {
        if root_name.trim().is_empty() {
            return Err(DepGraphError::Validation {
                message: "root_name must not be empty".to_string(),
            }
            .into());
        }
    }

    if let Some(package_manager) = &config.package_manager {
        if package_manager.trim().is_empty() {
            return Err(DepGraphError::Validation {
                message: "package_manager must not be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
