use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default template written by `xtbctl init`
pub const DEFAULT_CONFIG: &str = r#"# xtb module loader configuration

[module]
name = "Xtb"
# Artifact stem if it differs from the module name, e.g. "xtb" for xtb.module.so
# file_stem = "xtb"

[search]
# Second candidate directory: this many levels above the bindings directory
ascend_levels = 3
# Searched after the two default locations; "~" and $VARS are expanded
extra_dirs = []
# Directory treated as the bindings location instead of the running executable's
# anchor = "/opt/scine/lib"
"#;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LoaderConfig {
    #[serde(default)]
    pub module: ModuleConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModuleConfig {
    #[serde(default = "default_module_name")]
    pub name: String,

    #[serde(default)]
    pub file_stem: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_ascend_levels")]
    pub ascend_levels: usize,

    #[serde(default)]
    pub extra_dirs: Vec<String>,

    #[serde(default)]
    pub anchor: Option<String>,
}

fn default_module_name() -> String {
    "Xtb".to_string()
}

fn default_ascend_levels() -> usize {
    3
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: default_module_name(),
            file_stem: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ascend_levels: default_ascend_levels(),
            extra_dirs: Vec::new(),
            anchor: None,
        }
    }
}

impl ModuleConfig {
    /// Stem used to build the artifact filename
    pub fn stem(&self) -> &str {
        self.file_stem.as_deref().unwrap_or(&self.name)
    }
}

impl SearchConfig {
    /// Extra directories with `~` and environment variables expanded
    pub fn expanded_extra_dirs(&self) -> Result<Vec<PathBuf>> {
        self.extra_dirs.iter().map(|d| expand(d)).collect()
    }

    /// Configured anchor directory, expanded
    pub fn expanded_anchor(&self) -> Result<Option<PathBuf>> {
        self.anchor.as_deref().map(expand).transpose()
    }
}

fn expand(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Load config from file or use defaults
pub fn load_config(path: Option<&Path>) -> Result<LoaderConfig> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: LoaderConfig =
                toml::from_str(&content).context("Failed to parse TOML config")?;
            Ok(config)
        }
        None => Ok(LoaderConfig::default()),
    }
}
