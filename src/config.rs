//! TOML configuration for `ctx-scope`.
//!
//! Every section is optional. A missing file at the default location means
//! "use built-in defaults"; a file named explicitly with `--config` must
//! exist. Command-line flags are applied on top by the caller.

use anyhow::{bail, Context, Result};
use globset::Glob;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::OutputFormat;

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./ctx-scope.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub roots: RootsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RootsConfig {
    #[serde(default)]
    pub hub: Option<PathBuf>,
    #[serde(default = "default_local_root")]
    pub local: PathBuf,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            hub: None,
            local: default_local_root(),
        }
    }
}

fn default_local_root() -> PathBuf {
    PathBuf::from("./context")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Load configuration from `explicit`, or from [`DEFAULT_CONFIG_PATH`] when
/// present, or fall back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.is_file() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.scan.include_globs.is_empty() {
        bail!("scan.include_globs must not be empty");
    }

    for pattern in config
        .scan
        .include_globs
        .iter()
        .chain(config.scan.exclude_globs.iter())
    {
        Glob::new(pattern).with_context(|| format!("Invalid glob in [scan]: '{}'", pattern))?;
    }

    if config.roots.local.as_os_str().is_empty() {
        bail!("roots.local must not be empty");
    }

    Ok(())
}
