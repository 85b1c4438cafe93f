//! Shell configuration.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults ([`DEFAULT_FILTERS`])
//! 2. the YAML file passed with `--config`, or `./pipefx.yaml` if it exists
//! 3. the `PIPEFX_FILTERS` environment variable
//! 4. the `--filters` flag
//!
//! ```yaml
//! load_filters: BlurFilter, RgbSplitFilter
//! output_dir: ./out
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filter list used when nothing else is configured.
pub const DEFAULT_FILTERS: &str = "BlurFilter, RgbSplitFilter";

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pipefx.yaml";

/// Environment variable overriding the filter list.
pub const FILTERS_ENV: &str = "PIPEFX_FILTERS";

/// Resolved shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comma-separated filter type names, loaded in order.
    #[serde(alias = "loadFilters")]
    pub load_filters: String,
    /// Directory for generated output names. `None` writes next to the input.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_filters: DEFAULT_FILTERS.to_string(),
            output_dir: None,
        }
    }
}

impl Config {
    /// Parses a YAML config file. Keys left out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses YAML text. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Builds the layered configuration.
    ///
    /// `file` is the `--config` argument; when absent, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is used if present. `env_filters` is the
    /// value of [`FILTERS_ENV`] and `flag_filters` the `--filters` argument.
    pub fn layered(
        file: Option<&Path>,
        env_filters: Option<String>,
        flag_filters: Option<String>,
    ) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(local)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(list) = env_filters.filter(|s| !s.trim().is_empty()) {
            debug!(source = FILTERS_ENV, "filter list overridden");
            config.load_filters = list;
        }
        if let Some(list) = flag_filters {
            debug!(source = "--filters", "filter list overridden");
            config.load_filters = list;
        }
        Ok(config)
    }
}
