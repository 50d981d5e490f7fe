//! Configuration loading
//!
//! Reads `~/.config/cellsuggest/config.toml`. A missing file means defaults;
//! a malformed one means defaults plus a warning for the caller to show.

mod types;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use types::{CellSettings, Config};

use crate::error::SuggestError;

const CONFIG_DIR: &str = "cellsuggest";
const CONFIG_FILE: &str = "config.toml";

/// Result of loading the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the configuration from the default location
pub fn load_config() -> ConfigResult {
    let Some(path) = config_path() else {
        return ConfigResult::default();
    };

    load_config_or_default(&path)
}

/// Load the configuration from `path`, turning errors into a warning
pub fn load_config_or_default(path: &Path) -> ConfigResult {
    match load_config_from_path(path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::debug!("Falling back to default config: {}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("{} ({})", e, path.display())),
            }
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, SuggestError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(e.into()),
    };

    parse_config(&contents)
}

pub fn parse_config(content: &str) -> Result<Config, SuggestError> {
    toml::from_str(content).map_err(|e| SuggestError::Config(e.message().to_string()))
}
