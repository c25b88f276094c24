//! Settings for the transport boundary.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CasError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Questions longer than this are refused without being solved.
    pub max_input_chars: usize,
    /// Emit every step of a derivation at `info` level.
    pub log_steps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_input_chars: 512,
            log_steps: false,
        }
    }
}

impl Config {
    /// Read a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CasError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CasError::Config(e.to_string()))
    }
}
