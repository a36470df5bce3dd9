//! Configuration for finrec.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\finrec\finrec\config.json`
//! - **macOS**: `~/Library/Application Support/finrec/finrec/config.json`
//! - **Linux**: `~/.local/share/finrec/finrec/config.json`
//!
//! A missing file is not an error: [`Config::read`] returns the defaults, and
//! fields missing from an existing file take their default values too.
//!
//! ```rust,no_run
//! use finrec::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.currency_symbol = "$".into();
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::civil_time::CivilZone;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default currency glyph (Philippine peso).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";

/// Report settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Glyph placed before every formatted amount.
    pub currency_symbol: String,

    /// Civil time zone used for every displayed date and time.
    pub time_zone: CivilZone,

    /// Directory exports are written to; the current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            time_zone: CivilZone::default(),
            output_dir: None,
        }
    }
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, returning the file path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(config_file_path)
    }

    /// Directory exports go to.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
