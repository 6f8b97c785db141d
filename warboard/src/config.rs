use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to access config directory: {0}")]
    Io(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to serialize default config: {0}")]
    Serialize(toml::ser::Error),
}

/// User-tweakable settings, read from `settings.toml` in the config
/// directory and overridable via `WARBOARD_*` environment variables
#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// The match-history CSV export to analyze
    pub data_file: Option<PathBuf>,
    /// Matches before this date are dropped from the working dataset
    pub cutoff_date: NaiveDate,
    /// Optional model-stats JSON produced by the offline trainer
    pub model_stats_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            // Keep everything from the current game's lifecycle
            cutoff_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            model_stats_file: None,
        }
    }
}

impl Settings {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Self::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Warboard", "Warboard")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let mut settings_toml = config_dir;
        settings_toml.push("settings.toml");

        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        } else {
            // First run: write the defaults so there is a file to edit
            let defaults = toml::to_string_pretty(&Self::default())?;
            std::fs::write(&settings_toml, defaults)?;
        }

        settings = settings.merge(Env::prefixed("WARBOARD_"));

        settings.extract().map_err(Box::new).map_err(Into::into)
    }

    /// The cutoff as a timestamp (midnight on the cutoff date)
    pub fn cutoff(&self) -> NaiveDateTime {
        self.cutoff_date.and_hms_opt(0, 0, 0).unwrap_or_default()
    }
}
