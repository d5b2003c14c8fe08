use config::{Config, ConfigError, File};
use extractors::{ReminderConfig, ScoringConfig, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub reminders: ReminderConfig,
    pub search: SearchConfig,
}

const DEFAULT_CONFIG: &str = r#"
[scoring]
# Multipliers applied to the resolver's confidence by where the date was found
title_weight = 0.8
comment_weight = 0.6
# A comment replaces the current date when it beats current confidence * this
comment_override_factor = 0.65
# Comments are only read when the best confidence so far is below this
comment_recheck_below = 0.7
max_comments = 5
# Below this a web search is offered instead
low_confidence_threshold = 0.65

[reminders]
# Popup reminders in minutes before the release day (24h and 9h)
offsets_minutes = [1440, 540]

[search]
base_url = "https://www.google.com/search"
max_title_len = 60
"#;

impl AppConfig {
    /// Loads `path`, or the per-user config file when `None`.
    ///
    /// A missing file is created with the commented defaults first.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: AppConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("release-reminder").join("config.toml")
    } else {
        PathBuf::from("release-reminder.toml")
    }
}
