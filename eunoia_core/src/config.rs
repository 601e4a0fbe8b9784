//! Configuration file support for Eunoia.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/eunoia/config.toml`.

use crate::{CyclePolicy, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub cycle: CycleSettings,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Chat backend configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,

    #[serde(default = "default_chat_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_chat_base_url(),
            timeout_seconds: default_chat_timeout_seconds(),
        }
    }
}

/// Cycle engine defaults and fertile-window tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleSettings {
    #[serde(default = "default_cycle_length")]
    pub default_cycle_length: i64,

    #[serde(default = "default_period_duration")]
    pub default_period_duration: i64,

    #[serde(default = "default_luteal_phase_days")]
    pub luteal_phase_days: i64,

    #[serde(default = "default_fertile_days_before")]
    pub fertile_days_before: i64,

    #[serde(default = "default_fertile_days_after")]
    pub fertile_days_after: i64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            default_cycle_length: default_cycle_length(),
            default_period_duration: default_period_duration(),
            luteal_phase_days: default_luteal_phase_days(),
            fertile_days_before: default_fertile_days_before(),
            fertile_days_after: default_fertile_days_after(),
        }
    }
}

impl CycleSettings {
    /// The window-estimation policy these settings describe
    pub fn policy(&self) -> CyclePolicy {
        CyclePolicy {
            luteal_phase_days: self.luteal_phase_days,
            fertile_days_before: self.fertile_days_before,
            fertile_days_after: self.fertile_days_after,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("eunoia")
}

fn default_chat_base_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_chat_timeout_seconds() -> u64 {
    30
}

fn default_cycle_length() -> i64 {
    28
}

fn default_period_duration() -> i64 {
    5
}

fn default_luteal_phase_days() -> i64 {
    14
}

fn default_fertile_days_before() -> i64 {
    5
}

fn default_fertile_days_after() -> i64 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("eunoia").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cycle.default_cycle_length, 28);
        assert_eq!(config.cycle.default_period_duration, 5);
        assert_eq!(config.cycle.luteal_phase_days, 14);
        assert_eq!(config.chat.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.chat.timeout_seconds, 30);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.cycle.default_cycle_length,
            parsed.cycle.default_cycle_length
        );
        assert_eq!(config.chat.base_url, parsed.chat.base_url);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[cycle]
luteal_phase_days = 12
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cycle.luteal_phase_days, 12);
        assert_eq!(config.cycle.default_cycle_length, 28); // default
        assert_eq!(config.chat.timeout_seconds, 30); // default
    }

    #[test]
    fn test_policy_mapping() {
        let toml_str = r#"
[cycle]
luteal_phase_days = 12
fertile_days_before = 3
fertile_days_after = 2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let policy = config.cycle.policy();

        assert_eq!(policy.luteal_phase_days, 12);
        assert_eq!(policy.fertile_days_before, 3);
        assert_eq!(policy.fertile_days_after, 2);
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.chat.base_url = "http://10.0.0.2:8080".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.chat.base_url, "http://10.0.0.2:8080");
    }
}
