use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::notify::RelayConfig;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_word_set")]
    pub word_set: String,
    #[serde(default)]
    pub participant_name: String,
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
    #[serde(default)]
    pub recipient: String,
    #[serde(default = "default_relay_timeout_secs")]
    pub relay_timeout_secs: u64,
    #[serde(default = "default_relay_endpoint")]
    pub relay_endpoint: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub relay: RelayConfig,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_word_set() -> String {
    "basic".to_string()
}
fn default_feedback_delay_ms() -> u64 {
    1000
}
fn default_relay_timeout_secs() -> u64 {
    10
}
fn default_relay_endpoint() -> String {
    DEFAULT_RELAY_ENDPOINT.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            word_set: default_word_set(),
            participant_name: String::new(),
            feedback_delay_ms: default_feedback_delay_ms(),
            recipient: String::new(),
            relay_timeout_secs: default_relay_timeout_secs(),
            relay_endpoint: default_relay_endpoint(),
            log_level: default_log_level(),
            relay: RelayConfig::default(),
        }
    }
}

impl Config {
    /// Load the config file (defaults if absent), then apply relay env overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };
        config.apply_env(|key| env::var(key).ok());
        config.validate();
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tango")
            .join("config.toml")
    }

    /// `TANGO_RELAY_*` variables win over the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TANGO_RELAY_SERVICE_ID") {
            self.relay.service_id = Some(v);
        }
        if let Some(v) = lookup("TANGO_RELAY_TEMPLATE_ID") {
            self.relay.template_id = Some(v);
        }
        if let Some(v) = lookup("TANGO_RELAY_PUBLIC_KEY") {
            self.relay.public_key = Some(v);
        }
    }

    /// Clamp numeric fields into usable ranges.
    pub fn validate(&mut self) {
        self.feedback_delay_ms = self.feedback_delay_ms.min(5000);
        self.relay_timeout_secs = self.relay_timeout_secs.clamp(1, 60);
        if self.relay_endpoint.trim().is_empty() {
            self.relay_endpoint = default_relay_endpoint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.word_set, "basic");
        assert_eq!(config.feedback_delay_ms, 1000);
        assert_eq!(config.relay_timeout_secs, 10);
        assert_eq!(config.relay_endpoint, DEFAULT_RELAY_ENDPOINT);
        assert!(config.participant_name.is_empty());
        assert!(!config.relay.is_enabled());
    }

    #[test]
    fn test_config_reads_relay_table() {
        let toml_str = r#"
word_set = "food"
participant_name = "수진"

[relay]
service_id = "service_x"
template_id = "template_y"
public_key = "pk_z"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.word_set, "food");
        assert_eq!(config.participant_name, "수진");
        assert!(config.relay.is_enabled());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.relay.service_id = Some("svc".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.relay.service_id.as_deref(), Some("svc"));
        assert_eq!(deserialized.feedback_delay_ms, config.feedback_delay_ms);
    }

    #[test]
    fn test_env_overrides_relay() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "TANGO_RELAY_SERVICE_ID" => Some("s".to_string()),
            "TANGO_RELAY_TEMPLATE_ID" => Some("t".to_string()),
            "TANGO_RELAY_PUBLIC_KEY" => Some("p".to_string()),
            _ => None,
        });
        assert!(config.relay.is_enabled());
        assert_eq!(config.relay.template_id.as_deref(), Some("t"));
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.feedback_delay_ms = 60_000;
        config.relay_timeout_secs = 0;
        config.relay_endpoint = "  ".to_string();
        config.validate();
        assert_eq!(config.feedback_delay_ms, 5000);
        assert_eq!(config.relay_timeout_secs, 1);
        assert_eq!(config.relay_endpoint, DEFAULT_RELAY_ENDPOINT);
    }
}
