// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;

use crate::models::{
    Complexity, DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};

// Configuration for the suggestion service and its surfaces
#[derive(Debug, Clone)]
pub struct Config {
    // Model provider
    pub model_api_base_url: String,
    pub model_api_key: Option<String>,
    pub model_name: String,
    pub model_timeout: Duration,

    // Form defaults
    pub default_password_length: u16,
    pub default_complexity: Complexity,

    // Web Interface
    pub web_port: u16,
    pub web_address: String,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: PathBuf,

    // Problems found while loading, logged once the logger is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Model provider
            model_api_base_url: "https://api.openai.com/v1".to_string(),
            model_api_key: None,
            model_name: "gpt-4o-mini".to_string(),
            model_timeout: Duration::from_secs(60),

            // Form defaults
            default_password_length: DEFAULT_PASSWORD_LENGTH,
            default_complexity: Complexity::Medium,

            // Web Interface
            web_port: 5000,
            web_address: "127.0.0.1".to_string(),

            // Logging
            log_level: LevelFilter::Info,
            log_file: PathBuf::from("./aegis-pass.log"),

            warnings: Vec::new(),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Model provider
        if let Some(url) = lookup("MODEL_API_BASE_URL") {
            config.model_api_base_url = url;
        }

        if let Some(key) = lookup("MODEL_API_KEY") {
            if !key.trim().is_empty() {
                config.model_api_key = Some(key);
            }
        }

        if let Some(model) = lookup("MODEL_NAME") {
            config.model_name = model;
        }

        if let Some(val) = lookup("MODEL_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.model_timeout = Duration::from_secs(secs);
            }
        }

        // Form defaults
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse::<u16>() {
                Ok(length) if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) => {
                    config.default_password_length = length;
                }
                _ => config
                    .warnings
                    .push(format!("Ignoring invalid DEFAULT_PASSWORD_LENGTH '{}'", val)),
            }
        }

        if let Some(val) = lookup("DEFAULT_COMPLEXITY") {
            match val.to_lowercase().parse() {
                Ok(complexity) => config.default_complexity = complexity,
                Err(_) => config
                    .warnings
                    .push(format!("Unknown complexity '{}', using medium", val)),
            }
        }

        // Web Interface
        if let Some(val) = lookup("WEB_PORT") {
            if let Ok(port) = val.parse() {
                config.web_port = port;
            }
        }

        if let Some(address) = lookup("WEB_ADDRESS") {
            config.web_address = address;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => config
                    .warnings
                    .push(format!("Unknown LOG_LEVEL '{}', using info", level)),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]);
        assert_eq!(config.model_api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model_api_key, None);
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.default_complexity, Complexity::Medium);
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load(&[
            ("MODEL_API_BASE_URL", "http://localhost:11434/v1"),
            ("MODEL_API_KEY", "sk-test"),
            ("MODEL_NAME", "llama3"),
            ("MODEL_TIMEOUT_SECS", "5"),
            ("DEFAULT_PASSWORD_LENGTH", "24"),
            ("DEFAULT_COMPLEXITY", "HIGH"),
            ("WEB_PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FILE", "/tmp/aegis.log"),
        ]);
        assert_eq!(config.model_api_base_url, "http://localhost:11434/v1");
        assert_eq!(config.model_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model_name, "llama3");
        assert_eq!(config.model_timeout, Duration::from_secs(5));
        assert_eq!(config.default_password_length, 24);
        assert_eq!(config.default_complexity, Complexity::High);
        assert_eq!(config.web_port, 8080);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, PathBuf::from("/tmp/aegis.log"));
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = load(&[
            ("MODEL_API_KEY", "  "),
            ("DEFAULT_PASSWORD_LENGTH", "4"),
            ("DEFAULT_COMPLEXITY", "extreme"),
            ("WEB_PORT", "not-a-port"),
        ]);
        assert_eq!(config.model_api_key, None);
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.default_complexity, Complexity::Medium);
        assert_eq!(config.web_port, 5000);
        assert_eq!(
            config.warnings,
            vec![
                "Ignoring invalid DEFAULT_PASSWORD_LENGTH '4'".to_string(),
                "Unknown complexity 'extreme', using medium".to_string(),
            ]
        );
    }
}
