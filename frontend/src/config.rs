use thiserror::Error;
use web_sys::Document;

use crate::services::logging::{LogLevel, Logger};

const API_BASE_META: &str = "clinic-api-base";
const LOG_LEVEL_META: &str = "clinic-log-level";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Runtime settings for the page controllers
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix for API calls; empty means same-origin relative URLs
    pub api_base_url: String,
    pub log_level: LogLevel,
    pub alert_dismiss_ms: u32,
    pub alert_fade_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            log_level: LogLevel::Info,
            alert_dismiss_ms: 5000, // 5 seconds
            alert_fade_ms: 150,
        }
    }
}

impl AppConfig {
    /// Read overrides from `<meta name="clinic-*">` tags, keeping defaults for
    /// anything absent or invalid.
    pub fn from_document(document: &Document) -> Self {
        let lookup = |name: &str| {
            document
                .query_selector(&format!("meta[name=\"{}\"]", name))
                .ok()
                .flatten()
                .and_then(|meta| meta.get_attribute("content"))
        };
        let mut config = Self::default();
        for err in config.apply_overrides(lookup(API_BASE_META), lookup(LOG_LEVEL_META)) {
            Logger::warn_with_component("config", &err.to_string());
        }
        config
    }

    pub fn apply_overrides(
        &mut self,
        api_base: Option<String>,
        log_level: Option<String>,
    ) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(base) = api_base {
            let base = base.trim();
            if base.is_empty() || base.starts_with('/') || base.starts_with("http") {
                self.api_base_url = base.trim_end_matches('/').to_string();
            } else {
                errors.push(ConfigError::InvalidValue {
                    key: API_BASE_META,
                    reason: format!("'{}' is neither a path nor an http(s) URL", base),
                });
            }
        }

        if let Some(level) = log_level {
            match level.parse::<LogLevel>() {
                Ok(level) => self.log_level = level,
                Err(reason) => errors.push(ConfigError::InvalidValue {
                    key: LOG_LEVEL_META,
                    reason,
                }),
            }
        }

        errors
    }
}
