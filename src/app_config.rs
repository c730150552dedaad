use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::providers::ProviderKind;

/// Application configuration module
/// This module handles the application configuration including loading,
/// environment overrides and validation. The configuration is built once at
/// startup and is read-only afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language used when the caller gives none ("auto" to detect)
    #[serde(default = "default_source_language")]
    pub default_source_language: String,

    /// Target language used when the caller gives none
    #[serde(default = "default_target_language")]
    pub default_target_language: String,

    /// Translation backends in fallback order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for one translation backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Lower values are tried first
    #[serde(default)]
    pub priority: u32,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Contact email (MyMemory)
    #[serde(default = "String::new")]
    pub email: String,

    // @field: Timeout seconds per attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param kind: Provider enum
    // @returns: Provider config with defaults
    pub fn new(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::DeepL => Self {
                provider_type: kind.as_str().to_string(),
                priority: 0,
                api_key: String::new(),
                endpoint: String::new(),
                email: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            ProviderKind::LibreTranslate => Self {
                provider_type: kind.as_str().to_string(),
                priority: 1,
                api_key: String::new(),
                endpoint: default_libretranslate_endpoint(),
                email: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            ProviderKind::MyMemory => Self {
                provider_type: kind.as_str().to_string(),
                priority: 2,
                api_key: String::new(),
                endpoint: default_mymemory_endpoint(),
                email: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }

    /// Parsed provider type
    pub fn kind(&self) -> Result<ProviderKind> {
        self.provider_type.parse()
    }

    /// Whether the required credential or URL is present
    pub fn is_enabled(&self) -> bool {
        self.kind().map(|kind| kind.is_enabled(self)).unwrap_or(false)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_libretranslate_endpoint() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_mymemory_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_providers() -> Vec<ProviderConfig> {
    ProviderKind::ALL.iter().map(|kind| ProviderConfig::new(*kind)).collect()
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_source_language: default_source_language(),
            default_target_language: default_target_language(),
            providers: default_providers(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the configuration file, writing a default one when it is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply credential and URL overrides from the environment
    ///
    /// `lookup` is usually `std::env::var(..).ok()`; empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for provider in &mut self.providers {
            match provider.kind() {
                Ok(ProviderKind::DeepL) => {
                    if let Some(key) = get("DEEPL_API_KEY") {
                        provider.api_key = key;
                    }
                    if let Some(url) = get("DEEPL_API_URL") {
                        provider.endpoint = url;
                    }
                }
                Ok(ProviderKind::LibreTranslate) => {
                    if let Some(url) = get("LIBRETRANSLATE_URL") {
                        provider.endpoint = url;
                    }
                    if let Some(key) = get("LIBRETRANSLATE_API_KEY") {
                        provider.api_key = key;
                    }
                }
                Ok(ProviderKind::MyMemory) => {
                    if let Some(url) = get("MYMEMORY_URL") {
                        provider.endpoint = url;
                    }
                    if let Some(email) = get("MYMEMORY_EMAIL") {
                        provider.email = email;
                    }
                }
                Err(_) => {}
            }
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if crate::language_utils::is_auto(&self.default_target_language)
            || self.default_target_language.trim().is_empty()
        {
            return Err(anyhow!("Default target language must be a language code"));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            let kind = provider.kind()?;
            if !seen.insert(kind) {
                return Err(anyhow!("Provider '{}' is configured more than once", kind));
            }
            if provider.timeout_secs == 0 {
                return Err(anyhow!("Timeout for provider '{}' must be greater than zero", kind));
            }
            if !provider.endpoint.trim().is_empty() {
                Url::parse(provider.endpoint.trim())
                    .with_context(|| format!("Invalid endpoint for provider '{}'", kind))?;
            }
        }

        Ok(())
    }

    /// Enabled providers in the order they will be tried
    ///
    /// Ties on priority keep declaration order.
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        let mut enabled: Vec<&ProviderConfig> =
            self.providers.iter().filter(|p| p.is_enabled()).collect();
        enabled.sort_by_key(|p| p.priority);
        enabled
    }

    /// Get a specific provider configuration by kind
    pub fn get_provider_config(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.kind().ok() == Some(kind))
    }
}
