use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::paths;
use crate::processor::DEFAULT_DELAY;
use crate::sheet::CellRef;
use crate::translation::{
    ClientSettings, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT,
};

/// Provider used when neither the CLI nor the config file names one.
pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_SOURCE_CELL: &str = "A1";
pub const DEFAULT_TARGET_CELL: &str = "B1";

/// Configuration problems that stop a run before the sheet is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Provider '{name}' not found\n\n{}", available_hint(.available))]
    ProviderNotFound { name: String, available: Vec<String> },

    #[error(
        "Provider '{provider}' requires an API key\n\n\
         Set the {env_var} environment variable:\n  \
         export {env_var}=\"your-api-key\"\n\n\
         Or set api_key in ~/.config/sheet-tl/config.toml"
    )]
    MissingApiKey { provider: String, env_var: String },

    #[error("Invalid '{key}' setting: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Failed to parse config file: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn available_hint(available: &[String]) -> String {
    if available.is_empty() {
        "No providers configured. Add providers to ~/.config/sheet-tl/config.toml".to_string()
    } else {
        format!(
            "Available providers:\n  - {}\n\nAdd providers to ~/.config/sheet-tl/config.toml",
            available.join("\n  - ")
        )
    }
}

/// Default settings in the `[sheet_tl]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetTlConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name, overriding the provider's own default.
    pub model: Option<String>,
    /// Pause after each attempted row, in milliseconds.
    pub delay_ms: Option<u64>,
    /// Cell holding the source language.
    pub source_cell: Option<String>,
    /// Cell holding the target language.
    pub target_cell: Option<String>,
}

/// Configuration for a translation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// The provider used when nothing is configured.
    pub fn openai() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            model: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/sheet-tl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub sheet_tl: SheetTlConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub client: ClientSettings,
    pub delay: Duration,
    pub source_cell: CellRef,
    pub target_cell: CellRef,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub delay_ms: Option<u64>,
    pub source_cell: Option<String>,
    pub target_cell: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI options, then `[sheet_tl]`, then the provider's own
/// settings, then built-in defaults.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.sheet_tl;

    let provider_name = options
        .provider
        .as_ref()
        .or(defaults.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let provider = match config_file.providers.get(&provider_name) {
        Some(provider) => provider.clone(),
        None if provider_name == DEFAULT_PROVIDER => ProviderConfig::openai(),
        None => {
            let mut available: Vec<String> = config_file.providers.keys().cloned().collect();
            available.sort();
            return Err(ConfigError::ProviderNotFound {
                name: provider_name,
                available,
            }
            .into());
        }
    };

    let model = options
        .model
        .as_ref()
        .or(defaults.model.as_ref())
        .or(provider.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let temperature = provider.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    if !(0.0..=1.0).contains(&temperature) {
        return Err(ConfigError::Invalid {
            key: "temperature",
            reason: format!("{temperature} is outside 0.0..=1.0"),
        }
        .into());
    }

    let max_tokens = provider.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    if max_tokens == 0 {
        return Err(ConfigError::Invalid {
            key: "max_tokens",
            reason: "must be greater than zero".to_string(),
        }
        .into());
    }

    let api_key = provider.get_api_key();
    if provider.requires_api_key() && api_key.is_none() {
        let env_var = provider.api_key_env.as_deref().unwrap_or("API_KEY");
        return Err(ConfigError::MissingApiKey {
            provider: provider_name,
            env_var: env_var.to_string(),
        }
        .into());
    }

    let delay = options
        .delay_ms
        .or(defaults.delay_ms)
        .map_or(DEFAULT_DELAY, Duration::from_millis);

    let source_cell = parse_cell(
        "source_cell",
        options
            .source_cell
            .as_deref()
            .or(defaults.source_cell.as_deref())
            .unwrap_or(DEFAULT_SOURCE_CELL),
    )?;
    let target_cell = parse_cell(
        "target_cell",
        options
            .target_cell
            .as_deref()
            .or(defaults.target_cell.as_deref())
            .unwrap_or(DEFAULT_TARGET_CELL),
    )?;

    Ok(ResolvedConfig {
        client: ClientSettings {
            endpoint: provider.endpoint.clone(),
            api_key,
            model,
            temperature,
            max_tokens,
            timeout: provider
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        },
        provider_name,
        delay,
        source_cell,
        target_cell,
    })
}

fn parse_cell(key: &'static str, value: &str) -> Result<CellRef, ConfigError> {
    value.parse().map_err(|e: crate::error::ValidationError| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/sheet-tl/config.toml`
    /// or `~/.config/sheet-tl/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
