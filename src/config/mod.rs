//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ConfigError, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_PROVIDER,
    DEFAULT_SOURCE_CELL, DEFAULT_TARGET_CELL, ProviderConfig, ResolveOptions, ResolvedConfig,
    SheetTlConfig, resolve_config,
};
