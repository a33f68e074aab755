//! Provider listing command handler.

use anyhow::{Result, bail};

use crate::config::{ConfigManager, DEFAULT_PROVIDER, ProviderConfig};
use crate::translation::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists all configured providers with their endpoints.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    if !config.providers.contains_key(DEFAULT_PROVIDER) {
        config
            .providers
            .insert(DEFAULT_PROVIDER.to_string(), ProviderConfig::openai());
    }

    let default_provider = config
        .sheet_tl
        .provider
        .as_deref()
        .unwrap_or(DEFAULT_PROVIDER);

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.providers.get(provider_name) else {
            bail!("Provider '{provider_name}' not found");
        };
        print_provider_details(provider_name, provider, default_provider == provider_name);
        return Ok(());
    }

    println!("{}\n", Style::header("Configured providers"));

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();

    for name in names {
        let provider = &config.providers[name];
        let marker = if default_provider == name.as_str() {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::value(name));
        println!(
            "    {} {}",
            Style::label("endpoint:"),
            Style::secondary(&provider.endpoint)
        );
    }

    println!(
        "\n{}",
        Style::secondary(format!("Config file: {}", manager.config_path().display()))
    );

    Ok(())
}

fn print_provider_details(name: &str, provider: &ProviderConfig, is_default: bool) {
    println!(
        "Provider: {}{}",
        Style::value(name),
        if is_default {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    );
    println!("  endpoint    = {}", provider.endpoint);
    if provider.requires_api_key() {
        let has_key = provider.get_api_key().is_some();
        println!(
            "  api_key     = {}",
            if has_key { "(set)" } else { "(not set)" }
        );
        if let Some(env_var) = &provider.api_key_env {
            println!("  api_key_env = {env_var}");
        }
    }
    println!(
        "  model       = {}",
        provider.model.as_deref().unwrap_or(DEFAULT_MODEL)
    );
    println!(
        "  temperature = {}",
        provider.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    );
    println!(
        "  max_tokens  = {}",
        provider.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    );
}
