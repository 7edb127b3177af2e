use std::path::PathBuf;

use anyhow::{Context, Result};
use cityweather_core::Config;
use inquire::{CustomType, Text, validator::Validation};

fn url_prompt(message: &str, current: &str) -> Result<String> {
    Text::new(message)
        .with_default(current)
        .with_validator(|value: &str| {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Expected an http:// or https:// URL".into()))
            }
        })
        .prompt()
        .with_context(|| format!("Failed to read '{message}'"))
}

/// Walk through every setting, starting from what is on disk.
pub fn interactive(mut config: Config) -> Result<Config> {
    config.endpoints.geocoding_url =
        url_prompt("Geocoding endpoint:", &config.endpoints.geocoding_url)?;
    config.endpoints.forecast_url =
        url_prompt("Forecast endpoint:", &config.endpoints.forecast_url)?;
    config.endpoints.icon_base_url =
        url_prompt("Icon base URL:", &config.endpoints.icon_base_url)?;

    config.search.debounce_ms = CustomType::<u64>::new("Suggestion debounce (ms):")
        .with_default(config.search.debounce_ms)
        .with_error_message("Please type a whole number of milliseconds")
        .prompt()
        .context("Failed to read debounce")?;

    config.search.max_suggestions = CustomType::<u8>::new("Maximum suggestions:")
        .with_default(config.search.max_suggestions)
        .with_validator(|value: &u8| {
            if *value == 0 {
                Ok(Validation::Invalid("Must be at least 1".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
        .context("Failed to read maximum suggestions")?;

    let language = Text::new("Result language:")
        .with_default(&config.search.language)
        .prompt()
        .context("Failed to read language")?;
    config.search.language = language;

    config.http.timeout_secs = CustomType::<u64>::new("HTTP timeout (s):")
        .with_default(config.http.timeout_secs)
        .with_validator(|value: &u64| {
            if *value == 0 {
                Ok(Validation::Invalid("Must be at least 1".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
        .context("Failed to read timeout")?;

    Ok(config)
}

/// Entry point of `cityweather configure`. Returns where the file was written.
pub fn run(reset: bool) -> Result<PathBuf> {
    let config = if reset {
        Config::default()
    } else {
        interactive(Config::load()?)?
    };

    config.save()
}
