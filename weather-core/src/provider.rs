use crate::{City, Config, WeatherError, WeatherSnapshot, provider::open_meteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// A geocoding + forecast backend.
///
/// Implementations return raw errors; the suggestion lookup and the view-state
/// session decide how each failure class is surfaced.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, WeatherError>;

    async fn get_weather(&self, city: &City) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::from_config(config)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

    Ok(Arc::new(provider))
}
