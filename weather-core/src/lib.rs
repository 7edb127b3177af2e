//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The provider abstraction and its Open-Meteo implementation
//! - City suggestions with keystroke debouncing
//! - WMO weather-code mapping
//! - The view state shown by a front end
//!
//! It is used by `cityweather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod debounce;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod suggest;
pub mod weather_code;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use debounce::{SuggestionBatch, SuggestionDebouncer};
pub use error::WeatherError;
pub use model::{City, ForecastDay, WeatherSnapshot};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider, provider_from_config};
pub use session::{RequestId, ViewState, WeatherSession};
pub use suggest::lookup_suggestions;
pub use weather_code::{WeatherCodeEntry, describe as describe_weather_code};
