use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::weather_code;

/// Open-Meteo's free tier has no surface pressure in the fields we request.
pub const PLACEHOLDER_PRESSURE_HPA: u16 = 1013;

/// A geocoding candidate. Selecting one triggers a weather fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub full_name: String,
}

impl City {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        country_code: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let name = name.into();
        let country = country.into();
        let full_name = if country.is_empty() {
            name.clone()
        } else {
            format!("{name}, {country}")
        };

        Self {
            name,
            country,
            country_code: country_code.into(),
            latitude,
            longitude,
            full_name,
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// `None` when the service has no value for that day.
    pub max_temp: Option<f64>,
    pub weather_code: Option<i32>,
    pub description: String,
}

impl ForecastDay {
    pub fn new(date: NaiveDate, max_temp: f64, weather_code: i32) -> Self {
        Self::from_daily(date, Some(max_temp), Some(weather_code))
    }

    /// A day whose values may be missing. A missing code reads as unknown weather.
    pub fn from_daily(date: NaiveDate, max_temp: Option<f64>, weather_code: Option<i32>) -> Self {
        Self {
            date,
            max_temp,
            weather_code,
            description: Self::entry(weather_code).description.to_string(),
        }
    }

    pub fn icon_id(&self) -> &'static str {
        Self::entry(self.weather_code).icon_id
    }

    fn entry(code: Option<i32>) -> weather_code::WeatherCodeEntry {
        code.map_or(weather_code::UNKNOWN, weather_code::describe)
    }
}

/// Everything the current-conditions panel and the forecast strip display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u16,
    pub wind_speed: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_id: String,
    pub city_name: String,
    pub country_code: String,
    pub forecast: Vec<ForecastDay>,
}

/// Rounds the way the display does: halves go toward positive infinity.
pub fn display_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
