//! WMO weather interpretation codes, as reported by Open-Meteo.
//!
//! Icon ids follow the OpenWeatherMap icon set so that the usual icon host can
//! be used for display.

use serde::Serialize;

pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    pub category: &'static str,
    pub description: &'static str,
    pub icon_id: &'static str,
}

impl WeatherCodeEntry {
    const fn new(category: &'static str, description: &'static str, icon_id: &'static str) -> Self {
        Self {
            category,
            description,
            icon_id,
        }
    }
}

pub const UNKNOWN: WeatherCodeEntry = WeatherCodeEntry::new("Unknown", "Unknown weather", "01d");

const TABLE: &[(i32, WeatherCodeEntry)] = &[
    (0, WeatherCodeEntry::new("Clear", "Clear sky", "01d")),
    (1, WeatherCodeEntry::new("Clear", "Mainly clear", "02d")),
    (2, WeatherCodeEntry::new("Clouds", "Partly cloudy", "03d")),
    (3, WeatherCodeEntry::new("Clouds", "Overcast", "04d")),
    (45, WeatherCodeEntry::new("Fog", "Foggy", "50d")),
    (48, WeatherCodeEntry::new("Fog", "Depositing rime fog", "50d")),
    (51, WeatherCodeEntry::new("Drizzle", "Light drizzle", "09d")),
    (53, WeatherCodeEntry::new("Drizzle", "Moderate drizzle", "09d")),
    (55, WeatherCodeEntry::new("Drizzle", "Dense drizzle", "09d")),
    (61, WeatherCodeEntry::new("Rain", "Slight rain", "10d")),
    (63, WeatherCodeEntry::new("Rain", "Moderate rain", "10d")),
    (65, WeatherCodeEntry::new("Rain", "Heavy rain", "10d")),
    (71, WeatherCodeEntry::new("Snow", "Slight snow fall", "13d")),
    (73, WeatherCodeEntry::new("Snow", "Moderate snow fall", "13d")),
    (75, WeatherCodeEntry::new("Snow", "Heavy snow fall", "13d")),
    (95, WeatherCodeEntry::new("Thunderstorm", "Thunderstorm", "11d")),
];

/// Exact-match lookup. Codes outside the table map to [`UNKNOWN`].
pub fn describe(code: i32) -> WeatherCodeEntry {
    TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, entry)| *entry)
        .unwrap_or(UNKNOWN)
}

/// All codes with a dedicated entry, in ascending order.
pub fn known_codes() -> impl Iterator<Item = i32> {
    TABLE.iter().map(|(code, _)| *code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Forecast strip.
    Small,
    /// Current-conditions panel.
    Large,
}

impl IconSize {
    fn suffix(self) -> &'static str {
        match self {
            IconSize::Small => "@2x",
            IconSize::Large => "@4x",
        }
    }
}

pub fn icon_url(base_url: &str, icon_id: &str, size: IconSize) -> String {
    format!(
        "{}/{}{}.png",
        base_url.trim_end_matches('/'),
        icon_id,
        size.suffix()
    )
}
