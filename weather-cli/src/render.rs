//! Plain-text rendering of the view state.
//!
//! Every function returns a `String` so that the caller decides between stdout
//! and stderr.

use std::fmt::Write;

use cityweather_core::{
    City, ForecastDay, ViewState, WeatherSnapshot,
    model::display_round,
    suggest::is_searchable,
    weather_code::{IconSize, icon_url},
};

pub fn loading_line(city: &City) -> String {
    format!("Loading weather for {}...", city.full_name)
}

pub fn searching_line(query: &str) -> String {
    format!("Searching for '{query}'...")
}

pub fn error_banner(message: &str) -> String {
    format!("error: {message}")
}

/// What an empty option list says, depending on why it is empty.
pub fn no_options_text(query: &str) -> &'static str {
    if is_searchable(query) {
        "No cities found"
    } else {
        "Type at least 2 characters"
    }
}

pub fn current_panel(snapshot: &WeatherSnapshot, icon_base_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", snapshot.city_name, snapshot.country_code);
    let _ = writeln!(
        out,
        "  {}°  {}",
        display_round(snapshot.temperature),
        snapshot.condition_description
    );
    let _ = writeln!(
        out,
        "  icon: {}",
        icon_url(icon_base_url, &snapshot.icon_id, IconSize::Large)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<12}{}°C", "Feels like", display_round(snapshot.feels_like));
    let _ = writeln!(out, "  {:<12}{}%", "Humidity", snapshot.humidity);
    let _ = writeln!(out, "  {:<12}{} km/h", "Wind speed", snapshot.wind_speed);
    let _ = writeln!(out, "  {:<12}{} hPa", "Pressure", snapshot.pressure);

    out
}

pub fn forecast_strip(forecast: &[ForecastDay], icon_base_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}-Day Forecast", forecast.len());
    for day in forecast {
        let max_temp = match day.max_temp {
            Some(temp) => display_round(temp).to_string(),
            None => "--".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<12}{:>4}°  {:<22}{}",
            day.date.format("%a, %b %-d").to_string(),
            max_temp,
            day.description,
            icon_url(icon_base_url, day.icon_id(), IconSize::Small)
        );
    }

    out
}

/// The full screen for a view state. `Idle` renders nothing.
pub fn view(state: &ViewState, icon_base_url: &str) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading { city, .. } => loading_line(city),
        ViewState::Ready(snapshot) => format!(
            "{}\n{}",
            current_panel(snapshot, icon_base_url),
            forecast_strip(&snapshot.forecast, icon_base_url)
        ),
        ViewState::Failed { message } => error_banner(message),
    }
}

pub fn suggestion_list(cities: &[City]) -> String {
    let mut out = String::new();
    for (index, city) in cities.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<40} ({:.4}, {:.4})",
            index + 1,
            city.full_name,
            city.latitude,
            city.longitude
        );
    }
    out
}
