use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    City, Config, ForecastDay, WeatherError, WeatherSnapshot,
    model::PLACEHOLDER_PRESSURE_HPA, weather_code,
};

use super::WeatherProvider;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,weather_code";
/// Today plus the five days shown in the forecast strip.
const FORECAST_DAYS: u8 = 6;

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
    max_suggestions: u8,
}

impl OpenMeteoProvider {
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(config.http.timeout()).build()?;

        Ok(Self {
            http,
            geocoding_url: config.endpoints.geocoding_url.clone(),
            forecast_url: config.endpoints.forecast_url.clone(),
            language: config.search.language.clone(),
            max_suggestions: config.search.max_suggestions,
        })
    }
}

#[derive(Debug, Serialize)]
struct GeocodeQuery<'a> {
    name: &'a str,
    count: u8,
    language: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    current: &'a str,
    daily: &'a str,
    timezone: &'a str,
    forecast_days: u8,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    wind_speed_10m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, WeatherError> {
        let params = GeocodeQuery {
            name: query,
            count: self.max_suggestions,
            language: &self.language,
            format: "json",
        };

        tracing::debug!(query, "requesting city suggestions");
        let body = execute_request(self.http.get(&self.geocoding_url).query(&params)).await?;
        let cities = parse_geocode_response(&body)?;
        tracing::debug!(query, count = cities.len(), "received city suggestions");

        Ok(cities)
    }

    async fn get_weather(&self, city: &City) -> Result<WeatherSnapshot, WeatherError> {
        let params = ForecastQuery {
            latitude: city.latitude,
            longitude: city.longitude,
            current: CURRENT_FIELDS,
            daily: DAILY_FIELDS,
            timezone: "auto",
            forecast_days: FORECAST_DAYS,
        };

        tracing::info!(city = %city, "requesting forecast");
        let body = execute_request(self.http.get(&self.forecast_url).query(&params)).await?;

        parse_forecast_response(&body, city)
    }
}

async fn execute_request(request: RequestBuilder) -> Result<String, WeatherError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let reason = extract_reason(&body);
    tracing::debug!(status = status.as_u16(), reason = ?reason, "open-meteo request failed");

    Err(WeatherError::Http {
        status: status.as_u16(),
        reason,
    })
}

/// Open-Meteo error bodies look like `{"error": true, "reason": "..."}`.
fn extract_reason(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body.trim())
        .ok()?
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(str::to_string)
}

fn parse_geocode_response(body: &str) -> Result<Vec<City>, WeatherError> {
    let payload: GeocodeResponse = serde_json::from_str(body)
        .map_err(|error| WeatherError::InvalidResponse(format!("geocode payload: {error}")))?;

    let cities = payload
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|result| {
            City::new(
                result.name,
                result.country.unwrap_or_default(),
                result.country_code.unwrap_or_default(),
                result.latitude,
                result.longitude,
            )
        })
        .collect();

    Ok(cities)
}

fn parse_forecast_response(body: &str, city: &City) -> Result<WeatherSnapshot, WeatherError> {
    let payload: ForecastResponse = serde_json::from_str(body)
        .map_err(|error| WeatherError::InvalidResponse(format!("forecast payload: {error}")))?;

    let current = payload
        .current
        .ok_or_else(|| WeatherError::InvalidResponse("forecast payload: missing current".into()))?;
    let daily = payload
        .daily
        .ok_or_else(|| WeatherError::InvalidResponse("forecast payload: missing daily".into()))?;

    let forecast = build_forecast_days(daily)?;
    let condition = weather_code::describe(current.weather_code);

    Ok(WeatherSnapshot {
        temperature: current.temperature_2m,
        feels_like: current.apparent_temperature,
        humidity: clamp_percentage(current.relative_humidity_2m),
        pressure: PLACEHOLDER_PRESSURE_HPA,
        wind_speed: current.wind_speed_10m,
        condition_main: condition.category.to_string(),
        condition_description: condition.description.to_string(),
        icon_id: condition.icon_id.to_string(),
        city_name: city.name.clone(),
        country_code: city.country_code.clone(),
        forecast,
    })
}

/// Drops the first daily entry: today is already covered by current conditions.
/// Days with `null` values are kept with the gaps left empty.
fn build_forecast_days(daily: DailyBlock) -> Result<Vec<ForecastDay>, WeatherError> {
    let length = daily.time.len();

    if daily.temperature_2m_max.len() != length || daily.weather_code.len() != length {
        return Err(WeatherError::InvalidResponse(
            "forecast payload: daily arrays length mismatch".to_string(),
        ));
    }

    daily
        .time
        .iter()
        .zip(&daily.temperature_2m_max)
        .zip(&daily.weather_code)
        .skip(1)
        .map(|((date, max_temp), code)| -> Result<ForecastDay, WeatherError> {
            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|error| {
                WeatherError::InvalidResponse(format!(
                    "forecast payload: bad date '{date}' in daily.time: {error}"
                ))
            })?;
            Ok(ForecastDay::from_daily(date, *max_temp, *code))
        })
        .collect()
}

fn clamp_percentage(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}
