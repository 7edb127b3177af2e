//! In-memory provider for unit tests.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{City, ForecastDay, WeatherError, WeatherProvider, WeatherSnapshot};

#[derive(Debug, Default)]
pub(crate) struct FakeProvider {
    cities: Vec<City>,
    fail_search: bool,
    weather_failure: Option<(u16, Option<String>)>,
    search_delays: HashMap<String, Duration>,
    searches: Mutex<Vec<String>>,
    weather_requests: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub(crate) fn london() -> City {
        City::new("London", "United Kingdom", "GB", 51.50853, -0.12574)
    }

    pub(crate) fn paris() -> City {
        City::new("Paris", "France", "FR", 48.85341, 2.3488)
    }

    pub(crate) fn with_cities(cities: Vec<City>) -> Self {
        Self {
            cities,
            ..Self::default()
        }
    }

    pub(crate) fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_weather(status: u16, reason: Option<&str>) -> Self {
        Self {
            weather_failure: Some((status, reason.map(str::to_string))),
            ..Self::default()
        }
    }

    pub(crate) fn delay_search(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub(crate) fn searches(&self) -> Vec<String> {
        self.searches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn weather_requests(&self) -> Vec<String> {
        self.weather_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn snapshot_for(city: &City) -> WeatherSnapshot {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();

        WeatherSnapshot {
            temperature: 15.2,
            feels_like: 13.9,
            humidity: 81,
            pressure: 1013,
            wind_speed: 11.5,
            condition_main: "Clouds".to_string(),
            condition_description: "Overcast".to_string(),
            icon_id: "04d".to_string(),
            city_name: city.name.clone(),
            country_code: city.country_code.clone(),
            forecast: vec![
                ForecastDay::new(day(2), 9.1, 2),
                ForecastDay::new(day(3), 8.4, 3),
                ForecastDay::new(day(4), 7.0, 61),
                ForecastDay::new(day(5), 2.2, 71),
                ForecastDay::new(day(6), 5.5, 0),
            ],
        }
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, WeatherError> {
        self.searches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());

        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_search {
            return Err(WeatherError::InvalidResponse("geocode payload: boom".into()));
        }

        Ok(self
            .cities
            .iter()
            .filter(|city| city.name.starts_with(query))
            .cloned()
            .collect())
    }

    async fn get_weather(&self, city: &City) -> Result<WeatherSnapshot, WeatherError> {
        self.weather_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(city.full_name.clone());

        match &self.weather_failure {
            Some((status, reason)) => Err(WeatherError::Http {
                status: *status,
                reason: reason.clone(),
            }),
            None => Ok(Self::snapshot_for(city)),
        }
    }
}
