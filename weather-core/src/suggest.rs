use crate::{City, WeatherProvider};

/// Shorter queries never reach the geocoder.
pub const MIN_QUERY_CHARS: usize = 2;

pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// City candidates for a partial name.
///
/// Never fails: a transport or parse error is logged and reported as "no
/// options", the same as a query without matches.
pub async fn lookup_suggestions(provider: &dyn WeatherProvider, query: &str) -> Vec<City> {
    if !is_searchable(query) {
        return Vec::new();
    }

    match provider.search_cities(query).await {
        Ok(cities) => cities,
        Err(error) => {
            tracing::warn!(query, %error, "Error fetching city suggestions");
            Vec::new()
        }
    }
}
