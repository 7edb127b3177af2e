//! What the display shows, as one value replaced on every transition.

use std::sync::Arc;

use serde::Serialize;

use crate::{City, WeatherError, WeatherProvider, WeatherSnapshot};

/// Identifies one weather fetch. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        request: RequestId,
        city: City,
    },
    Ready(WeatherSnapshot),
    Failed {
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct WeatherSession {
    state: Arc<ViewState>,
    last_issued: u64,
}

impl WeatherSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; cheap to clone and never mutated after publication.
    pub fn state(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state, ViewState::Loading { .. })
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &*self.state {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &*self.state {
            ViewState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Start a fetch for `city`. Any displayed snapshot or error is dropped.
    pub fn begin(&mut self, city: City) -> RequestId {
        self.last_issued += 1;
        let request = RequestId(self.last_issued);
        self.state = Arc::new(ViewState::Loading { request, city });
        request
    }

    /// Apply the outcome of `request`.
    ///
    /// Returns `false`, leaving the state untouched, when a newer request has
    /// been issued since.
    pub fn complete(
        &mut self,
        request: RequestId,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> bool {
        if request.0 != self.last_issued {
            tracing::debug!(?request, latest = self.last_issued, "ignoring stale weather result");
            return false;
        }

        let next = match result {
            Ok(snapshot) => ViewState::Ready(snapshot),
            Err(error) => {
                tracing::debug!(%error, "weather fetch failed");
                ViewState::Failed {
                    message: error.user_message(),
                }
            }
        };

        self.state = Arc::new(next);
        true
    }

    /// Fetch weather for `city` and apply it.
    pub async fn select_city(&mut self, provider: &dyn WeatherProvider, city: City) -> Arc<ViewState> {
        let request = self.begin(city.clone());
        let result = provider.get_weather(&city).await;
        self.complete(request, result);
        self.state()
    }
}
