use thiserror::Error;

pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch weather data";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("http error ({status}): {}", .reason.as_deref().unwrap_or("no reason given"))]
    Http { status: u16, reason: Option<String> },

    /// The server answered 2xx but the payload was not what we expect.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl WeatherError {
    /// The single line shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Http {
                reason: Some(reason),
                ..
            } => reason.clone(),
            WeatherError::Http { reason: None, .. } | WeatherError::Transport(_) => {
                GENERIC_FETCH_MESSAGE.to_string()
            }
            WeatherError::InvalidResponse(_) => UNEXPECTED_MESSAGE.to_string(),
        }
    }
}
