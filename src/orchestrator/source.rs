use async_trait::async_trait;
use chrono::NaiveTime;
use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;

use crate::weather::models::WeatherEnvelope;

/// Why a weather fetch produced no usable payload
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Backend returned HTTP {0}")]
    Protocol(u16),

    #[error("Malformed weather payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Timeout(_) => "network",
            Self::Protocol(_) => "protocol",
            Self::Parse(_) => "parse",
        }
    }
}

/// Where the orchestrator gets weather payloads from
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, beach_id: &str) -> Result<WeatherEnvelope, FetchError>;
}

/// `WeatherSource` backed by `GET {base}/api/weather/{beachId}`
pub struct HttpWeatherSource {
    client: Client,
    base_url: Url,
}

impl HttpWeatherSource {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Endpoint for a beach, with the id percent-encoded as one path segment
    pub fn weather_url(&self, beach_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "weather", beach_id]);
        }
        url
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherSource {
    async fn fetch(&self, beach_id: &str) -> Result<WeatherEnvelope, FetchError> {
        let url = self.weather_url(beach_id);
        tracing::debug!(beach = %beach_id, url = %url, "Fetching weather from backend");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: WeatherEnvelope =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        validate_envelope(&envelope, beach_id)?;

        Ok(envelope)
    }
}

/// Checks a decoded payload beyond what its types enforce
fn validate_envelope(envelope: &WeatherEnvelope, beach_id: &str) -> Result<(), FetchError> {
    if envelope.beach != beach_id || envelope.data.beach != beach_id {
        return Err(FetchError::Parse(format!(
            "payload is for {}, expected {}",
            envelope.beach, beach_id
        )));
    }

    if envelope.data.beach_score > 100 {
        return Err(FetchError::Parse(format!(
            "beach_score {} is outside 0..=100",
            envelope.data.beach_score
        )));
    }

    if let Some(best_time) = &envelope.data.best_time {
        if !is_hour_label(best_time) {
            return Err(FetchError::Parse(format!(
                "best_time {best_time:?} is not HH:MM"
            )));
        }
    }

    Ok(())
}

fn is_hour_label(label: &str) -> bool {
    label.len() == 5 && NaiveTime::parse_from_str(label, "%H:%M").is_ok()
}
