use axum::http::StatusCode;
use chrono::{NaiveDateTime, Utc};
use indexmap::IndexMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::codes::describe_weather_code;
use super::models::*;
use crate::beaches::{BeachCatalog, BeachConfig, CatalogError, Coordinates};
use crate::cache::{beach_cache_key, WeatherCache};
use crate::config::AppConfig;
use crate::error::HttpError;
use crate::impl_into_response;
use crate::scoring::{suitable_activities, BeachObservation, BeachScore, ScoreEngine};

const FORECAST_HOURLY: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation_probability,precipitation,weather_code,cloud_cover,wind_speed_10m,\
wind_direction_10m,uv_index,is_day";

const FORECAST_DAILY: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,apparent_temperature_min,sunrise,sunset,uv_index_max,\
precipitation_sum,rain_sum,wind_speed_10m_max,wind_direction_10m_dominant";

const MARINE_HOURLY: &str = "wave_height,wave_direction,wave_period,sea_surface_temperature";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to fetch weather data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Beach not found: {0}")]
    BeachNotFound(String),

    #[error("Upstream {api} API error (HTTP {status}): {message}")]
    UpstreamStatus {
        api: &'static str,
        status: u16,
        message: String,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BeachNotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(e) => e.status_code(),
            Self::RequestError(_) | Self::UpstreamStatus { .. } | Self::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BeachNotFound(_) => "BEACH_NOT_FOUND",
            Self::Catalog(e) => e.error_code(),
            Self::RequestError(_) => "REQUEST_ERROR",
            Self::UpstreamStatus { .. } => "UPSTREAM_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

impl_into_response!(WeatherError);

/// Fetches Open-Meteo forecast and marine data per beach, scores it and
/// caches the result.
pub struct WeatherService {
    client: Client,
    forecast_url: String,
    marine_url: String,
    timezone: chrono_tz::Tz,
    forecast_days: u8,
    engine: ScoreEngine,
    cache: WeatherCache,
}

impl WeatherService {
    pub fn new(client: Client, config: &AppConfig, cache: WeatherCache) -> Self {
        Self {
            client,
            forecast_url: config.forecast_api_url.clone(),
            marine_url: config.marine_api_url.clone(),
            timezone: config.tz(),
            forecast_days: config.forecast_days,
            engine: ScoreEngine::new(config.rating.clone()),
            cache,
        }
    }

    /// Current local wall-clock time at the beaches
    fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }

    /// Scored weather for a beach, served from cache when fresh
    pub async fn get_beach_weather(
        &self,
        beach: &BeachConfig,
    ) -> Result<WeatherEnvelope, WeatherError> {
        let key = beach_cache_key(&beach.id);

        if let Some(data) = self.cache.get(&key) {
            tracing::debug!(beach = %beach.id, "Weather cache hit");
            metrics::counter!("strandwetter_cache_hits_total").increment(1);
            return Ok(WeatherEnvelope {
                beach: beach.id.clone(),
                cached: true,
                data,
            });
        }

        tracing::debug!(beach = %beach.id, "Weather cache miss");
        let data = self.fetch_beach_weather(beach).await?;
        self.cache.insert(key, data.clone());

        Ok(WeatherEnvelope {
            beach: beach.id.clone(),
            cached: false,
            data,
        })
    }

    /// Fetch forecast and marine data concurrently and score them
    pub async fn fetch_beach_weather(
        &self,
        beach: &BeachConfig,
    ) -> Result<BeachWeather, WeatherError> {
        tracing::debug!(
            beach = %beach.id,
            lat = %beach.coordinates.latitude,
            lon = %beach.coordinates.longitude,
            "Fetching beach weather"
        );

        let (forecast, marine) = tokio::try_join!(
            self.fetch_forecast(&beach.coordinates),
            self.fetch_marine(&beach.coordinates)
        )?;

        let score = self.score(&forecast, &marine, self.local_now());

        tracing::info!(
            beach = %beach.id,
            score = score.score,
            best_time = ?score.best_time,
            "Beach weather fetched successfully"
        );

        Ok(BeachWeather {
            beach: beach.id.clone(),
            beach_score: score.score,
            best_time: score.best_time,
            forecast,
            marine,
            timestamp: Some(Utc::now()),
        })
    }

    /// Score a payload from the hour containing `now` onwards
    pub fn score(&self, forecast: &Forecast, marine: &Marine, now: NaiveDateTime) -> BeachScore {
        let observation = BeachObservation::from_payload(forecast, marine).starting_at(now);
        self.engine.compute_score(&observation, None)
    }

    /// Every catalog beach, with per-beach errors instead of failing the lot
    pub async fn get_all_beaches_weather(
        &self,
        catalog: &BeachCatalog,
    ) -> IndexMap<String, BeachWeatherResult> {
        let mut results = IndexMap::new();
        for beach in catalog.all() {
            let result = match self.get_beach_weather(beach).await {
                Ok(envelope) => BeachWeatherResult::Ok(Box::new(envelope.data)),
                Err(e) => {
                    tracing::warn!(beach = %beach.id, error = %e, "Failed to fetch beach weather");
                    BeachWeatherResult::Err {
                        error: e.to_string(),
                    }
                }
            };
            results.insert(beach.id.clone(), result);
        }
        results
    }

    /// Beaches of a region ranked by score, highest first
    pub async fn get_recommendations(
        &self,
        catalog: &BeachCatalog,
        region: &str,
    ) -> Result<Vec<Recommendation>, WeatherError> {
        let beaches = catalog.available_beaches(region)?;
        let now = self.local_now();

        let mut recommendations = Vec::with_capacity(beaches.len());
        for (id, beach) in beaches {
            let recommendation = match self.get_beach_weather(beach).await {
                Ok(envelope) => self.recommend(&envelope.data, now),
                Err(e) => {
                    tracing::warn!(beach = %id, error = %e, "No recommendation for beach");
                    Recommendation {
                        beach: id.to_string(),
                        score: 0,
                        best_time: None,
                        current_temp: None,
                        current_weather: None,
                        reasons: Vec::new(),
                        activities: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            };
            recommendations.push(recommendation);
        }

        recommendations.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(recommendations)
    }

    /// Summarise the current hour of a scored payload
    pub fn recommend(&self, data: &BeachWeather, now: NaiveDateTime) -> Recommendation {
        let observation = BeachObservation::from_payload(&data.forecast, &data.marine);
        let index = observation.index_of(now);
        let reading = observation.hour(index);

        let reasons = self
            .engine
            .score_hour(&reading)
            .excellent_metrics()
            .map(|metric| format!("{} ideal", metric.label_de()))
            .collect();

        let current_weather = data
            .forecast
            .hourly
            .weather_code
            .get(index)
            .copied()
            .flatten()
            .map(|code| describe_weather_code(code).to_string());

        Recommendation {
            beach: data.beach.clone(),
            score: data.beach_score,
            best_time: data.best_time.clone(),
            current_temp: reading.air_temperature,
            current_weather,
            reasons,
            activities: suitable_activities(&reading),
            error: None,
        }
    }

    async fn fetch_forecast(&self, coordinates: &Coordinates) -> Result<Forecast, WeatherError> {
        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("hourly", FORECAST_HOURLY.to_string()),
                ("daily", FORECAST_DAILY.to_string()),
                ("timezone", self.timezone.name().to_string()),
                ("forecast_days", self.forecast_days.to_string()),
            ])
            .send()
            .await?;

        Self::parse_response(response, "forecast").await
    }

    async fn fetch_marine(&self, coordinates: &Coordinates) -> Result<Marine, WeatherError> {
        let response = self
            .client
            .get(&self.marine_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("hourly", MARINE_HOURLY.to_string()),
                ("timezone", self.timezone.name().to_string()),
                ("forecast_days", self.forecast_days.to_string()),
            ])
            .send()
            .await?;

        Self::parse_response(response, "marine").await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: Response,
        api: &'static str,
    ) -> Result<T, WeatherError> {
        let status = response.status();
        tracing::debug!(api, status = %status, "Received Open-Meteo response");

        if !status.is_success() {
            metrics::counter!("strandwetter_upstream_requests_total", "api" => api, "result" => "error")
                .increment(1);
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenMeteoError>(&text)
                .map(|e| e.reason)
                .unwrap_or(text);
            return Err(WeatherError::UpstreamStatus {
                api,
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body).map_err(|e| {
            metrics::counter!("strandwetter_upstream_requests_total", "api" => api, "result" => "invalid")
                .increment(1);
            WeatherError::InvalidResponse(format!("{} payload: {}", api, e))
        })?;

        metrics::counter!("strandwetter_upstream_requests_total", "api" => api, "result" => "ok")
            .increment(1);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::create_weather_cache;
    use std::time::Duration;

    fn service() -> WeatherService {
        WeatherService::new(
            Client::new(),
            &AppConfig::default(),
            create_weather_cache(Duration::from_secs(60)),
        )
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn hourly(values: &[(u32, f64, f64, f64, f64, f64)]) -> HourlyForecast {
        HourlyForecast {
            time: values
                .iter()
                .map(|(h, ..)| format!("2025-07-17T{:02}:00", h))
                .collect(),
            temperature_2m: values.iter().map(|v| Some(v.1)).collect(),
            relative_humidity_2m: Vec::new(),
            apparent_temperature: Vec::new(),
            precipitation_probability: values.iter().map(|v| Some(v.3)).collect(),
            precipitation: Vec::new(),
            weather_code: values.iter().map(|_| Some(1)).collect(),
            cloud_cover: values.iter().map(|v| Some(v.5)).collect(),
            wind_speed_10m: values.iter().map(|v| Some(v.2)).collect(),
            wind_direction_10m: Vec::new(),
            uv_index: values.iter().map(|v| Some(v.4)).collect(),
            is_day: Vec::new(),
        }
    }

    fn payload() -> (Forecast, Marine) {
        // (hour, temp, wind, precip, uv, clouds)
        let hourly = hourly(&[
            (8, 17.0, 20.0, 40.0, 1.0, 80.0),
            (9, 21.0, 12.0, 20.0, 2.0, 50.0),
            (10, 25.0, 10.0, 5.0, 4.0, 20.0),
            (11, 26.0, 9.0, 5.0, 5.0, 10.0),
        ]);
        let forecast = Forecast {
            latitude: 54.4,
            longitude: 13.6,
            timezone: Some("Europe/Berlin".to_string()),
            hourly,
            daily: DailyForecast {
                time: vec!["2025-07-17".to_string()],
                weather_code: vec![Some(1)],
                temperature_2m_max: vec![Some(26.0)],
                temperature_2m_min: vec![Some(16.0)],
                apparent_temperature_max: Vec::new(),
                apparent_temperature_min: Vec::new(),
                sunrise: Vec::new(),
                sunset: Vec::new(),
                uv_index_max: vec![Some(5.0)],
                precipitation_sum: vec![Some(0.0)],
                rain_sum: Vec::new(),
                wind_speed_10m_max: Vec::new(),
                wind_direction_10m_dominant: Vec::new(),
            },
        };
        let marine = Marine {
            latitude: Some(54.4),
            longitude: Some(13.6),
            hourly: MarineHourly {
                time: (8..12).map(|h| format!("2025-07-17T{:02}:00", h)).collect(),
                wave_height: vec![Some(0.3); 4],
                wave_direction: Vec::new(),
                wave_period: Vec::new(),
                sea_surface_temperature: vec![Some(19.0); 4],
            },
        };
        (forecast, marine)
    }

    #[test]
    fn test_score_starts_at_current_hour() {
        let service = service();
        let (forecast, marine) = payload();

        let early = service.score(&forecast, &marine, at("2025-07-17T08:15"));
        // acceptable temp 10, good wind 10, acceptable precip 5, good uv 10, acceptable clouds 2
        assert_eq!(early.score, 37);
        assert_eq!(early.best_time.as_deref(), Some("10:00"));

        let later = service.score(&forecast, &marine, at("2025-07-17T10:30"));
        assert_eq!(later.score, 100);
        assert_eq!(later.best_time.as_deref(), Some("10:00"));
    }

    #[test]
    fn test_recommend_current_hour() {
        let service = service();
        let (forecast, marine) = payload();
        let data = BeachWeather {
            beach: "Binz".to_string(),
            beach_score: 100,
            best_time: Some("10:00".to_string()),
            forecast,
            marine,
            timestamp: None,
        };

        let rec = service.recommend(&data, at("2025-07-17T10:05"));
        assert_eq!(rec.beach, "Binz");
        assert_eq!(rec.current_temp, Some(25.0));
        assert_eq!(rec.current_weather.as_deref(), Some("Überwiegend sonnig"));
        assert_eq!(rec.reasons.len(), 5);
        assert!(rec.reasons.contains(&"Temperatur ideal".to_string()));
        assert!(rec.activities.contains(&crate::scoring::Activity::Swimming));
        assert!(rec.error.is_none());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            WeatherError::BeachNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WeatherError::Catalog(CatalogError::NoBeachesConfigured("x".into())).error_code(),
            "NO_BEACHES_CONFIGURED"
        );
        assert_eq!(
            WeatherError::UpstreamStatus {
                api: "marine",
                status: 500,
                message: "down".into()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
