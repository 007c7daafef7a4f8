use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scoring::Activity;

// ============================================================================
// Open-Meteo payloads
// These mirror the upstream hourly/daily blocks and are passed through to
// clients unchanged. Core series are required so a schema mismatch fails
// deserialization instead of surfacing as missing data.
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub hourly: HourlyForecast,
    pub daily: DailyForecast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourlyForecast {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<u16>>,
    pub cloud_cover: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
    #[serde(default)]
    pub is_day: Vec<Option<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<u16>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    pub uv_index_max: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub rain_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m_dominant: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Marine {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub hourly: MarineHourly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarineHourly {
    pub time: Vec<String>,
    pub wave_height: Vec<Option<f64>>,
    #[serde(default)]
    pub wave_direction: Vec<Option<f64>>,
    #[serde(default)]
    pub wave_period: Vec<Option<f64>>,
    pub sea_surface_temperature: Vec<Option<f64>>,
}

/// Upstream error body, e.g. `{"error": true, "reason": "..."}`
#[derive(Debug, Deserialize)]
pub struct OpenMeteoError {
    pub reason: String,
}

// ============================================================================
// API Response Models (External - what we return to clients)
// ============================================================================

/// Scored weather for one beach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BeachWeather {
    pub beach: String,
    pub beach_score: u8,
    pub best_time: Option<String>,
    pub forecast: Forecast,
    pub marine: Marine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Body of `GET /api/weather/{beach}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherEnvelope {
    pub beach: String,
    pub cached: bool,
    pub data: BeachWeather,
}

/// One entry of `GET /api/weather`: data or the reason it is missing
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BeachWeatherResult {
    Ok(Box<BeachWeather>),
    Err { error: String },
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Recommendation {
    pub beach: String,
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weather: Option<String>,
    pub reasons: Vec<String>,
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationsResponse {
    pub region: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_accepts_open_meteo_shape() {
        let json = r#"{
            "latitude": 54.4, "longitude": 13.6, "generationtime_ms": 0.1,
            "timezone": "Europe/Berlin",
            "hourly_units": {"temperature_2m": "°C"},
            "hourly": {
                "time": ["2025-07-17T00:00", "2025-07-17T01:00"],
                "temperature_2m": [17.1, null],
                "precipitation_probability": [0, 5],
                "weather_code": [1, 3],
                "cloud_cover": [20, 40],
                "wind_speed_10m": [9.4, 10.1],
                "uv_index": [0.0, 0.0]
            },
            "daily": {
                "time": ["2025-07-17"],
                "weather_code": [3],
                "temperature_2m_max": [24.3],
                "temperature_2m_min": [15.2],
                "sunrise": ["2025-07-17T04:55"],
                "uv_index_max": [6.1],
                "precipitation_sum": [0.0]
            }
        }"#;

        let forecast: Forecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.hourly.temperature_2m, vec![Some(17.1), None]);
        assert_eq!(forecast.hourly.precipitation_probability[1], Some(5.0));
        assert_eq!(forecast.daily.weather_code, vec![Some(3)]);
        assert!(forecast.hourly.is_day.is_empty());
    }

    #[test]
    fn test_forecast_rejects_missing_core_series() {
        let json = r#"{
            "latitude": 54.4, "longitude": 13.6,
            "hourly": {"time": []},
            "daily": {"time": []}
        }"#;
        assert!(serde_json::from_str::<Forecast>(json).is_err());
    }

    #[test]
    fn test_weather_result_serializes_untagged() {
        let value = serde_json::to_value(BeachWeatherResult::Err {
            error: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"error": "boom"}));
    }
}
