use chrono::{Duration, NaiveDateTime, Timelike};
use std::sync::Arc;

use crate::beaches::{BeachCatalog, BeachConfig};
use crate::scoring::ScoreEngine;
use crate::weather::models::{
    BeachWeather, DailyForecast, Forecast, HourlyForecast, Marine, MarineHourly, WeatherEnvelope,
};

const FALLBACK_HOURS: i64 = 72;
const FALLBACK_DAYS: i64 = 3;
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Placeholder payloads for catalog beaches, shown while loading and
/// whenever the backend is unreachable
#[derive(Debug, Clone)]
pub struct FallbackData {
    catalog: Arc<BeachCatalog>,
    engine: ScoreEngine,
}

impl FallbackData {
    pub fn new(catalog: Arc<BeachCatalog>, engine: ScoreEngine) -> Self {
        Self { catalog, engine }
    }

    /// Fallback for a beach, `None` for ids outside the catalog
    pub fn payload_for(&self, beach_id: &str, now: NaiveDateTime) -> Option<WeatherEnvelope> {
        self.catalog
            .get_beach_meta(beach_id)
            .map(|beach| fallback_payload(beach, now, &self.engine))
    }
}

/// A typical Baltic summer day, repeated from the hour containing `now`.
/// Temperature peaks at 15:00 and UV at 13:00; everything else is constant.
pub fn fallback_payload(
    beach: &BeachConfig,
    now: NaiveDateTime,
    engine: &ScoreEngine,
) -> WeatherEnvelope {
    let start = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    let hours: Vec<NaiveDateTime> = (0..FALLBACK_HOURS)
        .map(|i| start + Duration::hours(i))
        .collect();
    let time: Vec<String> = hours
        .iter()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .collect();
    let per_hour = |f: fn(u32) -> f64| -> Vec<Option<f64>> {
        hours.iter().map(|t| Some(f(t.hour()))).collect()
    };
    let constant = |value: f64| -> Vec<Option<f64>> { vec![Some(value); hours.len()] };

    let hourly = HourlyForecast {
        time: time.clone(),
        temperature_2m: per_hour(air_temperature),
        relative_humidity_2m: constant(70.0),
        apparent_temperature: per_hour(air_temperature),
        precipitation_probability: constant(15.0),
        precipitation: constant(0.0),
        weather_code: vec![Some(2); hours.len()],
        cloud_cover: constant(40.0),
        wind_speed_10m: constant(12.0),
        wind_direction_10m: constant(270.0),
        uv_index: per_hour(uv_index),
        is_day: hours
            .iter()
            .map(|t| Some(u8::from((6..=20).contains(&t.hour()))))
            .collect(),
    };

    let dates: Vec<String> = (0..FALLBACK_DAYS)
        .map(|d| (start.date() + Duration::days(d)).format("%Y-%m-%d").to_string())
        .collect();
    let days = dates.len();
    let daily = DailyForecast {
        time: dates.clone(),
        weather_code: vec![Some(2); days],
        temperature_2m_max: vec![Some(24.0); days],
        temperature_2m_min: vec![Some(16.0); days],
        apparent_temperature_max: vec![Some(24.0); days],
        apparent_temperature_min: vec![Some(16.0); days],
        sunrise: dates.iter().map(|d| Some(format!("{d}T05:00"))).collect(),
        sunset: dates.iter().map(|d| Some(format!("{d}T21:30"))).collect(),
        uv_index_max: vec![Some(6.0); days],
        precipitation_sum: vec![Some(0.5); days],
        rain_sum: vec![Some(0.5); days],
        wind_speed_10m_max: vec![Some(18.0); days],
        wind_direction_10m_dominant: vec![Some(270.0); days],
    };

    let forecast = Forecast {
        latitude: beach.coordinates.latitude,
        longitude: beach.coordinates.longitude,
        timezone: Some("Europe/Berlin".to_string()),
        hourly,
        daily,
    };
    let marine = Marine {
        latitude: Some(beach.coordinates.latitude),
        longitude: Some(beach.coordinates.longitude),
        hourly: MarineHourly {
            time,
            wave_height: constant(0.4),
            wave_direction: constant(270.0),
            wave_period: constant(4.0),
            sea_surface_temperature: constant(18.0),
        },
    };

    let observation = crate::scoring::BeachObservation::from_payload(&forecast, &marine);
    let score = engine.compute_score(&observation, None);

    WeatherEnvelope {
        beach: beach.id.clone(),
        cached: false,
        data: BeachWeather {
            beach: beach.id.clone(),
            beach_score: score.score,
            best_time: score.best_time,
            forecast,
            marine,
            timestamp: None,
        },
    }
}

fn air_temperature(hour: u32) -> f64 {
    24.0 - (f64::from(hour) - 15.0).abs() * 0.6
}

fn uv_index(hour: u32) -> f64 {
    if (6..=20).contains(&hour) {
        (6.0 - (f64::from(hour) - 13.0).abs() * 0.9).max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 17)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn fallback() -> FallbackData {
        FallbackData::new(Arc::new(BeachCatalog::builtin()), ScoreEngine::default())
    }

    #[test]
    fn test_payload_for_catalog_beach() {
        let payload = fallback().payload_for("Binz", at(9, 30)).unwrap();

        assert_eq!(payload.beach, "Binz");
        assert_eq!(payload.data.beach, "Binz");
        assert!(!payload.cached);
        assert_eq!(payload.data.forecast.hourly.time[0], "2025-07-17T09:00");
        assert_eq!(payload.data.forecast.hourly.time.len(), 72);
        assert_eq!(payload.data.forecast.daily.time.len(), 3);
        assert_eq!(payload.data.forecast.daily.time[0], "2025-07-17");
    }

    #[test]
    fn test_payload_for_unknown_beach() {
        assert!(fallback().payload_for("Atlantis", at(9, 0)).is_none());
        assert!(fallback().payload_for("Sellin", at(9, 0)).is_some());
    }

    #[test]
    fn test_fallback_is_scored_locally() {
        let payload = fallback().payload_for("Binz", at(15, 0)).unwrap();

        // 15:00: 24 °C, wind 12, rain 15 %, UV 4.2, clouds 40 %
        // 30 + 20 + 15 + 15 + 5
        assert_eq!(payload.data.beach_score, 85);
        assert_eq!(payload.data.best_time.as_deref(), Some("15:00"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback().payload_for("Göhren", at(11, 0)).unwrap();
        let b = fallback().payload_for("Göhren", at(11, 0)).unwrap();
        assert_eq!(a, b);
    }
}
