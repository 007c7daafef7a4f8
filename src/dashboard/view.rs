use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

use crate::beaches::BeachConfig;
use crate::scoring::{BeachObservation, ScoreTier};
use crate::weather::describe_weather_code;
use crate::weather::models::{DailyForecast, WeatherEnvelope};

const FORECAST_DAYS: usize = 3;

/// Everything the dashboard shows for one beach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub beach: BeachHeader,
    /// Showing fallback data
    pub offline: bool,
    /// Backend served the payload from its cache
    pub cached: bool,
    pub score: ScoreCard,
    pub conditions: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeachHeader {
    pub id: String,
    pub name: String,
    pub description: String,
    pub background_image: Option<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub score: u8,
    pub tier: ScoreTier,
    pub label: &'static str,
    pub best_time: Option<String>,
}

/// Readings of the current hour, rounded for display
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CurrentConditions {
    pub time: Option<String>,
    pub air_temperature: Option<i32>,
    pub water_temperature: Option<i32>,
    pub wind_speed: Option<i32>,
    pub uv_index: Option<i32>,
    pub precipitation_probability: Option<i32>,
    /// Metres, one decimal
    pub wave_height: Option<f64>,
    pub weather: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: String,
    /// "Heute" for the first day, otherwise e.g. "Fr, 18."
    pub label: String,
    pub weather_code: Option<u16>,
    pub description: &'static str,
    pub temp_max: Option<i32>,
    pub temp_min: Option<i32>,
    pub uv_index_max: Option<f64>,
    pub precipitation_sum: Option<f64>,
}

impl DashboardView {
    /// Build the view for a payload; `meta` is `None` for beaches outside the catalog
    pub fn build(
        envelope: &WeatherEnvelope,
        meta: Option<&BeachConfig>,
        offline: bool,
        now: NaiveDateTime,
    ) -> Self {
        let data = &envelope.data;
        let tier = ScoreTier::from_score(data.beach_score);

        Self {
            beach: header(&envelope.beach, meta),
            offline,
            cached: envelope.cached,
            score: ScoreCard {
                score: data.beach_score,
                tier,
                label: tier.label_de(),
                best_time: data.best_time.clone(),
            },
            conditions: current_conditions(envelope, now),
            forecast: forecast_days(&data.forecast.daily),
        }
    }
}

fn header(beach_id: &str, meta: Option<&BeachConfig>) -> BeachHeader {
    match meta {
        Some(beach) => BeachHeader {
            id: beach.id.clone(),
            name: beach.name.clone(),
            description: beach.description.clone(),
            background_image: Some(beach.background_image.clone()),
            features: beach.features.clone(),
        },
        None => BeachHeader {
            id: beach_id.to_string(),
            name: beach_id.to_string(),
            description: String::new(),
            background_image: None,
            features: Vec::new(),
        },
    }
}

fn current_conditions(envelope: &WeatherEnvelope, now: NaiveDateTime) -> CurrentConditions {
    let data = &envelope.data;
    let observation = BeachObservation::from_payload(&data.forecast, &data.marine);
    if observation.is_empty() {
        return CurrentConditions::default();
    }

    let index = observation.index_of(now);
    let reading = observation.hour(index);
    let weather_code = data
        .forecast
        .hourly
        .weather_code
        .get(index)
        .copied()
        .flatten();

    CurrentConditions {
        time: Some(observation.hour_label(index)),
        air_temperature: reading.air_temperature.map(round),
        water_temperature: reading.water_temperature.map(round),
        wind_speed: reading.wind_speed.map(round),
        uv_index: reading.uv_index.map(round),
        precipitation_probability: reading.precipitation_probability.map(round),
        wave_height: reading.wave_height.map(|h| (h * 10.0).round() / 10.0),
        weather: weather_code.map(describe_weather_code),
    }
}

fn forecast_days(daily: &DailyForecast) -> Vec<ForecastDay> {
    let finite = |series: &[Option<f64>], i: usize| {
        series.get(i).copied().flatten().filter(|v| v.is_finite())
    };

    daily
        .time
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(i, date)| {
            let weather_code = daily.weather_code.get(i).copied().flatten();
            ForecastDay {
                date: date.clone(),
                label: day_label(date, i == 0),
                weather_code,
                description: weather_code.map_or("Unbekannt", describe_weather_code),
                temp_max: finite(&daily.temperature_2m_max, i).map(round),
                temp_min: finite(&daily.temperature_2m_min, i).map(round),
                uv_index_max: finite(&daily.uv_index_max, i),
                precipitation_sum: finite(&daily.precipitation_sum, i),
            }
        })
        .collect()
}

fn day_label(date: &str, is_today: bool) -> String {
    if is_today {
        return "Heute".to_string();
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(day) => format!("{}, {}.", weekday_de(day.weekday()), day.day()),
        Err(_) => date.to_string(),
    }
}

fn weekday_de(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Di",
        Weekday::Wed => "Mi",
        Weekday::Thu => "Do",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "So",
    }
}

fn round(value: f64) -> i32 {
    value.round() as i32
}
