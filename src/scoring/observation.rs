use chrono::{NaiveDateTime, Timelike};

use crate::weather::models::{Forecast, Marine};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Hourly weather and marine readings for one beach, aligned by index.
///
/// Index 0 is the first hour of the series. Series may differ in length;
/// a reading beyond the end of its series counts as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeachObservation {
    /// Local ISO timestamps (`YYYY-MM-DDTHH:MM`)
    pub time: Vec<String>,
    /// Air temperature in °C
    pub air_temperature: Vec<Option<f64>>,
    /// Sea surface temperature in °C
    pub water_temperature: Vec<Option<f64>>,
    /// Wind speed in km/h
    pub wind_speed: Vec<Option<f64>>,
    /// Precipitation probability in %
    pub precipitation_probability: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
    /// Cloud cover in %
    pub cloud_cover: Vec<Option<f64>>,
    /// Wave height in m
    pub wave_height: Vec<Option<f64>>,
}

/// All readings for a single hour
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HourReading {
    pub air_temperature: Option<f64>,
    pub water_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub uv_index: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wave_height: Option<f64>,
}

fn at(series: &[Option<f64>], index: usize) -> Option<f64> {
    series
        .get(index)
        .copied()
        .flatten()
        .filter(|v| v.is_finite())
}

impl BeachObservation {
    /// Build an observation from a backend payload
    pub fn from_payload(forecast: &Forecast, marine: &Marine) -> Self {
        let hourly = &forecast.hourly;
        Self {
            time: hourly.time.clone(),
            air_temperature: hourly.temperature_2m.clone(),
            water_temperature: marine.hourly.sea_surface_temperature.clone(),
            wind_speed: hourly.wind_speed_10m.clone(),
            precipitation_probability: hourly.precipitation_probability.clone(),
            uv_index: hourly.uv_index.clone(),
            cloud_cover: hourly.cloud_cover.clone(),
            wave_height: marine.hourly.wave_height.clone(),
        }
    }

    /// Number of hours, i.e. the length of the longest series
    pub fn len(&self) -> usize {
        [
            self.time.len(),
            self.air_temperature.len(),
            self.water_temperature.len(),
            self.wind_speed.len(),
            self.precipitation_probability.len(),
            self.uv_index.len(),
            self.cloud_cover.len(),
            self.wave_height.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hour(&self, index: usize) -> HourReading {
        HourReading {
            air_temperature: at(&self.air_temperature, index),
            water_temperature: at(&self.water_temperature, index),
            wind_speed: at(&self.wind_speed, index),
            precipitation_probability: at(&self.precipitation_probability, index),
            uv_index: at(&self.uv_index, index),
            cloud_cover: at(&self.cloud_cover, index),
            wave_height: at(&self.wave_height, index),
        }
    }

    /// `HH:MM` label of an hour.
    ///
    /// Falls back to the hour offset from the series start when the
    /// timestamp is missing or unparseable.
    pub fn hour_label(&self, index: usize) -> String {
        self.time
            .get(index)
            .and_then(|t| NaiveDateTime::parse_from_str(t, TIME_FORMAT).ok())
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| format!("{:02}:00", index % 24))
    }

    /// Index of the hour containing `now`: the number of leading hours that
    /// lie entirely in the past.
    ///
    /// Stops at the first unparseable timestamp. Returns 0 when every hour is
    /// in the past, so stale data still scores from its first hour.
    pub fn index_of(&self, now: NaiveDateTime) -> usize {
        let current_hour = now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);

        let skip = self
            .time
            .iter()
            .take_while(|t| {
                NaiveDateTime::parse_from_str(t, TIME_FORMAT).is_ok_and(|t| t < current_hour)
            })
            .count();

        if skip >= self.len() {
            0
        } else {
            skip
        }
    }

    /// Drop every hour before the hour containing `now`, so index 0 is "now"
    pub fn starting_at(&self, now: NaiveDateTime) -> Self {
        let skip = self.index_of(now);
        if skip == 0 {
            return self.clone();
        }

        let tail = |series: &[Option<f64>]| -> Vec<Option<f64>> {
            series.iter().skip(skip).copied().collect()
        };
        Self {
            time: self.time.iter().skip(skip).cloned().collect(),
            air_temperature: tail(&self.air_temperature),
            water_temperature: tail(&self.water_temperature),
            wind_speed: tail(&self.wind_speed),
            precipitation_probability: tail(&self.precipitation_probability),
            uv_index: tail(&self.uv_index),
            cloud_cover: tail(&self.cloud_cover),
            wave_height: tail(&self.wave_height),
        }
    }
}
