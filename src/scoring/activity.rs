use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::observation::HourReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Sunbathing,
    Swimming,
    Surfing,
    Family,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Sunbathing,
        Activity::Swimming,
        Activity::Surfing,
        Activity::Family,
    ];

    pub fn label_de(self) -> &'static str {
        match self {
            Activity::Sunbathing => "Sonnenbaden",
            Activity::Swimming => "Schwimmen",
            Activity::Surfing => "Surfen",
            Activity::Family => "Familienausflug",
        }
    }

    pub fn thresholds(self) -> ActivityThresholds {
        match self {
            Activity::Sunbathing => ActivityThresholds {
                min_temp: Some(22.0),
                max_wind: Some(20.0),
                max_precipitation: Some(20.0),
                min_uv: Some(4.0),
                max_clouds: Some(40.0),
                ..Default::default()
            },
            Activity::Swimming => ActivityThresholds {
                min_temp: Some(18.0),
                min_water_temp: Some(16.0),
                max_wind: Some(25.0),
                max_precipitation: Some(30.0),
                max_waves: Some(1.5),
                ..Default::default()
            },
            Activity::Surfing => ActivityThresholds {
                min_wind: Some(15.0),
                max_wind: Some(35.0),
                min_waves: Some(0.8),
                max_precipitation: Some(50.0),
                ..Default::default()
            },
            Activity::Family => ActivityThresholds {
                min_temp: Some(20.0),
                max_wind: Some(20.0),
                max_precipitation: Some(20.0),
                max_uv: Some(7.0),
                ..Default::default()
            },
        }
    }
}

/// Limits an hour has to satisfy for an activity. `None` means unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityThresholds {
    pub min_temp: Option<f64>,
    pub min_water_temp: Option<f64>,
    pub min_wind: Option<f64>,
    pub max_wind: Option<f64>,
    pub max_precipitation: Option<f64>,
    pub min_uv: Option<f64>,
    pub max_uv: Option<f64>,
    pub max_clouds: Option<f64>,
    pub min_waves: Option<f64>,
    pub max_waves: Option<f64>,
}

fn at_least(limit: Option<f64>, value: Option<f64>) -> bool {
    match limit {
        None => true,
        Some(limit) => value.is_some_and(|v| v >= limit),
    }
}

fn at_most(limit: Option<f64>, value: Option<f64>) -> bool {
    match limit {
        None => true,
        Some(limit) => value.is_some_and(|v| v <= limit),
    }
}

impl ActivityThresholds {
    /// Every declared limit must hold; a missing reading fails its limit
    pub fn is_met_by(&self, reading: &HourReading) -> bool {
        at_least(self.min_temp, reading.air_temperature)
            && at_least(self.min_water_temp, reading.water_temperature)
            && at_least(self.min_wind, reading.wind_speed)
            && at_most(self.max_wind, reading.wind_speed)
            && at_most(self.max_precipitation, reading.precipitation_probability)
            && at_least(self.min_uv, reading.uv_index)
            && at_most(self.max_uv, reading.uv_index)
            && at_most(self.max_clouds, reading.cloud_cover)
            && at_least(self.min_waves, reading.wave_height)
            && at_most(self.max_waves, reading.wave_height)
    }
}

/// Activities whose thresholds the hour satisfies, in declaration order
pub fn suitable_activities(reading: &HourReading) -> Vec<Activity> {
    Activity::ALL
        .into_iter()
        .filter(|a| a.thresholds().is_met_by(reading))
        .collect()
}
