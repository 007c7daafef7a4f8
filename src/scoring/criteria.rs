use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rating tier of a single band, ordered from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BandTier {
    Excellent,
    Good,
    Acceptable,
}

impl BandTier {
    /// Evaluation order: most restrictive first
    pub const ORDER: [BandTier; 3] = [BandTier::Excellent, BandTier::Good, BandTier::Acceptable];
}

/// A numeric range with a weight. Both bounds are inclusive and optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Relative weight. Scores are scaled so the excellent weights of all
    /// metrics add up to 100 points.
    pub weight: f64,
}

impl RatingBand {
    pub const fn new(min: Option<f64>, max: Option<f64>, weight: f64) -> Self {
        Self { min, max, weight }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Points this band is worth on the 0..=100 scale, given the sum of the
    /// excellent weights of all metrics
    pub fn points(&self, total_weight: f64) -> f64 {
        if total_weight <= 0.0 || !total_weight.is_finite() {
            return 0.0;
        }
        (self.weight.max(0.0) / total_weight * 100.0).min(100.0)
    }
}

/// The three bands of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricBands {
    pub excellent: RatingBand,
    pub good: RatingBand,
    pub acceptable: RatingBand,
}

impl MetricBands {
    pub fn band(&self, tier: BandTier) -> &RatingBand {
        match tier {
            BandTier::Excellent => &self.excellent,
            BandTier::Good => &self.good,
            BandTier::Acceptable => &self.acceptable,
        }
    }

    /// Most restrictive band containing `value`, if any
    pub fn classify(&self, value: Option<f64>) -> Option<(BandTier, &RatingBand)> {
        let value = value?;
        BandTier::ORDER
            .into_iter()
            .map(|tier| (tier, self.band(tier)))
            .find(|(_, band)| band.contains(value))
    }
}

/// Scored metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temperature,
    Wind,
    Precipitation,
    Uv,
    Clouds,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Temperature,
        Metric::Wind,
        Metric::Precipitation,
        Metric::Uv,
        Metric::Clouds,
    ];

    /// German display name used in recommendation reasons
    pub fn label_de(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperatur",
            Metric::Wind => "Wind",
            Metric::Precipitation => "Niederschlag",
            Metric::Uv => "UV-Index",
            Metric::Clouds => "Bewölkung",
        }
    }
}

/// Rating tables for every metric.
///
/// Defaults match the hand-maintained table of the dashboard config and can be
/// overridden from the `[rating]` section of the app config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingCriteria {
    pub temperature: MetricBands,
    pub wind: MetricBands,
    pub precipitation: MetricBands,
    pub uv: MetricBands,
    pub clouds: MetricBands,
}

impl RatingCriteria {
    pub fn bands(&self, metric: Metric) -> &MetricBands {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Wind => &self.wind,
            Metric::Precipitation => &self.precipitation,
            Metric::Uv => &self.uv,
            Metric::Clouds => &self.clouds,
        }
    }

    /// Sum of all excellent-tier weights (1.0 for the default tables)
    pub fn max_weight(&self) -> f64 {
        Metric::ALL
            .iter()
            .map(|m| self.bands(*m).excellent.weight.max(0.0))
            .sum()
    }
}

impl Default for RatingCriteria {
    fn default() -> Self {
        Self {
            temperature: MetricBands {
                excellent: RatingBand::new(Some(24.0), Some(28.0), 0.30),
                good: RatingBand::new(Some(20.0), Some(32.0), 0.20),
                acceptable: RatingBand::new(Some(16.0), Some(35.0), 0.10),
            },
            wind: MetricBands {
                excellent: RatingBand::new(Some(5.0), Some(15.0), 0.20),
                good: RatingBand::new(Some(0.0), Some(25.0), 0.10),
                acceptable: RatingBand::new(Some(0.0), Some(35.0), 0.05),
            },
            precipitation: MetricBands {
                excellent: RatingBand::new(None, Some(10.0), 0.25),
                good: RatingBand::new(None, Some(30.0), 0.15),
                acceptable: RatingBand::new(None, Some(50.0), 0.05),
            },
            uv: MetricBands {
                excellent: RatingBand::new(Some(3.0), Some(6.0), 0.15),
                good: RatingBand::new(Some(1.0), Some(8.0), 0.10),
                acceptable: RatingBand::new(Some(0.0), Some(10.0), 0.05),
            },
            clouds: MetricBands {
                excellent: RatingBand::new(None, Some(30.0), 0.10),
                good: RatingBand::new(None, Some(60.0), 0.05),
                acceptable: RatingBand::new(None, Some(100.0), 0.02),
            },
        }
    }
}
