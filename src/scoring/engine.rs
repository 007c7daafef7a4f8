use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::criteria::{BandTier, Metric, RatingCriteria};
use super::observation::{BeachObservation, HourReading};

/// Result of scoring an observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BeachScore {
    /// Composite favorability, 0..=100
    pub score: u8,
    /// `HH:MM` of the most favorable hour
    pub best_time: Option<String>,
}

impl BeachScore {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score)
    }
}

/// Qualitative view of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            40..=59 => ScoreTier::Acceptable,
            _ => ScoreTier::Poor,
        }
    }

    pub fn label_de(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Perfekt",
            ScoreTier::Good => "Gut",
            ScoreTier::Acceptable => "Okay",
            ScoreTier::Poor => "Schlecht",
        }
    }
}

/// Contribution of one metric to an hour's score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricContribution {
    pub metric: Metric,
    pub tier: Option<BandTier>,
    pub points: f64,
}

/// Per-metric breakdown of one hour
#[derive(Debug, Clone, PartialEq)]
pub struct HourScore {
    pub contributions: Vec<MetricContribution>,
}

impl HourScore {
    /// Hour total, rounded and clamped to 0..=100
    pub fn total(&self) -> u8 {
        let sum: f64 = self.contributions.iter().map(|c| c.points).sum();
        sum.round().clamp(0.0, 100.0) as u8
    }

    /// Metrics that landed in their excellent band
    pub fn excellent_metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.contributions
            .iter()
            .filter(|c| c.tier == Some(BandTier::Excellent))
            .map(|c| c.metric)
    }
}

fn reading_for(metric: Metric, reading: &HourReading) -> Option<f64> {
    match metric {
        Metric::Temperature => reading.air_temperature,
        Metric::Wind => reading.wind_speed,
        Metric::Precipitation => reading.precipitation_probability,
        Metric::Uv => reading.uv_index,
        Metric::Clouds => reading.cloud_cover,
    }
}

/// Scores observations against a set of rating tables. Pure and infallible.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    criteria: RatingCriteria,
}

impl ScoreEngine {
    pub fn new(criteria: RatingCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &RatingCriteria {
        &self.criteria
    }

    pub fn score_hour(&self, reading: &HourReading) -> HourScore {
        let total_weight = self.criteria.max_weight();
        let contributions = Metric::ALL
            .into_iter()
            .map(|metric| {
                let matched = self
                    .criteria
                    .bands(metric)
                    .classify(reading_for(metric, reading));
                MetricContribution {
                    metric,
                    tier: matched.map(|(tier, _)| tier),
                    points: matched.map_or(0.0, |(_, band)| band.points(total_weight)),
                }
            })
            .collect();

        HourScore { contributions }
    }

    /// Score an observation.
    ///
    /// With `hour_index` the score of that hour is returned and no best time.
    /// Without it, `score` is the score of index 0 ("now") and `best_time`
    /// labels the highest-scoring hour, earliest first on ties.
    pub fn compute_score(
        &self,
        observation: &BeachObservation,
        hour_index: Option<usize>,
    ) -> BeachScore {
        if let Some(index) = hour_index {
            return BeachScore {
                score: self.score_hour(&observation.hour(index)).total(),
                best_time: None,
            };
        }

        let totals: Vec<u8> = (0..observation.len())
            .map(|i| self.score_hour(&observation.hour(i)).total())
            .collect();

        let Some(&now) = totals.first() else {
            return BeachScore {
                score: 0,
                best_time: None,
            };
        };

        let mut best = 0;
        for (i, total) in totals.iter().enumerate() {
            if *total > totals[best] {
                best = i;
            }
        }

        BeachScore {
            score: now,
            best_time: Some(observation.hour_label(best)),
        }
    }
}

/// Score with the default rating tables
pub fn compute_score(observation: &BeachObservation, hour_index: Option<usize>) -> BeachScore {
    ScoreEngine::default().compute_score(observation, hour_index)
}
