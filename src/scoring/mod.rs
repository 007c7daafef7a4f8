mod activity;
mod criteria;
mod engine;
mod observation;

pub use activity::{suitable_activities, Activity, ActivityThresholds};
pub use criteria::{BandTier, Metric, MetricBands, RatingBand, RatingCriteria};
pub use engine::{
    compute_score, BeachScore, HourScore, MetricContribution, ScoreEngine, ScoreTier,
};
pub use observation::{BeachObservation, HourReading};
