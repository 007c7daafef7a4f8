use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// How well the beach is sheltered from wind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WindProtection {
    Good,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Excellent,
    Good,
    Moderate,
}

/// Static description of one beach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BeachConfig {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub description: String,
    pub background_image: String,
    /// Average visitor rating, 0..=5
    pub user_rating: f32,
    pub features: Vec<String>,
    pub beach_type: String,
    pub wind_protection: WindProtection,
    pub accessibility: Accessibility,
}

/// Compact listing entry returned by `GET /api/beaches`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BeachSummary {
    pub id: String,
    pub name: String,
    pub coordinates: SummaryCoordinates,
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SummaryCoordinates {
    pub lat: f64,
    pub lon: f64,
}

impl From<&BeachConfig> for BeachSummary {
    fn from(beach: &BeachConfig) -> Self {
        Self {
            id: beach.id.clone(),
            name: beach.name.clone(),
            coordinates: SummaryCoordinates {
                lat: beach.coordinates.latitude,
                lon: beach.coordinates.longitude,
            },
            description: beach.description.clone(),
            features: beach.features.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BeachListResponse {
    pub region: String,
    pub beaches: Vec<BeachSummary>,
}
