use axum::http::StatusCode;
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;

use super::models::{Accessibility, BeachConfig, Coordinates, WindProtection};
use crate::error::HttpError;
use crate::impl_into_response;

/// Region used when none is requested or the requested one is unknown
pub const DEFAULT_REGION: &str = "default";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No beaches configured for region: {0}")]
    NoBeachesConfigured(String),
}

impl HttpError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoBeachesConfigured(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoBeachesConfigured(_) => "NO_BEACHES_CONFIGURED",
        }
    }
}

impl_into_response!(CatalogError);

/// Beach metadata plus the region → ordered beach id lookup.
///
/// Immutable once built; shared read-only between the API handlers and the
/// dashboard.
#[derive(Debug, Clone)]
pub struct BeachCatalog {
    beaches: IndexMap<String, BeachConfig>,
    regions: IndexMap<String, Vec<String>>,
}

impl BeachCatalog {
    pub fn new(
        beaches: impl IntoIterator<Item = BeachConfig>,
        regions: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Self {
        Self {
            beaches: beaches.into_iter().map(|b| (b.id.clone(), b)).collect(),
            regions: regions.into_iter().collect(),
        }
    }

    /// The Rügen beaches shipped with the service
    pub fn builtin() -> Self {
        let ruegen: Vec<String> = ["Binz", "Sellin", "Göhren", "Baabe"]
            .into_iter()
            .map(String::from)
            .collect();

        Self::new(
            builtin_beaches(),
            [
                (DEFAULT_REGION.to_string(), ruegen.clone()),
                ("ruegen".to_string(), ruegen),
            ],
        )
    }

    /// Add or replace regions, e.g. from the `[regions]` config section
    pub fn with_regions(mut self, extra: &HashMap<String, Vec<String>>) -> Self {
        for (name, ids) in extra {
            self.regions.insert(name.clone(), ids.clone());
        }
        self
    }

    /// Region name actually served for a request: unknown names map to the default
    pub fn resolve_region<'a>(&self, region: &'a str) -> &'a str {
        if self.regions.contains_key(region) {
            region
        } else {
            tracing::debug!(region = %region, "Unknown region, using default");
            DEFAULT_REGION
        }
    }

    /// Ordered beach ids configured for a region, resolved or not
    pub fn list_beaches(&self, region: &str) -> &[String] {
        self.regions
            .get(self.resolve_region(region))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get_beach_meta(&self, beach_id: &str) -> Option<&BeachConfig> {
        self.beaches.get(beach_id)
    }

    /// Beaches of a region that have metadata, in configured order.
    ///
    /// Ids without a `BeachConfig` are dropped silently. An empty result is
    /// the `NoBeachesConfigured` condition.
    pub fn available_beaches(
        &self,
        region: &str,
    ) -> Result<IndexMap<&str, &BeachConfig>, CatalogError> {
        let available: IndexMap<&str, &BeachConfig> = self
            .list_beaches(region)
            .iter()
            .filter_map(|id| {
                let meta = self.get_beach_meta(id);
                if meta.is_none() {
                    tracing::debug!(beach = %id, region = %region, "Dropping beach without metadata");
                }
                meta.map(|m| (id.as_str(), m))
            })
            .collect();

        if available.is_empty() {
            return Err(CatalogError::NoBeachesConfigured(region.to_string()));
        }
        Ok(available)
    }

    /// Every beach with metadata, regardless of region
    pub fn all(&self) -> impl Iterator<Item = &BeachConfig> {
        self.beaches.values()
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

impl Default for BeachCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn beach(
    id: &str,
    (latitude, longitude): (f64, f64),
    description: &str,
    background_image: &str,
    user_rating: f32,
    features: &[&str],
    wind_protection: WindProtection,
    accessibility: Accessibility,
) -> BeachConfig {
    BeachConfig {
        id: id.to_string(),
        name: id.to_string(),
        coordinates: Coordinates {
            latitude,
            longitude,
        },
        description: description.to_string(),
        background_image: background_image.to_string(),
        user_rating,
        features: features.iter().map(|f| f.to_string()).collect(),
        beach_type: "Sandstrand".to_string(),
        wind_protection,
        accessibility,
    }
}

fn builtin_beaches() -> Vec<BeachConfig> {
    vec![
        beach(
            "Binz",
            (54.40, 13.61),
            "Berühmter Badeort mit historischer Bäderarchitektur",
            "https://images.unsplash.com/photo-1649047516494-65af2c7bcd2a",
            4.5,
            &["Seebrücke", "Promenade", "Restaurants", "Bäderarchitektur"],
            WindProtection::Good,
            Accessibility::Excellent,
        ),
        beach(
            "Sellin",
            (54.38, 13.69),
            "Romantischer Strand mit berühmter Seebrücke",
            "https://images.unsplash.com/photo-1582524072730-90ec37441310",
            4.3,
            &["Seebrücke", "Steilküste", "Tauchgondel", "Bernstein"],
            WindProtection::Moderate,
            Accessibility::Good,
        ),
        beach(
            "Göhren",
            (54.34, 13.74),
            "Familienfreundlicher Strand im Südosten",
            "https://images.unsplash.com/photo-1568798330489-8beeab223c65",
            4.2,
            &["Familienfreundlich", "Mönchgut", "Wanderwege", "Dünen"],
            WindProtection::Good,
            Accessibility::Good,
        ),
        beach(
            "Baabe",
            (54.36, 13.71),
            "Ruhiger Strand zwischen Sellin und Göhren",
            "https://images.pexels.com/photos/96389/pexels-photo-96389.jpeg",
            4.1,
            &["Ruhig", "Naturstrand", "Kitesurfen", "Dünenlandschaft"],
            WindProtection::Weak,
            Accessibility::Moderate,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_default_region_order() {
        let catalog = BeachCatalog::builtin();
        assert_eq!(
            catalog.list_beaches(DEFAULT_REGION),
            ["Binz", "Sellin", "Göhren", "Baabe"]
        );
    }

    #[test]
    fn test_builtin_coordinates() {
        let catalog = BeachCatalog::builtin();
        let goehren = catalog.get_beach_meta("Göhren").unwrap();
        assert_eq!(goehren.coordinates.latitude, 54.34);
        assert_eq!(goehren.coordinates.longitude, 13.74);
        assert!(catalog.get_beach_meta("Atlantis").is_none());
    }

    #[test]
    fn test_unresolvable_ids_are_dropped() {
        let mut regions = HashMap::new();
        regions.insert(
            "nordost".to_string(),
            vec!["Binz".to_string(), "Prerow".to_string()],
        );
        let catalog = BeachCatalog::builtin().with_regions(&regions);

        let available = catalog.available_beaches("nordost").unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available.get("Binz").unwrap().name, "Binz");
        assert!(!available.contains_key("Prerow"));
    }

    #[test]
    fn test_unknown_region_falls_back_to_default() {
        let catalog = BeachCatalog::builtin();
        assert_eq!(catalog.resolve_region("mallorca"), DEFAULT_REGION);
        assert_eq!(catalog.list_beaches("mallorca").len(), 4);
    }

    #[test]
    fn test_empty_region_is_no_beaches_configured() {
        let mut regions = HashMap::new();
        regions.insert("leer".to_string(), vec!["Prerow".to_string()]);
        let catalog = BeachCatalog::builtin().with_regions(&regions);

        assert_eq!(
            catalog.available_beaches("leer").unwrap_err(),
            CatalogError::NoBeachesConfigured("leer".to_string())
        );
    }

    #[test]
    fn test_catalog_without_default_region() {
        let catalog = BeachCatalog::new(builtin_beaches(), []);
        assert!(catalog.list_beaches("anything").is_empty());
        assert!(catalog.available_beaches("anything").is_err());
    }
}
