mod catalog;
pub mod handlers;
mod models;

pub use catalog::{BeachCatalog, CatalogError, DEFAULT_REGION};
pub use models::{
    Accessibility, BeachConfig, BeachListResponse, BeachSummary, Coordinates, SummaryCoordinates,
    WindProtection,
};

use reqwest::Url;

/// Name of the query parameter selecting a region
pub const REGION_PARAM: &str = "region";

/// Extract the region from a page URL (`...?region=nordost`).
///
/// Accepts absolute URLs as well as bare paths or query strings. Returns the
/// default region when the parameter is absent or empty.
pub fn region_from_url(url: &str) -> String {
    let parsed = Url::parse(url).or_else(|_| {
        Url::parse("http://localhost/").and_then(|base| base.join(url))
    });

    parsed
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(key, _)| key == REGION_PARAM)
                .map(|(_, value)| value.trim().to_string())
        })
        .filter(|region| !region.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_absolute_url() {
        assert_eq!(
            region_from_url("https://strandwetter.de/?region=nordost&x=1"),
            "nordost"
        );
    }

    #[test]
    fn test_region_from_query_only() {
        assert_eq!(region_from_url("?region=ruegen"), "ruegen");
        assert_eq!(region_from_url("/dashboard?region=ostsee%20west"), "ostsee west");
    }

    #[test]
    fn test_region_defaults() {
        assert_eq!(region_from_url("https://strandwetter.de/"), DEFAULT_REGION);
        assert_eq!(region_from_url("?region="), DEFAULT_REGION);
        assert_eq!(region_from_url(""), DEFAULT_REGION);
    }
}
