use axum::{extract::State, Json};

use super::catalog::CatalogError;
use super::models::{BeachListResponse, BeachSummary};
use crate::extractors::RegionParam;
use crate::AppState;

/// Beaches of a region in configured order
///
/// GET /api/beaches?region=default
pub async fn list_beaches(
    State(state): State<AppState>,
    region: RegionParam,
) -> Result<Json<BeachListResponse>, CatalogError> {
    let region = region.or_default(state.config.default_region.as_str());
    let resolved = state.catalog.resolve_region(&region).to_string();

    let beaches = state
        .catalog
        .available_beaches(&resolved)?
        .values()
        .map(|beach| BeachSummary::from(*beach))
        .collect();

    Ok(Json(BeachListResponse {
        region: resolved,
        beaches,
    }))
}
