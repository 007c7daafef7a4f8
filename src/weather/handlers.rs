use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use indexmap::IndexMap;

use super::models::{
    BeachWeatherResult, HealthResponse, RecommendationsResponse, ServiceInfo, WeatherEnvelope,
};
use super::service::WeatherError;
use crate::extractors::RegionParam;
use crate::AppState;

/// Service banner
///
/// GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "StrandWetter Deutschland API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Scored weather for one beach
///
/// GET /api/weather/{beach}
pub async fn get_beach_weather(
    State(state): State<AppState>,
    Path(beach): Path<String>,
) -> Result<Json<WeatherEnvelope>, WeatherError> {
    let meta = state
        .catalog
        .get_beach_meta(&beach)
        .ok_or_else(|| WeatherError::BeachNotFound(beach.clone()))?;

    let envelope = state.weather_service.get_beach_weather(meta).await?;
    Ok(Json(envelope))
}

/// Scored weather for every beach in the catalog
///
/// GET /api/weather
pub async fn get_all_beaches_weather(
    State(state): State<AppState>,
) -> Json<IndexMap<String, BeachWeatherResult>> {
    Json(
        state
            .weather_service
            .get_all_beaches_weather(&state.catalog)
            .await,
    )
}

/// Beaches of a region ranked by score
///
/// GET /api/recommendations?region=default
pub async fn get_recommendations(
    State(state): State<AppState>,
    region: RegionParam,
) -> Result<Json<RecommendationsResponse>, WeatherError> {
    let region = region.or_default(state.config.default_region.as_str());
    let resolved = state.catalog.resolve_region(&region).to_string();

    let recommendations = state
        .weather_service
        .get_recommendations(&state.catalog, &resolved)
        .await?;

    Ok(Json(RecommendationsResponse {
        region: resolved,
        recommendations,
    }))
}

/// Prometheus exposition
///
/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
