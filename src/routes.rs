use axum::{routing::get, Router};

use crate::beaches::handlers as beaches_handlers;
use crate::openapi::swagger_ui;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Beach listing routes
fn beach_routes() -> Router<AppState> {
    Router::new().route("/beaches", get(beaches_handlers::list_beaches))
}

/// Weather and recommendation routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_all_beaches_weather))
        .route("/weather/{beach}", get(weather_handlers::get_beach_weather))
        .route(
            "/recommendations",
            get(weather_handlers::get_recommendations),
        )
}

/// Build all `/api` routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(beach_routes())
        .merge(weather_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(weather_handlers::root))
        .route("/health", get(weather_handlers::health))
        .route("/metrics", get(weather_handlers::metrics))
        .nest("/api", api_routes())
        .merge(swagger_ui())
}
