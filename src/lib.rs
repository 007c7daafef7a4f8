pub mod beaches;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod orchestrator;
pub mod routes;
pub mod scoring;
pub mod weather;

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::beaches::BeachCatalog;
use crate::config::AppConfig;
use crate::weather::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub catalog: Arc<BeachCatalog>,
    pub config: Arc<AppConfig>,
    /// Renders `/metrics`; absent when no recorder is installed (tests)
    pub metrics: Option<PrometheusHandle>,
}
