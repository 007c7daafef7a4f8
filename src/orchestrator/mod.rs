//! Client-side fetch lifecycle for the selected beach: placeholder, fetch
//! with timeout, fallback substitution and offline bookkeeping.

mod fallback;
mod service;
mod source;
mod state;

pub use fallback::{fallback_payload, FallbackData};
pub use service::{FetchOrchestrator, OrchestratorOptions};
pub use source::{FetchError, HttpWeatherSource, WeatherSource};
pub use state::FetchState;
