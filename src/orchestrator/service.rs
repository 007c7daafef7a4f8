use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

use super::fallback::FallbackData;
use super::source::{FetchError, WeatherSource};
use super::state::FetchState;
use crate::beaches::BeachCatalog;
use crate::scoring::ScoreEngine;
use crate::weather::models::WeatherEnvelope;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrator and dashboard feature flags
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorOptions {
    /// Upper bound for one backend fetch
    pub timeout: Duration,
    /// Substitute fallback data on failure instead of publishing `Failed`
    pub fallback_on_error: bool,
    /// Restrict the beach picker to the current region
    pub region_filtering: bool,
    /// Timezone of the beaches; fallback hours start at its current hour
    pub timezone: Tz,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            fallback_on_error: true,
            region_filtering: true,
            timezone: chrono_tz::Europe::Berlin,
        }
    }
}

#[derive(Debug, Default)]
struct Selection {
    generation: u64,
    beach: Option<String>,
    offline_mode: bool,
}

/// Tag of an in-flight request
#[derive(Debug, Clone)]
struct Ticket {
    generation: u64,
    beach: String,
}

/// Drives the fetch lifecycle for the selected beach and publishes
/// `FetchState` transitions to subscribers.
pub struct FetchOrchestrator {
    source: Arc<dyn WeatherSource>,
    fallback: FallbackData,
    options: OrchestratorOptions,
    selection: Mutex<Selection>,
    state: watch::Sender<FetchState>,
}

impl FetchOrchestrator {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        catalog: Arc<BeachCatalog>,
        options: OrchestratorOptions,
    ) -> Self {
        Self::with_engine(source, catalog, ScoreEngine::default(), options)
    }

    /// Like `new`, scoring fallback data with custom rating tables
    pub fn with_engine(
        source: Arc<dyn WeatherSource>,
        catalog: Arc<BeachCatalog>,
        engine: ScoreEngine,
        options: OrchestratorOptions,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            source,
            fallback: FallbackData::new(catalog, engine),
            options,
            selection: Mutex::new(Selection::default()),
            state,
        }
    }

    pub fn current_state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    pub fn selected_beach(&self) -> Option<String> {
        self.lock().beach.clone()
    }

    /// True after a failed fetch until the next successful one
    pub fn is_offline(&self) -> bool {
        self.lock().offline_mode
    }

    /// Select a beach and fetch its weather.
    ///
    /// Publishes the beach's fallback as a placeholder first (or `Loading`
    /// without one). In offline mode the fallback is final and no request
    /// is made. Returns the state after the selection settled.
    pub async fn select_beach(&self, beach_id: &str) -> FetchState {
        let fallback = self.fallback_for(beach_id);

        let ticket = {
            let mut selection = self.lock();
            selection.generation += 1;
            selection.beach = Some(beach_id.to_string());

            match &fallback {
                Some(payload) => self.publish(FetchState::ready(payload.clone(), true)),
                None => self.publish(FetchState::Loading),
            }

            if selection.offline_mode && fallback.is_some() {
                tracing::info!(beach = %beach_id, "Offline mode, showing fallback data");
                return self.current_state();
            }

            Ticket {
                generation: selection.generation,
                beach: beach_id.to_string(),
            }
        };

        self.run(ticket, fallback).await
    }

    /// Re-fetch the selected beach, leaving the current state in place
    /// until the response arrives
    pub async fn retry(&self) -> FetchState {
        let ticket = {
            let mut selection = self.lock();
            let Some(beach) = selection.beach.clone() else {
                return self.current_state();
            };
            selection.generation += 1;
            Ticket {
                generation: selection.generation,
                beach,
            }
        };

        tracing::debug!(beach = %ticket.beach, "Retrying weather fetch");
        let fallback = self.fallback_for(&ticket.beach);
        self.run(ticket, fallback).await
    }

    async fn run(&self, ticket: Ticket, fallback: Option<WeatherEnvelope>) -> FetchState {
        let result = match tokio::time::timeout(
            self.options.timeout,
            self.source.fetch(&ticket.beach),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.options.timeout)),
        };

        self.apply(ticket, result, fallback)
    }

    fn apply(
        &self,
        ticket: Ticket,
        result: Result<WeatherEnvelope, FetchError>,
        fallback: Option<WeatherEnvelope>,
    ) -> FetchState {
        let mut selection = self.lock();

        if selection.generation != ticket.generation
            || selection.beach.as_deref() != Some(ticket.beach.as_str())
        {
            tracing::debug!(
                beach = %ticket.beach,
                generation = ticket.generation,
                "Discarding stale weather response"
            );
            return self.current_state();
        }

        match result {
            Ok(payload) => {
                tracing::debug!(beach = %ticket.beach, cached = payload.cached, "Weather fetched");
                selection.offline_mode = false;
                self.publish(FetchState::ready(payload, false));
            }
            Err(e) => {
                tracing::warn!(
                    beach = %ticket.beach,
                    kind = e.kind(),
                    error = %e,
                    "Weather fetch failed"
                );
                match fallback {
                    Some(payload) => {
                        selection.offline_mode = true;
                        self.publish(FetchState::ready(payload, true));
                    }
                    None => self.publish(FetchState::Failed {
                        message: format!("Wetterdaten konnten nicht geladen werden: {e}"),
                    }),
                }
            }
        }

        self.current_state()
    }

    fn fallback_for(&self, beach_id: &str) -> Option<WeatherEnvelope> {
        if !self.options.fallback_on_error {
            return None;
        }
        self.fallback.payload_for(beach_id, self.local_now())
    }

    /// Current wall-clock time at the beaches
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.options.timezone).naive_local()
    }

    fn publish(&self, state: FetchState) {
        self.state.send_replace(state);
    }

    fn lock(&self) -> MutexGuard<'_, Selection> {
        // Selection stays consistent even if a holder panicked
        self.selection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
