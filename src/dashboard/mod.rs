//! View models for the beach dashboard. Maps a `FetchState` and the beach
//! catalog onto what the UI renders; styling stays with the UI.

mod view;

use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

pub use view::{BeachHeader, CurrentConditions, DashboardView, ForecastDay, ScoreCard};

use crate::beaches::{BeachCatalog, CatalogError};
use crate::orchestrator::{FetchState, OrchestratorOptions};

/// Top-level screen for the current fetch state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// Nothing selected yet
    Welcome,
    Loading,
    Error { message: String },
    /// The region has no beach with metadata
    NoBeaches { message: String },
    Dashboard(Box<DashboardView>),
}

/// Entry of the beach picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeachOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Dashboard for one region
#[derive(Debug, Clone)]
pub struct Dashboard {
    catalog: Arc<BeachCatalog>,
    region: String,
    region_filtering: bool,
}

impl Dashboard {
    pub fn new(catalog: Arc<BeachCatalog>, region: &str, options: &OrchestratorOptions) -> Self {
        let region = if options.region_filtering {
            catalog.resolve_region(region).to_string()
        } else {
            region.to_string()
        };

        Self {
            catalog,
            region,
            region_filtering: options.region_filtering,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Beaches to offer, in catalog order. Without region filtering every
    /// catalog beach is listed.
    pub fn beach_options(&self, selected: Option<&str>) -> Result<Vec<BeachOption>, CatalogError> {
        let option = |id: &str, name: &str| BeachOption {
            id: id.to_string(),
            name: name.to_string(),
            selected: selected == Some(id),
        };

        if !self.region_filtering {
            return Ok(self
                .catalog
                .all()
                .map(|beach| option(&beach.id, &beach.name))
                .collect());
        }

        Ok(self
            .catalog
            .available_beaches(&self.region)?
            .into_iter()
            .map(|(id, beach)| option(id, &beach.name))
            .collect())
    }

    /// First beach of the picker, selected on startup
    pub fn default_beach(&self) -> Result<String, CatalogError> {
        self.beach_options(None)?
            .into_iter()
            .next()
            .map(|option| option.id)
            .ok_or_else(|| CatalogError::NoBeachesConfigured(self.region.clone()))
    }

    pub fn render(&self, state: &FetchState, now: NaiveDateTime) -> Screen {
        if let Err(e) = self.beach_options(None) {
            tracing::warn!(region = %self.region, error = %e, "Dashboard has no beaches to show");
            return Screen::NoBeaches {
                message: format!("Keine Strände für Region \"{}\" konfiguriert", self.region),
            };
        }

        match state {
            FetchState::Idle => Screen::Welcome,
            FetchState::Loading => Screen::Loading,
            FetchState::Failed { message } => Screen::Error {
                message: message.clone(),
            },
            FetchState::Ready { payload, offline } => {
                let meta = self.catalog.get_beach_meta(&payload.beach);
                Screen::Dashboard(Box::new(DashboardView::build(payload, meta, *offline, now)))
            }
        }
    }
}
