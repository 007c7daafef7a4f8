use std::sync::Arc;

use crate::weather::models::WeatherEnvelope;

/// What the presentation layer should show for the selected beach
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No beach selected yet
    Idle,
    /// Fetch in flight and nothing to show meanwhile
    Loading,
    /// Payload to render; `offline` marks fallback data
    Ready {
        payload: Arc<WeatherEnvelope>,
        offline: bool,
    },
    /// Fetch failed and no fallback was available
    Failed { message: String },
}

impl FetchState {
    pub fn ready(payload: WeatherEnvelope, offline: bool) -> Self {
        FetchState::Ready {
            payload: Arc::new(payload),
            offline,
        }
    }

    pub fn payload(&self) -> Option<&WeatherEnvelope> {
        match self {
            FetchState::Ready { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, FetchState::Ready { offline: true, .. })
    }

    /// Beach id of the payload, if any
    pub fn beach(&self) -> Option<&str> {
        self.payload().map(|p| p.beach.as_str())
    }
}
