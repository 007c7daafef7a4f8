use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::beaches::DEFAULT_REGION;
use crate::scoring::RatingCriteria;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open-Meteo forecast endpoint
    #[serde(default = "default_forecast_api_url")]
    pub forecast_api_url: String,

    /// Open-Meteo marine endpoint
    #[serde(default = "default_marine_api_url")]
    pub marine_api_url: String,

    /// IANA timezone for upstream timestamps and "now"
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Number of forecast days requested upstream
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// How long scored weather is served from cache
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Region used when a request does not name one
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Extra regions: name -> ordered beach ids
    #[serde(default)]
    pub regions: HashMap<String, Vec<String>>,

    /// Rating bands used by the score engine
    #[serde(default)]
    pub rating: RatingCriteria,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_forecast_api_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_marine_api_url() -> String {
    "https://marine-api.open-meteo.com/v1/marine".to_string()
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

fn default_forecast_days() -> u8 {
    3
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            forecast_api_url: default_forecast_api_url(),
            marine_api_url: default_marine_api_url(),
            timezone: default_timezone(),
            forecast_days: default_forecast_days(),
            cache_ttl_secs: default_cache_ttl_secs(),
            default_region: default_region(),
            regions: HashMap::new(),
            rating: RatingCriteria::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("timezone", default_timezone())?
            .set_default("default_region", default_region())?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // STRANDWETTER_CACHE_TTL_SECS=600, STRANDWETTER_REGIONS__NORDOST=...
            .add_source(
                Environment::with_prefix("STRANDWETTER")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::Message(format!(
                "Invalid timezone: {}",
                self.timezone
            )));
        }
        if self.forecast_days == 0 || self.forecast_days > 16 {
            return Err(ConfigError::Message(format!(
                "forecast_days must be within 1..=16, got {}",
                self.forecast_days
            )));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Parsed timezone; `validate` guarantees this succeeds for loaded configs
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::Europe::Berlin)
    }
}
