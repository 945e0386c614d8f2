use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::application::retry::RetryPolicy;

const CONFIG_FILE: &str = "config/station_charts";
const ENV_PREFIX: &str = "STATION_CHARTS";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub charts: ChartSettings,
    /// Station the binary renders charts for
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default = "default_hours")]
    pub hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub max_samples: usize,
    pub discard_outliers: bool,
    pub utc_offset_minutes: i32,
    pub parameters: Vec<String>,
    pub retry: RetrySettings,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            max_samples: 150,
            discard_outliers: true,
            utc_offset_minutes: 0,
            parameters: [
                "temperatura",
                "humedad",
                "precipitacion",
                "vientoVel",
                "airPressure",
                "radiacion",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            retry: RetrySettings::default(),
        }
    }
}

impl ChartSettings {
    /// Offset tick labels are rendered at; out-of-range values fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| {
            tracing::warn!("Ignoring invalid utc_offset_minutes {}", self.utc_offset_minutes);
            Utc.fix()
        })
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

fn default_hours() -> i64 {
    24
}

fn default_timeout_secs() -> u64 {
    15
}

/// Load `config/station_charts.{toml,...}` overlaid with `STATION_CHARTS__*` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
