//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::WeekStart;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Aggregation defaults.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Snapshot data source.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Defaults applied by the aggregation engine when a caller does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Week-start convention for weekly buckets and week ranges.
    #[serde(default)]
    pub week_start: WeekStart,
    /// Assumed COGS ratio when no target configures one (fraction, 0.35 = 35%).
    #[serde(default = "default_cogs_percent")]
    pub default_cogs_percent: Decimal,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            default_cogs_percent: default_cogs_percent(),
        }
    }
}

fn default_cogs_percent() -> Decimal {
    Decimal::new(35, 2)
}

/// Snapshot file configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the JSON snapshot of companies, entries and targets.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/snapshot.json".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GASTROFIN").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if the COGS default is outside `[0, 1]`.
    pub fn validate(&self) -> AppResult<()> {
        let pct = self.aggregation.default_cogs_percent;
        if pct < Decimal::ZERO || pct > Decimal::ONE {
            return Err(AppError::Configuration(format!(
                "aggregation.default_cogs_percent must be between 0 and 1, got {pct}"
            )));
        }
        Ok(())
    }
}
