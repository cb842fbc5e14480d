//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! holiday configuration from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{HolidayConfigFile, HolidayRules, SchemeMetadata, StatutoryConfig, WeeklyPayCap};

/// Loads and provides access to statutory holiday configuration.
///
/// # Directory Structure
///
/// ```text
/// config/statutory/
/// ├── holiday.yaml        # Scheme metadata and holiday rules
/// └── rates/
///     └── 2025-04-06.yaml # Weekly pay cap effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use holiday_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/statutory")?;
/// let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// println!("Weekly pay cap: £{}", loader.get_weekly_pay_cap(date)?);
/// # Ok::<(), holiday_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rates directory holds no rate files
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let holiday_path = path.join("holiday.yaml");
        let holiday_file = Self::load_yaml::<HolidayConfigFile>(&holiday_path)?;

        let rates_dir = path.join("rates");
        let caps = Self::load_rates(&rates_dir)?;

        let config = StatutoryConfig::new(holiday_file.metadata, holiday_file.holiday, caps);

        tracing::debug!(
            path = %path.display(),
            scheme = %config.scheme().code,
            rate_files = config.weekly_pay_caps().len(),
            earliest_cap = ?config.weekly_pay_caps().first().map(|cap| cap.effective_date),
            "Loaded statutory configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<WeeklyPayCap>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut caps = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                caps.push(Self::load_yaml::<WeeklyPayCap>(&path)?);
            }
        }

        if caps.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(caps)
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the holiday rules.
    pub fn holiday(&self) -> &HolidayRules {
        self.config.holiday()
    }

    /// Gets the weekly pay cap in force on a given date.
    pub fn get_weekly_pay_cap(&self, date: NaiveDate) -> EngineResult<Decimal> {
        self.config.weekly_pay_cap(date)
    }
}
