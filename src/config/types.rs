//! Configuration types for statutory holiday calculations.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Metadata about the statutory scheme the configuration describes.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// A short code identifying the scheme.
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or effective date of the configuration.
    pub version: String,
    /// URL to the official guidance.
    pub source_url: String,
}

/// Statutory holiday rules.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayRules {
    /// Weeks of statutory holiday per year (5.6).
    pub statutory_weeks: Decimal,
    /// The ceiling on statutory holiday days per year (28).
    pub statutory_max_days: Decimal,
    /// The maximum number of weeks of holiday pay claimable (6).
    pub max_claimable_weeks: Decimal,
}

/// holiday.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayConfigFile {
    /// Scheme metadata.
    pub metadata: SchemeMetadata,
    /// Holiday rules.
    pub holiday: HolidayRules,
}

/// The statutory weekly pay cap from a given effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyPayCap {
    /// The date this cap takes effect.
    pub effective_date: NaiveDate,
    /// The maximum weekly pay used for holiday calculations.
    pub weekly_pay_cap: Decimal,
}

/// The complete statutory configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Holiday rules.
    holiday: HolidayRules,
    /// Weekly pay caps by effective date (sorted oldest first).
    weekly_pay_caps: Vec<WeeklyPayCap>,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(
        metadata: SchemeMetadata,
        holiday: HolidayRules,
        weekly_pay_caps: Vec<WeeklyPayCap>,
    ) -> Self {
        let mut sorted_caps = weekly_pay_caps;
        sorted_caps.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            holiday,
            weekly_pay_caps: sorted_caps,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the holiday rules.
    pub fn holiday(&self) -> &HolidayRules {
        &self.holiday
    }

    /// Returns all weekly pay caps, oldest first.
    pub fn weekly_pay_caps(&self) -> &[WeeklyPayCap] {
        &self.weekly_pay_caps
    }

    /// Gets the weekly pay cap in force on the given date.
    ///
    /// The most recent cap effective on or before `date` applies.
    ///
    /// # Errors
    ///
    /// Returns `WeeklyPayCapNotFound` if no cap is effective on `date`.
    pub fn weekly_pay_cap(&self, date: NaiveDate) -> EngineResult<Decimal> {
        self.weekly_pay_caps
            .iter()
            .rev()
            .find(|cap| cap.effective_date <= date)
            .map(|cap| cap.weekly_pay_cap)
            .ok_or(EngineError::WeeklyPayCapNotFound { date })
    }
}
