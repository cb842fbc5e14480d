//! Error types for the Holiday Entitlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating holiday pay.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::InputSource;

/// The main error type for the Holiday Entitlement Engine.
///
/// Absent inputs are never errors; this type only describes malformed
/// inputs and configuration problems, which abort the whole calculation.
///
/// # Example
///
/// ```
/// use holiday_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/holiday.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/holiday.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory weekly pay cap is effective on the given date.
    #[error("Weekly pay cap not found for date {date}")]
    WeeklyPayCapNotFound {
        /// The date for which the cap was requested.
        date: NaiveDate,
    },

    /// A shift pattern was empty or listed the same weekday twice.
    #[error("Invalid shift pattern: {message}")]
    InvalidShiftPattern {
        /// A description of what made the pattern invalid.
        message: String,
    },

    /// An HTNP leave record contained inconsistent data.
    #[error("Invalid {input_source} leave record: {message}")]
    InvalidLeaveRecord {
        /// The input source the record was reported under.
        input_source: InputSource,
        /// A description of what made the record invalid.
        message: String,
    },

    /// The HPA input contained inconsistent data.
    #[error("Invalid HPA field '{field}': {message}")]
    InvalidHpaInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// A calculation error for a quantity outside the range of `Decimal`.
    pub(crate) fn overflow(quantity: &str) -> Self {
        EngineError::CalculationError {
            message: format!("{} is outside the supported decimal range", quantity),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
