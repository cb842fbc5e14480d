//! Shift pattern model.
//!
//! A shift pattern lists the weekdays an employee normally works. Its length
//! drives every weekly entitlement multiplier in the engine.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The weekdays an employee normally works.
///
/// A pattern is never empty and never lists the same weekday twice; both
/// conditions are checked on construction and on deserialization.
///
/// # Example
///
/// ```
/// use holiday_engine::models::ShiftPattern;
/// use chrono::{NaiveDate, Weekday};
///
/// let pattern = ShiftPattern::new(vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]).unwrap();
/// assert_eq!(pattern.len(), 3);
///
/// // 2025-03-05 is a Wednesday
/// assert!(pattern.works_on(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
/// assert!(!pattern.works_on(NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct ShiftPattern {
    days: Vec<Weekday>,
}

impl ShiftPattern {
    /// Creates a shift pattern from the given working days.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShiftPattern` if `days` is empty or contains a
    /// weekday more than once.
    pub fn new(days: Vec<Weekday>) -> EngineResult<Self> {
        if days.is_empty() {
            return Err(EngineError::InvalidShiftPattern {
                message: "a shift pattern needs at least one working day".to_string(),
            });
        }

        let mut seen = [false; 7];
        for day in &days {
            let index = day.num_days_from_monday() as usize;
            if seen[index] {
                return Err(EngineError::InvalidShiftPattern {
                    message: format!("{} is listed more than once", day),
                });
            }
            seen[index] = true;
        }

        Ok(Self { days })
    }

    /// Monday to Friday.
    pub fn weekdays() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }

    /// Returns the number of working days per week.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the pattern has no working days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Returns the number of working days per week as a decimal multiplier.
    pub fn days_per_week(&self) -> Decimal {
        Decimal::from(self.days.len())
    }

    /// Returns true if `date` falls on one of the pattern's working days.
    pub fn works_on(&self, date: NaiveDate) -> bool {
        self.days.contains(&date.weekday())
    }
}

impl TryFrom<Vec<Weekday>> for ShiftPattern {
    type Error = EngineError;

    fn try_from(days: Vec<Weekday>) -> EngineResult<Self> {
        Self::new(days)
    }
}

impl From<ShiftPattern> for Vec<Weekday> {
    fn from(pattern: ShiftPattern) -> Self {
        pattern.days
    }
}
