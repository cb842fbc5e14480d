//! HTNP leave record model.
//!
//! This module defines [`LeaveRecord`], one report of holiday taken but not
//! paid, as submitted on either the RP1 or the RP14a claim form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{InputSource, ShiftPattern};

/// A period of holiday taken but not paid, reported under one input source.
///
/// Records are immutable once submitted. Every record in a request carries
/// the same insolvency and dismissal dates; the engine reads them from the
/// first record.
///
/// # Example
///
/// ```
/// use holiday_engine::models::{InputSource, LeaveRecord, ShiftPattern};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = LeaveRecord {
///     input_source: InputSource::Rp1,
///     insolvency_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
///     dismissal_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
///     unpaid_period_from: NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
///     unpaid_period_to: NaiveDate::from_ymd_opt(2025, 5, 9).unwrap(),
///     weekly_wage: Decimal::new(500, 0),
///     shift_pattern: ShiftPattern::weekdays(),
/// };
///
/// assert_eq!(record.claim_end_date(), NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The claim-form section this record was reported under.
    pub input_source: InputSource,
    /// The date the employer became insolvent.
    pub insolvency_date: NaiveDate,
    /// The date the employee was dismissed.
    pub dismissal_date: NaiveDate,
    /// The first day of the unpaid holiday (inclusive).
    pub unpaid_period_from: NaiveDate,
    /// The last day of the unpaid holiday (inclusive).
    pub unpaid_period_to: NaiveDate,
    /// The employee's gross weekly wage.
    pub weekly_wage: Decimal,
    /// The weekdays the employee normally works.
    pub shift_pattern: ShiftPattern,
}

impl LeaveRecord {
    /// Returns the earlier of the dismissal and insolvency dates.
    pub fn claim_end_date(&self) -> NaiveDate {
        self.dismissal_date.min(self.insolvency_date)
    }

    /// Checks the record's dates and wage are consistent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLeaveRecord` if the unpaid period ends before it
    /// starts or the weekly wage is negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.unpaid_period_to < self.unpaid_period_from {
            return Err(EngineError::InvalidLeaveRecord {
                input_source: self.input_source,
                message: format!(
                    "unpaid period ends ({}) before it starts ({})",
                    self.unpaid_period_to, self.unpaid_period_from
                ),
            });
        }
        if self.weekly_wage < Decimal::ZERO {
            return Err(EngineError::InvalidLeaveRecord {
                input_source: self.input_source,
                message: format!("weekly wage {} is negative", self.weekly_wage),
            });
        }
        Ok(())
    }

    /// Returns the working days of the unpaid period that fall inside
    /// `[start, end]`, in ascending order.
    ///
    /// A day counts only if the shift pattern works on it. An empty window
    /// (`start > end`) yields nothing.
    pub fn working_days_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = NaiveDate> + '_ {
        let first = self.unpaid_period_from.max(start);
        let last = self.unpaid_period_to.min(end);

        first
            .iter_days()
            .take_while(move |day| *day <= last)
            .filter(|day| self.shift_pattern.works_on(*day))
    }
}
