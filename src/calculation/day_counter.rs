//! HTNP day counting.
//!
//! Converts leave records into the set of working days taken inside a date
//! window, for one input source.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{InputSource, LeaveRecord};

/// Counts the HTNP days reported under an input source inside a window.
///
/// Implementations return the matching days in ascending order, each day at
/// most once; the count is the length of the list.
#[async_trait]
pub trait HtnpDayCounter: Send + Sync {
    /// Returns the days reported under `source` within `[start, end]`.
    async fn htnp_days(
        &self,
        records: &[LeaveRecord],
        source: InputSource,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<NaiveDate>>;
}

/// Day counter working directly from the records' unpaid periods and
/// shift patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDayCounter;

#[async_trait]
impl HtnpDayCounter for RecordDayCounter {
    async fn htnp_days(
        &self,
        records: &[LeaveRecord],
        source: InputSource,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<NaiveDate>> {
        get_htnp_days(records, source, start, end)
    }
}

/// Returns the working days reported under `source` within `[start, end]`.
///
/// Records reported under the other source are ignored. Days reported by
/// more than one overlapping record are counted once.
///
/// # Errors
///
/// Returns `InvalidLeaveRecord` if a record of `source` is inconsistent.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::get_htnp_days;
/// use holiday_engine::models::{InputSource, LeaveRecord, ShiftPattern};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = |d: &str| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
/// let record = LeaveRecord {
///     input_source: InputSource::Rp1,
///     insolvency_date: date("2025-06-30"),
///     dismissal_date: date("2025-06-30"),
///     unpaid_period_from: date("2025-05-05"),
///     unpaid_period_to: date("2025-05-11"),
///     weekly_wage: Decimal::new(500, 0),
///     shift_pattern: ShiftPattern::weekdays(),
/// };
///
/// let days = get_htnp_days(&[record], InputSource::Rp1, date("2024-07-01"), date("2025-06-30")).unwrap();
/// assert_eq!(days.len(), 5);
/// ```
pub fn get_htnp_days(
    records: &[LeaveRecord],
    source: InputSource,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<NaiveDate>> {
    let mut days = BTreeSet::new();

    for record in records.iter().filter(|r| r.input_source == source) {
        record.validate()?;
        days.extend(record.working_days_between(start, end));
    }

    Ok(days.into_iter().collect())
}
