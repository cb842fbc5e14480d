//! Holiday year and claim window date arithmetic.
//!
//! Month arithmetic clamps to the end of the month, so an anniversary of
//! 29 February falls on 28 February in a non-leap year.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::HpaInput;

/// Returns the start of the holiday year in which the HPA claim ends.
///
/// This is the latest anniversary of `input.holiday_year_start` on or
/// before the claim end date (the earlier of dismissal and insolvency).
///
/// # Errors
///
/// Returns `InvalidHpaInput` if `holiday_year_start` is after the claim
/// end date.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::get_holiday_year_start;
/// use holiday_engine::models::{HpaInput, ShiftPattern};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = HpaInput {
///     insolvency_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
///     dismissal_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
///     holiday_year_start: NaiveDate::from_ymd_opt(2018, 9, 1).unwrap(),
///     shift_pattern: ShiftPattern::weekdays(),
///     weekly_wage: Decimal::new(500, 0),
///     contracted_hol_entitlement: Decimal::new(25, 0),
///     days_carried_forward: Decimal::ZERO,
///     days_taken: Decimal::ZERO,
/// };
///
/// assert_eq!(
///     get_holiday_year_start(&input).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
/// );
/// ```
pub fn get_holiday_year_start(input: &HpaInput) -> EngineResult<NaiveDate> {
    let end_date = input.claim_end_date();
    let first_start = input.holiday_year_start;

    if first_start > end_date {
        return Err(EngineError::InvalidHpaInput {
            field: "holiday_year_start".to_string(),
            message: format!(
                "holiday year start {} is after the claim end date {}",
                first_start, end_date
            ),
        });
    }

    let years = (end_date.year() - first_start.year()) as u32;
    let candidate = add_months(first_start, years * 12)?;

    // years >= 1 here, since first_start itself is on or before end_date
    if candidate > end_date {
        add_months(first_start, (years - 1) * 12)
    } else {
        Ok(candidate)
    }
}

/// Returns the last day of the holiday year starting on `year_start`.
pub fn holiday_year_end(year_start: NaiveDate) -> EngineResult<NaiveDate> {
    let next_start = add_months(year_start, 12)?;
    sub_days(next_start, 1)
}

/// Returns the first day of the trailing twelve-month window ending on
/// `date`: twelve months before `date`, plus one day.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::twelve_months_prior;
/// use chrono::NaiveDate;
///
/// let insolvency = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// assert_eq!(
///     twelve_months_prior(insolvency).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
/// );
/// ```
pub fn twelve_months_prior(date: NaiveDate) -> EngineResult<NaiveDate> {
    let year_before = sub_months(date, 12)?;
    year_before
        .checked_add_days(Days::new(1))
        .ok_or_else(|| out_of_range(year_before))
}

fn add_months(date: NaiveDate, months: u32) -> EngineResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| out_of_range(date))
}

fn sub_months(date: NaiveDate, months: u32) -> EngineResult<NaiveDate> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| out_of_range(date))
}

fn sub_days(date: NaiveDate, days: u64) -> EngineResult<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| out_of_range(date))
}

fn out_of_range(date: NaiveDate) -> EngineError {
    EngineError::CalculationError {
        message: format!("date arithmetic out of range from {}", date),
    }
}
