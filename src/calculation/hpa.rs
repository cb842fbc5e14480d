//! Holiday Pay Accrued (HPA) calculation.
//!
//! Works out the holiday an employee accrued in the current holiday year
//! but had not taken or been paid for when the claim ended, and what the
//! National Insurance Fund pays for it.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{HpaInput, HpaResult, HpaWeeklyResult};

use super::holiday_year::{get_holiday_year_start, holiday_year_end};
use super::statutory_entitlement::{holiday_entitlement_for_year, maximum_holiday_entitlement};

/// Calculates holiday pay accrued for an HPA input.
#[async_trait]
pub trait HpaCalculator: Send + Sync {
    /// Returns the HPA result for `input`.
    async fn calculate(
        &self,
        input: &HpaInput,
        config: &StatutoryConfig,
    ) -> EngineResult<HpaResult>;
}

/// HPA calculator applying the statutory rules in [`StatutoryConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatutoryHpaCalculator;

#[async_trait]
impl HpaCalculator for StatutoryHpaCalculator {
    async fn calculate(&self, input: &HpaInput, config: &StatutoryConfig) -> EngineResult<HpaResult> {
        calculate_holiday_pay_accrued(input, config)
    }
}

/// Calculates holiday pay accrued.
///
/// The calculation:
/// 1. Finds the holiday year containing the claim end date
/// 2. Accrues `(adjusted entitlement + days carried forward)` pro rata over
///    the days elapsed in that year, to 4 decimal places
/// 3. Deducts days already taken (never below zero)
/// 4. Limits the owed days to the claimable maximum (6 weeks)
/// 5. Pays owed days week by week at the lower of the contractual wage and
///    the statutory weekly pay cap
///
/// # Errors
///
/// Returns an error if:
/// - A numeric field is negative (`InvalidHpaInput`)
/// - The holiday year start is after the claim end date (`InvalidHpaInput`)
/// - No weekly pay cap is in force on the insolvency date
/// - An intermediate amount exceeds the decimal range (`CalculationError`)
pub fn calculate_holiday_pay_accrued(
    input: &HpaInput,
    config: &StatutoryConfig,
) -> EngineResult<HpaResult> {
    validate_hpa_input(input)?;

    let year_start = get_holiday_year_start(input)?;
    let year_end = holiday_year_end(year_start)?;
    let claim_end = input.claim_end_date();

    let days_in_year = Decimal::from((year_end - year_start).num_days() + 1);
    let elapsed: Vec<NaiveDate> = year_start
        .iter_days()
        .take_while(|day| *day <= claim_end)
        .collect();
    let elapsed_days = Decimal::from(elapsed.len());

    let business_days = elapsed
        .iter()
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count();
    let working_days = elapsed
        .iter()
        .filter(|day| input.shift_pattern.works_on(**day))
        .count();

    let entitlement = holiday_entitlement_for_year(input, config)?;

    let accrued = pro_rata(entitlement, elapsed_days, days_in_year)
        .ok_or_else(|| EngineError::overflow("accrued holiday days"))?
        .round_dp(4);
    let pro_rata_accrued_days = (accrued - input.days_taken).max(Decimal::ZERO);
    let holidays_owed =
        pro_rata_accrued_days.min(maximum_holiday_entitlement(&input.shift_pattern, config));

    let statutory_max = config.weekly_pay_cap(input.insolvency_date)?;
    let weekly_results = split_into_weeks(
        holidays_owed,
        input.shift_pattern.days_per_week(),
        input.weekly_wage,
        statutory_max,
    )?;

    tracing::debug!(
        holiday_year_start = %year_start,
        claim_end = %claim_end,
        entitlement = %entitlement,
        accrued = %accrued,
        days_taken = %input.days_taken,
        holidays_owed = %holidays_owed,
        "Calculated holiday pay accrued"
    );

    Ok(HpaResult {
        statutory_max,
        holidays_owed,
        business_days_in_claim: Decimal::from(business_days),
        working_days_in_claim: Decimal::from(working_days),
        pro_rata_accrued_days,
        weekly_results,
    })
}

fn validate_hpa_input(input: &HpaInput) -> EngineResult<()> {
    let fields = [
        ("weekly_wage", input.weekly_wage),
        ("contracted_hol_entitlement", input.contracted_hol_entitlement),
        ("days_carried_forward", input.days_carried_forward),
        ("days_taken", input.days_taken),
    ];

    match fields.iter().find(|(_, value)| *value < Decimal::ZERO) {
        Some((field, value)) => Err(EngineError::InvalidHpaInput {
            field: field.to_string(),
            message: format!("{} cannot be negative", value),
        }),
        None => Ok(()),
    }
}

/// `amount × part / whole`, or `None` outside the decimal range.
fn pro_rata(amount: Decimal, part: Decimal, whole: Decimal) -> Option<Decimal> {
    amount.checked_mul(part)?.checked_div(whole)
}

/// Splits owed days into weeks of `days_per_week` days; the last week holds
/// the remainder.
fn split_into_weeks(
    holidays_owed: Decimal,
    days_per_week: Decimal,
    weekly_wage: Decimal,
    weekly_pay_cap: Decimal,
) -> EngineResult<Vec<HpaWeeklyResult>> {
    let mut weeks = Vec::new();
    let mut remaining = holidays_owed;
    let mut week_number = 1;

    while remaining > Decimal::ZERO {
        let days = remaining.min(days_per_week);
        let employer_entitlement = pro_rata(weekly_wage, days, days_per_week)
            .ok_or_else(|| EngineError::overflow("employer holiday pay"))?
            .round_dp(2);
        let maximum_entitlement = pro_rata(weekly_pay_cap, days, days_per_week)
            .ok_or_else(|| EngineError::overflow("maximum holiday pay"))?
            .round_dp(2);

        weeks.push(HpaWeeklyResult {
            week_number,
            days,
            employer_entitlement,
            maximum_entitlement,
            gross_entitlement: employer_entitlement.min(maximum_entitlement),
        });

        remaining -= days;
        week_number += 1;
    }

    Ok(weeks)
}
