//! Holiday Taken Not Paid (HTNP) calculation.
//!
//! Pays the days of holiday an employee took but was not paid for, for the
//! records of one input source, within the caps handed down by the
//! orchestrator.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{HtnpRecordResult, InputSource, LeaveRecord};

use super::caps::HtnpCaps;
use super::holiday_year::twelve_months_prior;

/// Calculates holiday taken not paid for one input source.
#[async_trait]
pub trait HtnpCalculator: Send + Sync {
    /// Returns one result per record reported under `source`, in input order.
    ///
    /// Days on or after `holiday_year_start` count against both caps; other
    /// days count against the total cap only. With no boundary, the holiday
    /// year cap is never consulted.
    async fn calculate(
        &self,
        records: &[LeaveRecord],
        source: InputSource,
        caps: HtnpCaps,
        holiday_year_start: Option<NaiveDate>,
        config: &StatutoryConfig,
    ) -> EngineResult<Vec<HtnpRecordResult>>;
}

/// HTNP calculator applying the statutory rules in [`StatutoryConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatutoryHtnpCalculator;

#[async_trait]
impl HtnpCalculator for StatutoryHtnpCalculator {
    async fn calculate(
        &self,
        records: &[LeaveRecord],
        source: InputSource,
        caps: HtnpCaps,
        holiday_year_start: Option<NaiveDate>,
        config: &StatutoryConfig,
    ) -> EngineResult<Vec<HtnpRecordResult>> {
        calculate_holiday_taken_not_paid(records, source, caps, holiday_year_start, config)
    }
}

/// Calculates holiday taken not paid for the records of one input source.
///
/// Each record claims the working days of its unpaid period that fall in the
/// twelve months up to its claim end date. A day claimed by an earlier
/// record is not claimed again. Claimed days are then paid in date order:
/// each day pays up to one day, limited by what is left of the total cap
/// and, for days in the current holiday year, of the holiday year cap. A
/// cap at or below zero pays nothing.
///
/// Payable days are paid at the weekly wage, capped at the statutory weekly
/// pay cap in force on the insolvency date, divided by the shift pattern
/// length.
///
/// # Errors
///
/// Returns an error if a record of `source` is invalid or no weekly pay cap
/// is in force on its insolvency date.
pub fn calculate_holiday_taken_not_paid(
    records: &[LeaveRecord],
    source: InputSource,
    caps: HtnpCaps,
    holiday_year_start: Option<NaiveDate>,
    config: &StatutoryConfig,
) -> EngineResult<Vec<HtnpRecordResult>> {
    let source_records: Vec<&LeaveRecord> = records
        .iter()
        .filter(|r| r.input_source == source)
        .collect();

    // Attribute each claimed day to the first record reporting it
    let mut seen = BTreeSet::new();
    let mut claimed: Vec<(NaiveDate, usize)> = Vec::new();
    let mut days_claimed = vec![Decimal::ZERO; source_records.len()];

    for (index, record) in source_records.iter().enumerate() {
        record.validate()?;
        let window_start = twelve_months_prior(record.insolvency_date)?;

        for day in record.working_days_between(window_start, record.claim_end_date()) {
            if seen.insert(day) {
                claimed.push((day, index));
                days_claimed[index] += Decimal::ONE;
            }
        }
    }
    claimed.sort();

    let mut days_payable = vec![Decimal::ZERO; source_records.len()];
    let mut remaining_total = caps.in_total;
    let mut remaining_in_year = caps.in_holiday_year;

    for (day, index) in claimed {
        let in_holiday_year = holiday_year_start.is_some_and(|start| day >= start);

        let mut payable = Decimal::ONE.min(remaining_total);
        if in_holiday_year {
            payable = payable.min(remaining_in_year);
        }
        let payable = payable.max(Decimal::ZERO);

        remaining_total -= payable;
        if in_holiday_year {
            remaining_in_year -= payable;
        }
        days_payable[index] += payable;
    }

    let mut results = Vec::with_capacity(source_records.len());
    for (index, record) in source_records.iter().enumerate() {
        let weekly_pay_cap = config.weekly_pay_cap(record.insolvency_date)?;
        let capped_weekly_wage = record.weekly_wage.min(weekly_pay_cap);
        let days_per_week = record.shift_pattern.days_per_week();
        let gross_entitlement = capped_weekly_wage
            .checked_mul(days_payable[index])
            .and_then(|amount| amount.checked_div(days_per_week))
            .ok_or_else(|| EngineError::overflow("holiday taken not paid"))?;

        results.push(HtnpRecordResult {
            input_source: source,
            unpaid_period_from: record.unpaid_period_from,
            unpaid_period_to: record.unpaid_period_to,
            days_claimed: days_claimed[index],
            days_payable: days_payable[index],
            daily_rate: (capped_weekly_wage / days_per_week).round_dp(2),
            weekly_pay_cap,
            gross_entitlement: gross_entitlement.round_dp(2),
        });
    }

    tracing::debug!(
        input_source = %source,
        records = results.len(),
        in_holiday_year_cap = %caps.in_holiday_year,
        in_total_cap = %caps.in_total,
        days_payable = %days_payable.iter().copied().sum::<Decimal>(),
        "Calculated holiday taken not paid"
    );

    Ok(results)
}
