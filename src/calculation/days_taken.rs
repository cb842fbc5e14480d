//! Days-taken harmonisation.
//!
//! The HPA input declares how many days of holiday were taken in the current
//! holiday year. HTNP records independently report unpaid holiday taken. The
//! declared figure must never be lower than what the authoritative source
//! reports for the same holiday year.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, HpaInput, InputSource};

/// The rule ID for days-taken harmonisation.
pub const DAYS_TAKEN_RULE_ID: &str = "days_taken_harmonisation";

/// The harmonised HPA input and the audit step recording the adjustment.
#[derive(Debug, Clone)]
pub struct DaysTakenResult {
    /// A copy of the HPA input with days taken raised where needed.
    pub input: HpaInput,
    /// True if days taken was raised.
    pub adjusted: bool,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Harmonises the declared days taken with the HTNP days the selected
/// source reports in the current holiday year.
///
/// The caller's input is left untouched; the returned copy has
/// `days_taken = max(declared, htnp_days_in_holiday_year)`.
pub fn harmonise_days_taken(
    input: &HpaInput,
    source: InputSource,
    htnp_days_in_holiday_year: usize,
    holiday_year_start: NaiveDate,
    step_number: u32,
) -> DaysTakenResult {
    let reported = Decimal::from(htnp_days_in_holiday_year);
    let harmonised = input.harmonised(reported);
    let adjusted = harmonised.days_taken != input.days_taken;

    let reasoning = if adjusted {
        format!(
            "{} reports {} day(s) taken since {}, more than the {} declared; days taken raised to {}",
            source,
            htnp_days_in_holiday_year,
            holiday_year_start,
            input.days_taken.normalize(),
            harmonised.days_taken.normalize()
        )
    } else {
        format!(
            "Declared days taken ({}) covers the {} day(s) {} reports since {}",
            input.days_taken.normalize(),
            htnp_days_in_holiday_year,
            source,
            holiday_year_start
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: DAYS_TAKEN_RULE_ID.to_string(),
        rule_name: "Days Taken Harmonisation".to_string(),
        input: serde_json::json!({
            "input_source": source,
            "holiday_year_start": holiday_year_start.to_string(),
            "declared_days_taken": input.days_taken.normalize().to_string(),
            "htnp_days_in_holiday_year": htnp_days_in_holiday_year
        }),
        output: serde_json::json!({
            "days_taken": harmonised.days_taken.normalize().to_string(),
            "adjusted": adjusted
        }),
        reasoning,
    };

    DaysTakenResult {
        input: harmonised,
        adjusted,
        audit_step,
    }
}
