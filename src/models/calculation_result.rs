//! Calculation result models for the Holiday Entitlement Engine.
//!
//! This module contains the [`HolidayCalculationResult`] type and the
//! sub-results it aggregates: the HPA result, the HTNP aggregate with one
//! result list per input source, and the audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::InputSource;

/// One week of holiday pay accrued.
///
/// Owed days are split into weeks of the shift pattern's length; the last
/// week may be partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpaWeeklyResult {
    /// The 1-based week number.
    pub week_number: u32,
    /// Holiday days paid in this week.
    pub days: Decimal,
    /// What the employer owes for these days at the contractual wage.
    pub employer_entitlement: Decimal,
    /// The statutory ceiling for these days.
    pub maximum_entitlement: Decimal,
    /// The amount claimable: the lower of the two entitlements.
    pub gross_entitlement: Decimal,
}

/// The result of the holiday pay accrued calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpaResult {
    /// The statutory weekly pay cap applied.
    pub statutory_max: Decimal,
    /// Holiday days owed after applying the claimable maximum.
    pub holidays_owed: Decimal,
    /// Monday to Friday days elapsed in the holiday year up to the claim end.
    pub business_days_in_claim: Decimal,
    /// Shift-pattern days elapsed in the holiday year up to the claim end.
    pub working_days_in_claim: Decimal,
    /// Days accrued pro rata in the holiday year, net of days taken.
    pub pro_rata_accrued_days: Decimal,
    /// Per-week breakdown of the owed days.
    pub weekly_results: Vec<HpaWeeklyResult>,
}

impl HpaResult {
    /// Returns the sum of the weekly gross entitlements.
    pub fn total_gross_entitlement(&self) -> Decimal {
        self.weekly_results.iter().map(|w| w.gross_entitlement).sum()
    }
}

/// The HTNP outcome for a single leave record.
///
/// Records of the unselected input source are still reported, with zero
/// payable days, so both result lists always have the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtnpRecordResult {
    /// The input source the record was reported under.
    pub input_source: InputSource,
    /// The first day of the unpaid holiday.
    pub unpaid_period_from: NaiveDate,
    /// The last day of the unpaid holiday.
    pub unpaid_period_to: NaiveDate,
    /// Working days in the claim window attributed to this record.
    pub days_claimed: Decimal,
    /// Days payable after applying the caps.
    pub days_payable: Decimal,
    /// The daily rate, after the weekly pay cap.
    pub daily_rate: Decimal,
    /// The statutory weekly pay cap applied.
    pub weekly_pay_cap: Decimal,
    /// Capped weekly wage × days payable ÷ pattern length, rounded to pence.
    pub gross_entitlement: Decimal,
}

/// The HTNP part of a holiday calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtnpAggregate {
    /// The input source chosen as authoritative.
    pub selected_input_source: InputSource,
    /// Results for RP1 records.
    pub rp1_results: Vec<HtnpRecordResult>,
    /// Results for RP14a records.
    pub rp14a_results: Vec<HtnpRecordResult>,
}

impl HtnpAggregate {
    /// Returns the result list for the given input source.
    pub fn results_for(&self, source: InputSource) -> &[HtnpRecordResult] {
        match source {
            InputSource::Rp1 => &self.rp1_results,
            InputSource::Rp14a => &self.rp14a_results,
        }
    }

    /// Returns the total payable days for the given input source.
    pub fn days_payable(&self, source: InputSource) -> Decimal {
        self.results_for(source).iter().map(|r| r.days_payable).sum()
    }

    /// Returns the total gross entitlement for the given input source.
    pub fn gross_entitlement(&self, source: InputSource) -> Decimal {
        self.results_for(source)
            .iter()
            .map(|r| r.gross_entitlement)
            .sum()
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use holiday_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert_eq!(trace.next_step_number(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the step number the next recorded step should use.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Returns the first step with the given rule id.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The complete result of a holiday calculation.
///
/// `hpa` is absent when the request had no HPA input; `htnp` is absent when
/// the request had no HTNP records. An absent sub-result means no calculator
/// was invoked for it.
///
/// # Example
///
/// ```
/// use holiday_engine::models::HolidayCalculationResult;
/// use uuid::Uuid;
///
/// let result = HolidayCalculationResult::empty(Uuid::new_v4());
/// assert!(result.hpa.is_none());
/// assert!(result.htnp.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Holiday pay accrued result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hpa: Option<HpaResult>,
    /// Holiday taken not paid results for both input sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub htnp: Option<HtnpAggregate>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl HolidayCalculationResult {
    /// Creates a result with no sub-results and an empty audit trace.
    pub fn empty(calculation_id: Uuid) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            hpa: None,
            htnp: None,
            audit_trace: AuditTrace::default(),
        }
    }
}
