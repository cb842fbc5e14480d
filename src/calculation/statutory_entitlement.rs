//! Statutory holiday entitlement calculation.
//!
//! Statutory entitlement is 5.6 weeks of the employee's working days,
//! capped at 28 days. A contract may grant more, never less.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{HpaInput, ShiftPattern};

/// Returns the statutory holiday entitlement in days for a shift pattern.
///
/// `min(statutory_weeks × days per week, statutory_max_days)`.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::get_statutory_holiday_entitlement;
/// use holiday_engine::config::{HolidayRules, SchemeMetadata, StatutoryConfig};
/// use holiday_engine::models::ShiftPattern;
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::new(
///     SchemeMetadata {
///         code: "RPS-HOLIDAY".to_string(),
///         name: "Insolvency holiday pay".to_string(),
///         version: "2025-04-06".to_string(),
///         source_url: "https://example.com".to_string(),
///     },
///     HolidayRules {
///         statutory_weeks: Decimal::new(56, 1),
///         statutory_max_days: Decimal::from(28),
///         max_claimable_weeks: Decimal::from(6),
///     },
///     vec![],
/// );
///
/// let three_days = ShiftPattern::new(vec![Weekday::Mon, Weekday::Tue, Weekday::Wed]).unwrap();
/// assert_eq!(get_statutory_holiday_entitlement(&three_days, &config), Decimal::new(168, 1));
/// assert_eq!(get_statutory_holiday_entitlement(&ShiftPattern::weekdays(), &config), Decimal::from(28));
/// ```
pub fn get_statutory_holiday_entitlement(
    shift_pattern: &ShiftPattern,
    config: &StatutoryConfig,
) -> Decimal {
    let rules = config.holiday();
    (rules.statutory_weeks * shift_pattern.days_per_week()).min(rules.statutory_max_days)
}

/// Returns the holiday entitlement after taking the contract into account:
/// the greater of the statutory and contracted entitlements.
pub fn get_adjusted_holiday_entitlement(
    statutory_entitlement: Decimal,
    contracted_entitlement: Decimal,
) -> Decimal {
    statutory_entitlement.max(contracted_entitlement)
}

/// Returns the days an HPA claimant is entitled to for the holiday year:
/// the adjusted entitlement plus days carried forward.
///
/// # Errors
///
/// Returns `CalculationError` if the sum exceeds the decimal range.
pub fn holiday_entitlement_for_year(
    input: &HpaInput,
    config: &StatutoryConfig,
) -> EngineResult<Decimal> {
    let statutory = get_statutory_holiday_entitlement(&input.shift_pattern, config);
    get_adjusted_holiday_entitlement(statutory, input.contracted_hol_entitlement)
        .checked_add(input.days_carried_forward)
        .ok_or_else(|| EngineError::overflow("holiday entitlement for the year"))
}

/// Returns the maximum holiday entitlement claimable in days:
/// `max_claimable_weeks × days per week`.
pub fn maximum_holiday_entitlement(shift_pattern: &ShiftPattern, config: &StatutoryConfig) -> Decimal {
    config.holiday().max_claimable_weeks * shift_pattern.days_per_week()
}
