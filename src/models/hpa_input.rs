//! Holiday Pay Accrued (HPA) input model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShiftPattern;

/// The HPA part of a holiday calculation request.
///
/// The engine never mutates a caller's `HpaInput`. When HTNP records are
/// present it derives a harmonised copy with [`HpaInput::harmonised`] and
/// hands that copy to the HPA calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HpaInput {
    /// The date the employer became insolvent.
    pub insolvency_date: NaiveDate,
    /// The date the employee was dismissed.
    pub dismissal_date: NaiveDate,
    /// A start date of the employer's holiday year. Only its anniversary
    /// matters, so any past start date may be supplied.
    pub holiday_year_start: NaiveDate,
    /// The weekdays the employee normally works.
    pub shift_pattern: ShiftPattern,
    /// The employee's gross weekly wage.
    pub weekly_wage: Decimal,
    /// Holiday days per year granted by the employment contract.
    pub contracted_hol_entitlement: Decimal,
    /// Days carried forward from the previous holiday year.
    #[serde(default)]
    pub days_carried_forward: Decimal,
    /// Days of holiday already taken in the current holiday year.
    #[serde(default)]
    pub days_taken: Decimal,
}

impl HpaInput {
    /// Returns the earlier of the dismissal and insolvency dates.
    pub fn claim_end_date(&self) -> NaiveDate {
        self.dismissal_date.min(self.insolvency_date)
    }

    /// Returns a copy whose days taken is raised to at least
    /// `htnp_days_in_holiday_year`. Days taken is never lowered.
    ///
    /// # Example
    ///
    /// ```
    /// use holiday_engine::models::{HpaInput, ShiftPattern};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let input = HpaInput {
    ///     insolvency_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    ///     dismissal_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    ///     holiday_year_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    ///     shift_pattern: ShiftPattern::weekdays(),
    ///     weekly_wage: Decimal::new(500, 0),
    ///     contracted_hol_entitlement: Decimal::new(20, 0),
    ///     days_carried_forward: Decimal::ZERO,
    ///     days_taken: Decimal::new(3, 0),
    /// };
    ///
    /// assert_eq!(input.harmonised(Decimal::new(5, 0)).days_taken, Decimal::new(5, 0));
    /// assert_eq!(input.harmonised(Decimal::new(1, 0)).days_taken, Decimal::new(3, 0));
    /// ```
    pub fn harmonised(&self, htnp_days_in_holiday_year: Decimal) -> HpaInput {
        HpaInput {
            days_taken: self.days_taken.max(htnp_days_in_holiday_year),
            ..self.clone()
        }
    }
}
