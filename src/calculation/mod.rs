//! Calculation logic for the Holiday Entitlement Engine.
//!
//! This module contains the holiday year and entitlement arithmetic, HTNP day
//! counting, input source selection, days-taken harmonisation, HTNP cap
//! derivation, the reference HPA and HTNP calculators, and the
//! [`HolidayCalculationService`] that orchestrates them.

mod caps;
mod day_counter;
mod days_taken;
mod holiday_calculation;
mod holiday_year;
mod hpa;
mod htnp;
mod source_selection;
mod statutory_entitlement;

pub use caps::{
    HTNP_CAPS_RULE_ID, HtnpCaps, HtnpCapsResult, NEGATIVE_CAP_WARNING,
    calculate_htnp_caps_with_hpa, calculate_htnp_caps_without_hpa,
};
pub use day_counter::{HtnpDayCounter, RecordDayCounter, get_htnp_days};
pub use days_taken::{DAYS_TAKEN_RULE_ID, DaysTakenResult, harmonise_days_taken};
pub use holiday_calculation::{HolidayCalculationService, StatutoryHolidayCalculationService};
pub use holiday_year::{get_holiday_year_start, holiday_year_end, twelve_months_prior};
pub use hpa::{HpaCalculator, StatutoryHpaCalculator, calculate_holiday_pay_accrued};
pub use htnp::{HtnpCalculator, StatutoryHtnpCalculator, calculate_holiday_taken_not_paid};
pub use source_selection::{
    SOURCE_SELECTION_RULE_ID, SourceSelectionResult, select_input_source,
    select_source_for_window,
};
pub use statutory_entitlement::{
    get_adjusted_holiday_entitlement, get_statutory_holiday_entitlement,
    holiday_entitlement_for_year, maximum_holiday_entitlement,
};
