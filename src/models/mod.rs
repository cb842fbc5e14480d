//! Core data models for the Holiday Entitlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod holiday_request;
mod hpa_input;
mod input_source;
mod leave_record;
mod shift_pattern;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, HolidayCalculationResult, HpaResult, HpaWeeklyResult,
    HtnpAggregate, HtnpRecordResult,
};
pub use holiday_request::HolidayCalculationRequest;
pub use hpa_input::HpaInput;
pub use input_source::InputSource;
pub use leave_record::LeaveRecord;
pub use shift_pattern::ShiftPattern;
