//! Holiday calculation request model.

use serde::{Deserialize, Serialize};

use super::{HpaInput, LeaveRecord};

/// Everything the engine needs to calculate holiday pay for one employee.
///
/// Both parts are optional: a request with neither produces an empty result.
///
/// # Example
///
/// ```
/// use holiday_engine::models::HolidayCalculationRequest;
///
/// let request: HolidayCalculationRequest = serde_json::from_str("{}").unwrap();
/// assert!(request.hpa.is_none());
/// assert!(request.htnp.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidayCalculationRequest {
    /// Holiday pay accrued input, if the claim includes one.
    #[serde(default)]
    pub hpa: Option<HpaInput>,
    /// Holiday taken not paid records across both input sources.
    #[serde(default)]
    pub htnp: Vec<LeaveRecord>,
}
