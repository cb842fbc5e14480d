//! Input source tags for HTNP leave records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The claim-form section a leave record was reported under.
///
/// RP1 is completed by the employee, RP14a by the insolvency practitioner.
/// Both may report the same holiday, so the engine picks one as the
/// authoritative source per request.
///
/// # Example
///
/// ```
/// use holiday_engine::models::InputSource;
///
/// assert_eq!(InputSource::Rp14a.to_string(), "RP14a");
/// assert_eq!(InputSource::Rp1.to_string(), "RP1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Reported by the employee.
    Rp1,
    /// Reported by the insolvency practitioner.
    Rp14a,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Rp1 => write!(f, "RP1"),
            InputSource::Rp14a => write!(f, "RP14a"),
        }
    }
}
