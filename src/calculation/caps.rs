//! HTNP cap derivation.
//!
//! Holiday taken not paid is limited twice: days in the current holiday year
//! may not exceed what remains of the year's entitlement, and all days may
//! not exceed what remains of the claimable maximum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, AuditWarning, InputSource};

/// The rule ID for HTNP cap derivation.
pub const HTNP_CAPS_RULE_ID: &str = "htnp_caps";

/// The warning code raised when a derived cap is negative.
pub const NEGATIVE_CAP_WARNING: &str = "NEGATIVE_HTNP_CAP";

/// The two day caps handed to the HTNP calculator for one input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtnpCaps {
    /// Maximum payable days on or after the holiday year start.
    pub in_holiday_year: Decimal,
    /// Maximum payable days overall.
    pub in_total: Decimal,
}

impl HtnpCaps {
    /// No payable days.
    pub const ZERO: HtnpCaps = HtnpCaps {
        in_holiday_year: Decimal::ZERO,
        in_total: Decimal::ZERO,
    };

    /// Returns true if both caps are zero.
    pub fn is_zero(&self) -> bool {
        self.in_holiday_year.is_zero() && self.in_total.is_zero()
    }

    /// Returns these caps for the selected source and `ZERO` for the other.
    ///
    /// # Example
    ///
    /// ```
    /// use holiday_engine::calculation::HtnpCaps;
    /// use holiday_engine::models::InputSource;
    /// use rust_decimal::Decimal;
    ///
    /// let caps = HtnpCaps { in_holiday_year: Decimal::ZERO, in_total: Decimal::from(30) };
    /// assert_eq!(caps.for_source(InputSource::Rp1, InputSource::Rp1), caps);
    /// assert_eq!(caps.for_source(InputSource::Rp14a, InputSource::Rp1), HtnpCaps::ZERO);
    /// ```
    pub fn for_source(self, source: InputSource, selected: InputSource) -> HtnpCaps {
        if source == selected { self } else { HtnpCaps::ZERO }
    }

    fn is_negative(&self) -> bool {
        self.in_holiday_year < Decimal::ZERO || self.in_total < Decimal::ZERO
    }
}

/// The derived caps, with the audit step and any warning raised.
#[derive(Debug, Clone)]
pub struct HtnpCapsResult {
    /// Caps for the selected input source.
    pub caps: HtnpCaps,
    /// The audit step recording the derivation.
    pub audit_step: AuditStep,
    /// Raised when a cap is negative. Negative caps are passed on unchanged.
    pub warning: Option<AuditWarning>,
}

/// Derives the HTNP caps when the claim includes HPA.
///
/// - `in_holiday_year = min(entitlement_for_year, maximum) − accrued`
/// - `in_total = maximum − accrued`
///
/// where `accrued` is the HPA pro-rata accrued days. When accrued days
/// exceed the entitlement a cap goes negative; it is returned as computed
/// and flagged with a [`NEGATIVE_CAP_WARNING`] warning.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::calculate_htnp_caps_with_hpa;
/// use rust_decimal::Decimal;
///
/// let result = calculate_htnp_caps_with_hpa(
///     Decimal::from(30),  // entitlement for the year
///     Decimal::from(30),  // maximum holiday entitlement
///     Decimal::from(12),  // pro-rata accrued days
///     1,
/// );
/// assert_eq!(result.caps.in_holiday_year, Decimal::from(18));
/// assert_eq!(result.caps.in_total, Decimal::from(18));
/// assert!(result.warning.is_none());
/// ```
pub fn calculate_htnp_caps_with_hpa(
    entitlement_for_year: Decimal,
    maximum_holiday_entitlement: Decimal,
    pro_rata_accrued_days: Decimal,
    step_number: u32,
) -> HtnpCapsResult {
    let caps = HtnpCaps {
        in_holiday_year: entitlement_for_year.min(maximum_holiday_entitlement)
            - pro_rata_accrued_days,
        in_total: maximum_holiday_entitlement - pro_rata_accrued_days,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: HTNP_CAPS_RULE_ID.to_string(),
        rule_name: "HTNP Caps (with HPA)".to_string(),
        input: serde_json::json!({
            "entitlement_for_year": entitlement_for_year.normalize().to_string(),
            "maximum_holiday_entitlement": maximum_holiday_entitlement.normalize().to_string(),
            "pro_rata_accrued_days": pro_rata_accrued_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "in_holiday_year": caps.in_holiday_year.normalize().to_string(),
            "in_total": caps.in_total.normalize().to_string()
        }),
        reasoning: format!(
            "min({}, {}) - {} = {} days in holiday year; {} - {} = {} days in total",
            entitlement_for_year.normalize(),
            maximum_holiday_entitlement.normalize(),
            pro_rata_accrued_days.normalize(),
            caps.in_holiday_year.normalize(),
            maximum_holiday_entitlement.normalize(),
            pro_rata_accrued_days.normalize(),
            caps.in_total.normalize()
        ),
    };

    let warning = caps.is_negative().then(|| AuditWarning {
        code: NEGATIVE_CAP_WARNING.to_string(),
        message: format!(
            "Pro-rata accrued days ({}) exceed the entitlement; HTNP caps are {} in holiday year and {} in total",
            pro_rata_accrued_days.normalize(),
            caps.in_holiday_year.normalize(),
            caps.in_total.normalize()
        ),
        severity: "medium".to_string(),
    });

    HtnpCapsResult {
        caps,
        audit_step,
        warning,
    }
}

/// Derives the HTNP caps when the claim has no HPA.
///
/// There is no holiday-year boundary, so only the total cap applies:
/// `{ in_holiday_year: 0, in_total: maximum }`.
pub fn calculate_htnp_caps_without_hpa(
    maximum_holiday_entitlement: Decimal,
    step_number: u32,
) -> HtnpCapsResult {
    let caps = HtnpCaps {
        in_holiday_year: Decimal::ZERO,
        in_total: maximum_holiday_entitlement,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: HTNP_CAPS_RULE_ID.to_string(),
        rule_name: "HTNP Caps (without HPA)".to_string(),
        input: serde_json::json!({
            "maximum_holiday_entitlement": maximum_holiday_entitlement.normalize().to_string()
        }),
        output: serde_json::json!({
            "in_holiday_year": "0",
            "in_total": caps.in_total.normalize().to_string()
        }),
        reasoning: format!(
            "No HPA claim: total cap is the maximum holiday entitlement of {} days, no holiday year cap",
            maximum_holiday_entitlement.normalize()
        ),
    };

    HtnpCapsResult {
        caps,
        audit_step,
        warning: None,
    }
}
