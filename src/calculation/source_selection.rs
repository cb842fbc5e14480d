//! Input source selection.
//!
//! RP1 and RP14a may both report holiday taken in the twelve months before
//! insolvency. Exactly one of them is treated as authoritative per request.

use chrono::NaiveDate;

use crate::models::{AuditStep, InputSource};

/// The rule ID for input source selection.
pub const SOURCE_SELECTION_RULE_ID: &str = "input_source_selection";

/// Chooses the authoritative input source from the number of days each
/// reports in the trailing twelve-month window.
///
/// RP1 is chosen when it reports something and either reports fewer days
/// than RP14a or RP14a reports nothing. In every other case RP14a is chosen,
/// including when neither reports anything and when RP1 reports more days
/// than a non-empty RP14a.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::select_input_source;
/// use holiday_engine::models::InputSource;
///
/// assert_eq!(select_input_source(2, 5), InputSource::Rp1);
/// assert_eq!(select_input_source(3, 0), InputSource::Rp1);
/// assert_eq!(select_input_source(0, 0), InputSource::Rp14a);
/// assert_eq!(select_input_source(5, 2), InputSource::Rp14a);
/// assert_eq!(select_input_source(4, 4), InputSource::Rp14a);
/// ```
pub fn select_input_source(rp1_days: usize, rp14a_days: usize) -> InputSource {
    if (rp1_days > 0 && rp1_days < rp14a_days) || (rp14a_days == 0 && rp1_days > 0) {
        InputSource::Rp1
    } else {
        InputSource::Rp14a
    }
}

/// The outcome of input source selection, including the audit step.
#[derive(Debug, Clone)]
pub struct SourceSelectionResult {
    /// The authoritative input source.
    pub selected: InputSource,
    /// RP1 days in the window.
    pub rp1_days: usize,
    /// RP14a days in the window.
    pub rp14a_days: usize,
    /// The first day of the trailing window.
    pub window_start: NaiveDate,
    /// The last day of the trailing window (the claim end date).
    pub window_end: NaiveDate,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Selects the input source for the given window counts and records the
/// decision as an audit step.
pub fn select_source_for_window(
    rp1_days: usize,
    rp14a_days: usize,
    window_start: NaiveDate,
    window_end: NaiveDate,
    step_number: u32,
) -> SourceSelectionResult {
    let selected = select_input_source(rp1_days, rp14a_days);

    let reasoning = match (rp1_days, rp14a_days) {
        (0, 0) => "Neither source reports days in the window; RP14a is the default".to_string(),
        (r1, 0) => format!("Only RP1 reports days in the window ({})", r1),
        (r1, r14a) if selected == InputSource::Rp1 => {
            format!("RP1 reports fewer days than RP14a ({} < {})", r1, r14a)
        }
        (r1, r14a) => format!(
            "RP14a selected: RP1 reports {} day(s), RP14a reports {} day(s)",
            r1, r14a
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: SOURCE_SELECTION_RULE_ID.to_string(),
        rule_name: "Input Source Selection".to_string(),
        input: serde_json::json!({
            "window_start": window_start.to_string(),
            "window_end": window_end.to_string(),
            "rp1_days": rp1_days,
            "rp14a_days": rp14a_days
        }),
        output: serde_json::json!({
            "selected_input_source": selected
        }),
        reasoning,
    };

    SourceSelectionResult {
        selected,
        rp1_days,
        rp14a_days,
        window_start,
        window_end,
        audit_step,
    }
}
