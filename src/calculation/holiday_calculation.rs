//! Holiday calculation orchestration.
//!
//! Reconciles a claim's holiday pay accrued (HPA) input with the holiday
//! taken not paid (HTNP) records reported by two input sources, RP1 and
//! RP14a. One source is chosen as authoritative; only that source is paid
//! against the HTNP caps, while the other is still calculated with zero caps
//! so both result lists are always present.

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, HolidayCalculationRequest, HolidayCalculationResult, HpaInput, HtnpAggregate,
    InputSource, LeaveRecord,
};

use super::caps::{HtnpCaps, calculate_htnp_caps_with_hpa, calculate_htnp_caps_without_hpa};
use super::day_counter::{HtnpDayCounter, RecordDayCounter};
use super::days_taken::harmonise_days_taken;
use super::holiday_year::{get_holiday_year_start, twelve_months_prior};
use super::hpa::{HpaCalculator, StatutoryHpaCalculator};
use super::htnp::{HtnpCalculator, StatutoryHtnpCalculator};
use super::source_selection::select_source_for_window;
use super::statutory_entitlement::{holiday_entitlement_for_year, maximum_holiday_entitlement};

/// The holiday calculation service wired to the statutory collaborators.
pub type StatutoryHolidayCalculationService =
    HolidayCalculationService<RecordDayCounter, StatutoryHpaCalculator, StatutoryHtnpCalculator>;

/// Orchestrates a holiday calculation across its collaborators.
///
/// The service holds no per-request state and can serve concurrent
/// requests.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::StatutoryHolidayCalculationService;
/// use holiday_engine::config::ConfigLoader;
/// use holiday_engine::models::HolidayCalculationRequest;
///
/// let config = ConfigLoader::load("./config/statutory").unwrap();
/// let service = StatutoryHolidayCalculationService::default();
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let result = runtime
///     .block_on(service.perform_holiday_calculation(
///         &HolidayCalculationRequest::default(),
///         config.config(),
///     ))
///     .unwrap();
///
/// assert!(result.hpa.is_none());
/// assert!(result.htnp.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalculationService<C, A, N> {
    day_counter: C,
    hpa_calculator: A,
    htnp_calculator: N,
}

/// The authoritative source and the window it was chosen over.
#[derive(Debug, Clone, Copy)]
struct Selection {
    selected: InputSource,
    end_date: NaiveDate,
}

impl<C, A, N> HolidayCalculationService<C, A, N>
where
    C: HtnpDayCounter,
    A: HpaCalculator,
    N: HtnpCalculator,
{
    /// Creates a service from its collaborators.
    pub fn new(day_counter: C, hpa_calculator: A, htnp_calculator: N) -> Self {
        Self {
            day_counter,
            hpa_calculator,
            htnp_calculator,
        }
    }

    /// Performs the holiday calculation for a request.
    ///
    /// - With an HPA input, HPA is calculated and, if HTNP records are
    ///   present, the declared days taken is harmonised with the
    ///   authoritative source first and the HTNP caps are derived from the
    ///   HPA result.
    /// - With HTNP records only, the authoritative source is paid up to the
    ///   claimable maximum and no holiday year cap applies.
    /// - With neither, an empty result is returned and no collaborator is
    ///   called.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a collaborator. No partial result
    /// is returned.
    pub async fn perform_holiday_calculation(
        &self,
        request: &HolidayCalculationRequest,
        config: &StatutoryConfig,
    ) -> EngineResult<HolidayCalculationResult> {
        let start_time = Instant::now();
        let mut result = HolidayCalculationResult::empty(Uuid::new_v4());
        let calculation_id = result.calculation_id;

        info!(
            calculation_id = %calculation_id,
            has_hpa = request.hpa.is_some(),
            htnp_records = request.htnp.len(),
            "Processing holiday calculation"
        );

        let outcome = match (&request.hpa, request.htnp.first()) {
            (Some(hpa), _) => self.calculate_with_hpa(hpa, &request.htnp, config, &mut result).await,
            (None, Some(first)) => {
                self.calculate_without_hpa(first, &request.htnp, config, &mut result)
                    .await
            }
            (None, None) => {
                debug!(calculation_id = %calculation_id, "No HPA input or HTNP records");
                Ok(())
            }
        };

        if let Err(err) = &outcome {
            warn!(
                calculation_id = %calculation_id,
                error = %err,
                "Holiday calculation failed"
            );
        }
        outcome?;

        result.audit_trace.duration_us = start_time.elapsed().as_micros() as u64;

        info!(
            calculation_id = %calculation_id,
            hpa_gross = %result.hpa.as_ref().map(|h| h.total_gross_entitlement()).unwrap_or_default(),
            selected_input_source = ?result.htnp.as_ref().map(|h| h.selected_input_source),
            warnings = result.audit_trace.warnings.len(),
            duration_us = result.audit_trace.duration_us,
            "Holiday calculation completed"
        );

        Ok(result)
    }

    async fn calculate_with_hpa(
        &self,
        hpa: &HpaInput,
        records: &[LeaveRecord],
        config: &StatutoryConfig,
        result: &mut HolidayCalculationResult,
    ) -> EngineResult<()> {
        let trace = &mut result.audit_trace;

        let Some(first) = records.first() else {
            result.hpa = Some(self.hpa_calculator.calculate(hpa, config).await?);
            return Ok(());
        };

        let selection = self.select_source(first, records, trace).await?;

        let holiday_year_start = get_holiday_year_start(hpa)?;
        let days_in_holiday_year = self
            .day_counter
            .htnp_days(records, selection.selected, holiday_year_start, selection.end_date)
            .await?;

        let harmonisation = harmonise_days_taken(
            hpa,
            selection.selected,
            days_in_holiday_year.len(),
            holiday_year_start,
            trace.next_step_number(),
        );
        debug!(
            holiday_year_start = %holiday_year_start,
            declared = %hpa.days_taken,
            days_taken = %harmonisation.input.days_taken,
            adjusted = harmonisation.adjusted,
            "Harmonised days taken"
        );
        trace.steps.push(harmonisation.audit_step);

        let hpa_result = self
            .hpa_calculator
            .calculate(&harmonisation.input, config)
            .await?;

        let maximum = maximum_holiday_entitlement(&first.shift_pattern, config);
        let entitlement_for_year = holiday_entitlement_for_year(hpa, config)?;

        let caps_result = calculate_htnp_caps_with_hpa(
            entitlement_for_year,
            maximum,
            hpa_result.pro_rata_accrued_days,
            trace.next_step_number(),
        );
        debug!(
            in_holiday_year = %caps_result.caps.in_holiday_year,
            in_total = %caps_result.caps.in_total,
            "Derived HTNP caps"
        );
        trace.steps.push(caps_result.audit_step);
        if let Some(warning) = caps_result.warning {
            warn!(
                code = %warning.code,
                pro_rata_accrued_days = %hpa_result.pro_rata_accrued_days,
                "{}",
                warning.message
            );
            trace.warnings.push(warning);
        }

        let htnp = self
            .dispatch_htnp(
                records,
                selection.selected,
                caps_result.caps,
                Some(holiday_year_start),
                config,
            )
            .await?;

        result.hpa = Some(hpa_result);
        result.htnp = Some(htnp);
        Ok(())
    }

    async fn calculate_without_hpa(
        &self,
        first: &LeaveRecord,
        records: &[LeaveRecord],
        config: &StatutoryConfig,
        result: &mut HolidayCalculationResult,
    ) -> EngineResult<()> {
        let trace = &mut result.audit_trace;
        let selection = self.select_source(first, records, trace).await?;

        let maximum = maximum_holiday_entitlement(&first.shift_pattern, config);
        let caps_result = calculate_htnp_caps_without_hpa(maximum, trace.next_step_number());
        debug!(in_total = %caps_result.caps.in_total, "Derived HTNP caps");
        trace.steps.push(caps_result.audit_step);

        let htnp = self
            .dispatch_htnp(records, selection.selected, caps_result.caps, None, config)
            .await?;

        result.htnp = Some(htnp);
        Ok(())
    }

    /// Counts both sources over the twelve months up to the first record's
    /// claim end date and picks the authoritative one.
    async fn select_source(
        &self,
        first: &LeaveRecord,
        records: &[LeaveRecord],
        trace: &mut AuditTrace,
    ) -> EngineResult<Selection> {
        let end_date = first.claim_end_date();
        let window_start = twelve_months_prior(first.insolvency_date)?;

        let (rp1_days, rp14a_days) = tokio::try_join!(
            self.day_counter
                .htnp_days(records, InputSource::Rp1, window_start, end_date),
            self.day_counter
                .htnp_days(records, InputSource::Rp14a, window_start, end_date),
        )?;

        let selection = select_source_for_window(
            rp1_days.len(),
            rp14a_days.len(),
            window_start,
            end_date,
            trace.next_step_number(),
        );
        debug!(
            window_start = %selection.window_start,
            window_end = %selection.window_end,
            rp1_days = selection.rp1_days,
            rp14a_days = selection.rp14a_days,
            selected = %selection.selected,
            "Selected input source"
        );

        trace.steps.push(selection.audit_step);

        Ok(Selection {
            selected: selection.selected,
            end_date: selection.window_end,
        })
    }

    /// Runs the HTNP calculator for both sources; only `selected` gets
    /// `caps`.
    async fn dispatch_htnp(
        &self,
        records: &[LeaveRecord],
        selected: InputSource,
        caps: HtnpCaps,
        holiday_year_start: Option<NaiveDate>,
        config: &StatutoryConfig,
    ) -> EngineResult<HtnpAggregate> {
        let (rp1_results, rp14a_results) = tokio::try_join!(
            self.htnp_calculator.calculate(
                records,
                InputSource::Rp1,
                caps.for_source(InputSource::Rp1, selected),
                holiday_year_start,
                config,
            ),
            self.htnp_calculator.calculate(
                records,
                InputSource::Rp14a,
                caps.for_source(InputSource::Rp14a, selected),
                holiday_year_start,
                config,
            ),
        )?;

        Ok(HtnpAggregate {
            selected_input_source: selected,
            rp1_results,
            rp14a_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::caps::{HTNP_CAPS_RULE_ID, NEGATIVE_CAP_WARNING};
    use crate::calculation::day_counter::get_htnp_days;
    use crate::calculation::days_taken::DAYS_TAKEN_RULE_ID;
    use crate::calculation::htnp::calculate_holiday_taken_not_paid;
    use crate::calculation::source_selection::SOURCE_SELECTION_RULE_ID;
    use crate::config::{HolidayRules, SchemeMetadata, WeeklyPayCap};
    use crate::error::EngineError;
    use crate::models::{HpaResult, HtnpRecordResult, ShiftPattern};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Mutex;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_config() -> StatutoryConfig {
        StatutoryConfig::new(
            SchemeMetadata {
                code: "RPS-HOLIDAY".to_string(),
                name: "Insolvency holiday pay".to_string(),
                version: "2025-04-06".to_string(),
                source_url: "https://example.com".to_string(),
            },
            HolidayRules {
                statutory_weeks: dec("5.6"),
                statutory_max_days: dec("28"),
                max_claimable_weeks: dec("6"),
            },
            vec![WeeklyPayCap {
                effective_date: make_date("2025-04-06"),
                weekly_pay_cap: dec("719"),
            }],
        )
    }

    /// Day counter recording `(source, start, end)` for every call.
    #[derive(Default)]
    struct RecordingDayCounter {
        calls: Mutex<Vec<(InputSource, NaiveDate, NaiveDate)>>,
    }

    #[async_trait]
    impl HtnpDayCounter for RecordingDayCounter {
        async fn htnp_days(
            &self,
            records: &[LeaveRecord],
            source: InputSource,
            start: NaiveDate,
            end: NaiveDate,
        ) -> EngineResult<Vec<NaiveDate>> {
            self.calls.lock().unwrap().push((source, start, end));
            get_htnp_days(records, source, start, end)
        }
    }

    /// HPA calculator recording its inputs and returning a fixed accrual.
    struct RecordingHpaCalculator {
        pro_rata_accrued_days: Decimal,
        calls: Mutex<Vec<HpaInput>>,
    }

    impl RecordingHpaCalculator {
        fn returning(pro_rata_accrued_days: &str) -> Self {
            Self {
                pro_rata_accrued_days: dec(pro_rata_accrued_days),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HpaCalculator for RecordingHpaCalculator {
        async fn calculate(
            &self,
            input: &HpaInput,
            _config: &StatutoryConfig,
        ) -> EngineResult<HpaResult> {
            self.calls.lock().unwrap().push(input.clone());
            Ok(HpaResult {
                statutory_max: dec("719"),
                holidays_owed: self.pro_rata_accrued_days.min(dec("30")),
                business_days_in_claim: dec("129"),
                working_days_in_claim: dec("129"),
                pro_rata_accrued_days: self.pro_rata_accrued_days,
                weekly_results: Vec::new(),
            })
        }
    }

    /// HTNP calculator recording `(source, caps, boundary)` for every call.
    #[derive(Default)]
    struct RecordingHtnpCalculator {
        fail: bool,
        calls: Mutex<Vec<(InputSource, HtnpCaps, Option<NaiveDate>)>>,
    }

    #[async_trait]
    impl HtnpCalculator for RecordingHtnpCalculator {
        async fn calculate(
            &self,
            records: &[LeaveRecord],
            source: InputSource,
            caps: HtnpCaps,
            holiday_year_start: Option<NaiveDate>,
            config: &StatutoryConfig,
        ) -> EngineResult<Vec<HtnpRecordResult>> {
            self.calls
                .lock()
                .unwrap()
                .push((source, caps, holiday_year_start));
            if self.fail {
                return Err(EngineError::CalculationError {
                    message: "HTNP calculator unavailable".to_string(),
                });
            }
            calculate_holiday_taken_not_paid(records, source, caps, holiday_year_start, config)
        }
    }

    type TestService =
        HolidayCalculationService<RecordingDayCounter, RecordingHpaCalculator, RecordingHtnpCalculator>;

    fn create_service(pro_rata_accrued_days: &str) -> TestService {
        HolidayCalculationService::new(
            RecordingDayCounter::default(),
            RecordingHpaCalculator::returning(pro_rata_accrued_days),
            RecordingHtnpCalculator::default(),
        )
    }

    fn create_hpa_input() -> HpaInput {
        HpaInput {
            insolvency_date: make_date("2025-06-30"),
            dismissal_date: make_date("2025-06-30"),
            holiday_year_start: make_date("2020-01-01"),
            shift_pattern: ShiftPattern::weekdays(),
            weekly_wage: dec("500"),
            contracted_hol_entitlement: dec("20"),
            days_carried_forward: dec("2"),
            days_taken: dec("3"),
        }
    }

    fn create_record(source: InputSource, from: &str, to: &str) -> LeaveRecord {
        LeaveRecord {
            input_source: source,
            insolvency_date: make_date("2025-06-30"),
            dismissal_date: make_date("2025-06-30"),
            unpaid_period_from: make_date(from),
            unpaid_period_to: make_date(to),
            weekly_wage: dec("500"),
            shift_pattern: ShiftPattern::weekdays(),
        }
    }

    fn caps_received(
        service: &TestService,
        source: InputSource,
    ) -> (HtnpCaps, Option<NaiveDate>) {
        let calls = service.htnp_calculator.calls.lock().unwrap();
        let (_, caps, boundary) = calls
            .iter()
            .find(|(s, _, _)| *s == source)
            .copied()
            .expect("HTNP calculator was not called for source");
        (caps, boundary)
    }

    #[tokio::test]
    async fn test_empty_request_calls_no_collaborator() {
        let service = create_service("0");
        let config = create_test_config();

        let result = service
            .perform_holiday_calculation(&HolidayCalculationRequest::default(), &config)
            .await
            .unwrap();

        assert!(result.hpa.is_none());
        assert!(result.htnp.is_none());
        assert!(result.audit_trace.steps.is_empty());
        assert!(service.day_counter.calls.lock().unwrap().is_empty());
        assert!(service.hpa_calculator.calls.lock().unwrap().is_empty());
        assert!(service.htnp_calculator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hpa_only_skips_htnp() {
        let service = create_service("11.8767");
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: Some(create_hpa_input()),
            htnp: Vec::new(),
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        assert!(result.hpa.is_some());
        assert!(result.htnp.is_none());
        assert!(service.day_counter.calls.lock().unwrap().is_empty());
        assert!(service.htnp_calculator.calls.lock().unwrap().is_empty());
        // Passed through unharmonised
        assert_eq!(
            service.hpa_calculator.calls.lock().unwrap()[0],
            create_hpa_input()
        );
    }

    #[tokio::test]
    async fn test_htnp_without_hpa() {
        let service = create_service("0");
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: None,
            htnp: vec![create_record(InputSource::Rp14a, "2025-05-05", "2025-05-09")],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        assert!(result.hpa.is_none());
        assert!(service.hpa_calculator.calls.lock().unwrap().is_empty());

        let htnp = result.htnp.unwrap();
        assert_eq!(htnp.selected_input_source, InputSource::Rp14a);
        assert!(htnp.rp1_results.is_empty());
        assert_eq!(htnp.days_payable(InputSource::Rp14a), dec("5"));

        let (rp14a_caps, rp14a_boundary) = caps_received(&service, InputSource::Rp14a);
        assert_eq!(rp14a_caps.in_holiday_year, Decimal::ZERO);
        assert_eq!(rp14a_caps.in_total, dec("30"));
        assert_eq!(rp14a_boundary, None);

        let (rp1_caps, rp1_boundary) = caps_received(&service, InputSource::Rp1);
        assert_eq!(rp1_caps, HtnpCaps::ZERO);
        assert_eq!(rp1_boundary, None);

        // Both counts over 2024-07-01..=2025-06-30
        let counts = service.day_counter.calls.lock().unwrap();
        assert_eq!(counts.len(), 2);
        assert!(counts
            .iter()
            .all(|(_, start, end)| *start == make_date("2024-07-01")
                && *end == make_date("2025-06-30")));
    }

    #[tokio::test]
    async fn test_full_claim_selects_rp1_and_caps_it() {
        let service = create_service("11.8767");
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: Some(create_hpa_input()),
            htnp: vec![
                create_record(InputSource::Rp1, "2025-05-05", "2025-05-05"),
                create_record(InputSource::Rp14a, "2025-05-05", "2025-05-08"),
            ],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        let htnp = result.htnp.as_ref().unwrap();
        assert_eq!(htnp.selected_input_source, InputSource::Rp1);

        // Declared 3 days covers the 1 RP1 day in the holiday year
        let hpa_calls = service.hpa_calculator.calls.lock().unwrap();
        assert_eq!(hpa_calls.len(), 1);
        assert_eq!(hpa_calls[0].days_taken, dec("3"));

        // Third count is the selected source over the holiday year
        let counts = service.day_counter.calls.lock().unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(
            counts[2],
            (InputSource::Rp1, make_date("2025-01-01"), make_date("2025-06-30"))
        );

        // for_year = max(28, 20) + 2 = 30; maximum = 6 * 5 = 30
        let (rp1_caps, rp1_boundary) = caps_received(&service, InputSource::Rp1);
        assert_eq!(rp1_caps.in_holiday_year, dec("18.1233"));
        assert_eq!(rp1_caps.in_total, dec("18.1233"));
        assert_eq!(rp1_boundary, Some(make_date("2025-01-01")));

        let (rp14a_caps, rp14a_boundary) = caps_received(&service, InputSource::Rp14a);
        assert_eq!(rp14a_caps, HtnpCaps::ZERO);
        assert_eq!(rp14a_boundary, Some(make_date("2025-01-01")));

        assert_eq!(htnp.days_payable(InputSource::Rp1), dec("1"));
        assert_eq!(htnp.rp14a_results.len(), 1);
        assert_eq!(htnp.days_payable(InputSource::Rp14a), Decimal::ZERO);

        let steps: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            steps,
            vec![SOURCE_SELECTION_RULE_ID, DAYS_TAKEN_RULE_ID, HTNP_CAPS_RULE_ID]
        );
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_days_taken_raised_to_reported_days() {
        let service = create_service("8");
        let config = create_test_config();
        let mut hpa = create_hpa_input();
        hpa.days_taken = Decimal::ZERO;
        let request = HolidayCalculationRequest {
            hpa: Some(hpa),
            htnp: vec![create_record(InputSource::Rp14a, "2025-05-05", "2025-05-08")],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        assert_eq!(
            service.hpa_calculator.calls.lock().unwrap()[0].days_taken,
            dec("4")
        );
        // The request itself is untouched
        assert_eq!(request.hpa.as_ref().unwrap().days_taken, Decimal::ZERO);

        let step = result.audit_trace.step(DAYS_TAKEN_RULE_ID).unwrap();
        assert_eq!(step.output["adjusted"], true);
    }

    #[tokio::test]
    async fn test_rp1_more_days_than_rp14a_selects_rp14a() {
        let service = create_service("0");
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: None,
            htnp: vec![
                create_record(InputSource::Rp1, "2025-05-05", "2025-05-09"),
                create_record(InputSource::Rp14a, "2025-05-05", "2025-05-06"),
            ],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        let htnp = result.htnp.unwrap();
        assert_eq!(htnp.selected_input_source, InputSource::Rp14a);
        assert_eq!(caps_received(&service, InputSource::Rp1).0, HtnpCaps::ZERO);
        assert_eq!(
            caps_received(&service, InputSource::Rp14a).0.in_total,
            dec("30")
        );
        assert_eq!(htnp.days_payable(InputSource::Rp1), Decimal::ZERO);
        assert_eq!(htnp.days_payable(InputSource::Rp14a), dec("2"));
    }

    #[tokio::test]
    async fn test_records_outside_window_default_to_rp14a() {
        let service = create_service("0");
        let config = create_test_config();
        // Both unpaid periods end before the window opens on 2024-07-01
        let request = HolidayCalculationRequest {
            hpa: None,
            htnp: vec![
                create_record(InputSource::Rp1, "2024-05-06", "2024-05-10"),
                create_record(InputSource::Rp14a, "2024-05-13", "2024-05-17"),
            ],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        let step = result.audit_trace.step(SOURCE_SELECTION_RULE_ID).unwrap();
        assert_eq!(step.input["rp1_days"], 0);
        assert_eq!(step.input["rp14a_days"], 0);

        let htnp = result.htnp.unwrap();
        assert_eq!(htnp.selected_input_source, InputSource::Rp14a);

        let (rp14a_caps, _) = caps_received(&service, InputSource::Rp14a);
        assert_eq!(rp14a_caps.in_holiday_year, Decimal::ZERO);
        assert_eq!(rp14a_caps.in_total, dec("30"));
        assert_eq!(caps_received(&service, InputSource::Rp1).0, HtnpCaps::ZERO);

        assert_eq!(htnp.days_payable(InputSource::Rp1), Decimal::ZERO);
        assert_eq!(htnp.days_payable(InputSource::Rp14a), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_exactly_one_source_gets_nonzero_caps() {
        let config = create_test_config();
        let scenarios = vec![
            vec![create_record(InputSource::Rp1, "2025-05-05", "2025-05-09")],
            vec![create_record(InputSource::Rp14a, "2025-05-05", "2025-05-09")],
            vec![
                create_record(InputSource::Rp1, "2025-05-05", "2025-05-06"),
                create_record(InputSource::Rp14a, "2025-05-05", "2025-05-09"),
            ],
        ];

        for records in scenarios {
            let service = create_service("5");
            let request = HolidayCalculationRequest {
                hpa: Some(create_hpa_input()),
                htnp: records,
            };
            service
                .perform_holiday_calculation(&request, &config)
                .await
                .unwrap();

            let calls = service.htnp_calculator.calls.lock().unwrap();
            assert_eq!(calls.len(), 2);
            let nonzero = calls.iter().filter(|(_, caps, _)| !caps.is_zero()).count();
            assert_eq!(nonzero, 1);
        }
    }

    #[tokio::test]
    async fn test_negative_caps_passed_through_with_warning() {
        let service = create_service("32");
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: Some(create_hpa_input()),
            htnp: vec![create_record(InputSource::Rp1, "2025-05-05", "2025-05-09")],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        let (caps, _) = caps_received(&service, InputSource::Rp1);
        assert_eq!(caps.in_holiday_year, dec("-2"));
        assert_eq!(caps.in_total, dec("-2"));

        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, NEGATIVE_CAP_WARNING);

        let htnp = result.htnp.unwrap();
        assert_eq!(htnp.days_payable(InputSource::Rp1), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_collaborator_error_propagates() {
        let service = HolidayCalculationService::new(
            RecordingDayCounter::default(),
            RecordingHpaCalculator::returning("5"),
            RecordingHtnpCalculator {
                fail: true,
                ..Default::default()
            },
        );
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: Some(create_hpa_input()),
            htnp: vec![create_record(InputSource::Rp1, "2025-05-05", "2025-05-09")],
        };

        let result = service.perform_holiday_calculation(&request, &config).await;

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[tokio::test]
    async fn test_invalid_record_aborts_request() {
        let service = create_service("5");
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: None,
            htnp: vec![create_record(InputSource::Rp14a, "2025-05-09", "2025-05-05")],
        };

        let result = service.perform_holiday_calculation(&request, &config).await;

        assert!(matches!(
            result,
            Err(EngineError::InvalidLeaveRecord {
                input_source: InputSource::Rp14a,
                ..
            })
        ));
        assert!(service.htnp_calculator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wage_outside_decimal_range_fails_request() {
        let service = StatutoryHolidayCalculationService::default();
        let config = create_test_config();
        let mut hpa = create_hpa_input();
        hpa.weekly_wage = dec("50000000000000000000000000000");
        let request = HolidayCalculationRequest {
            hpa: Some(hpa),
            htnp: vec![create_record(InputSource::Rp14a, "2025-05-05", "2025-05-09")],
        };

        let result = service.perform_holiday_calculation(&request, &config).await;

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[tokio::test]
    async fn test_statutory_service_end_to_end() {
        let service = StatutoryHolidayCalculationService::default();
        let config = create_test_config();
        let request = HolidayCalculationRequest {
            hpa: Some(create_hpa_input()),
            htnp: vec![create_record(InputSource::Rp14a, "2025-05-05", "2025-05-09")],
        };

        let result = service
            .perform_holiday_calculation(&request, &config)
            .await
            .unwrap();

        // 5 RP14a days in the holiday year raise days taken from 3 to 5:
        // 14.8767 accrued - 5 = 9.8767
        let hpa = result.hpa.unwrap();
        assert_eq!(hpa.pro_rata_accrued_days, dec("9.8767"));

        // Caps are 30 - 9.8767 = 20.1233; all 5 days are payable
        let htnp = result.htnp.unwrap();
        assert_eq!(htnp.selected_input_source, InputSource::Rp14a);
        assert_eq!(htnp.days_payable(InputSource::Rp14a), dec("5"));
        assert_eq!(htnp.gross_entitlement(InputSource::Rp14a), dec("500"));
    }
}
