//! Property-based tests for report invariants.
//!
//! Random series with random gaps are pushed through the engine; whatever the
//! input, reports must stay free of NaN, gaps must never be treated as zeros and
//! the status must follow the observed length.

use anofox_ews::core::{CanonicalTimeSeries, DiagnosticReport, SamplingRegime, Status};
use anofox_ews::diagnostics::{DiagnosticEngine, EwsConfig};
use proptest::prelude::*;

fn make_series(values: Vec<Option<f64>>) -> CanonicalTimeSeries {
    let times = (0..values.len()).map(|i| 1980.0 + i as f64).collect();
    CanonicalTimeSeries::new(times, values).unwrap()
}

/// Values in a realistic cover range with roughly one in six entries missing.
fn gappy_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.85, 0.0..100.0_f64), min_len..max_len)
}

fn report_numbers(report: &DiagnosticReport) -> Vec<f64> {
    let mut numbers: Vec<f64> = [
        report.signal_std(),
        report.noise_std(),
        report.lag1_autocorrelation(),
        report.max_step(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if let Some((start, end)) = report.span() {
        numbers.extend([start, end]);
    }
    if let Some(rolling) = report.rolling() {
        numbers.extend(rolling.variance.iter().flatten());
        numbers.extend(rolling.autocorrelation.iter().flatten());
    }
    if let Some(sparse) = report.sparse() {
        numbers.extend(sparse.max_inter_survey_change);
    }
    numbers
}

fn regular_engine() -> DiagnosticEngine {
    DiagnosticEngine::new(EwsConfig::default().regime_override(Some(SamplingRegime::Regular)))
        .unwrap()
}

proptest! {
    #[test]
    fn reports_never_contain_nan(values in gappy_values_strategy(1, 40)) {
        let report = DiagnosticEngine::default().assess(&make_series(values));
        for x in report_numbers(&report) {
            prop_assert!(x.is_finite(), "non-finite value {x} in report");
        }
    }

    #[test]
    fn autocorrelation_stays_in_unit_interval(values in gappy_values_strategy(10, 40)) {
        let report = regular_engine().assess(&make_series(values));
        if let Some(r) = report.lag1_autocorrelation() {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
        if let Some(rolling) = report.rolling() {
            for r in rolling.autocorrelation.iter().flatten() {
                prop_assert!((-1.0..=1.0).contains(r));
            }
        }
    }

    #[test]
    fn windows_touching_a_gap_are_skipped(values in gappy_values_strategy(10, 40)) {
        let series = make_series(values.clone());
        let report = regular_engine().assess(&series);
        let window = EwsConfig::default().rolling_window;

        if let Some(rolling) = report.rolling() {
            for end in 0..values.len() {
                let complete = end + 1 >= window
                    && values[end + 1 - window..=end].iter().all(Option::is_some);
                if !complete {
                    prop_assert!(rolling.variance[end].is_none());
                    prop_assert!(rolling.autocorrelation[end].is_none());
                } else {
                    prop_assert!(rolling.variance[end].is_some());
                }
            }
        }
    }

    #[test]
    fn status_follows_observed_length(values in gappy_values_strategy(1, 25)) {
        let observed = values.iter().flatten().count();
        let series = make_series(values);
        let expected = if observed < 10 { Status::InsufficientData } else { Status::Ok };

        // Regardless of sampling regime.
        for engine in [DiagnosticEngine::default(), regular_engine()] {
            let report = engine.assess(&series);
            prop_assert_eq!(report.length(), observed);
            prop_assert_eq!(report.status(), expected);
        }

        let report = regular_engine().assess(&series);
        if report.status() == Status::InsufficientData {
            prop_assert!(report.signal_std().is_none());
            prop_assert!(report.rolling().is_none());
        }
    }

    #[test]
    fn assessment_is_idempotent(values in gappy_values_strategy(1, 30)) {
        let series = make_series(values);
        let engine = DiagnosticEngine::default();
        prop_assert_eq!(engine.assess(&series), engine.assess(&series));
    }

    #[test]
    fn sparse_path_always_carries_note(values in gappy_values_strategy(1, 15)) {
        let engine = DiagnosticEngine::new(EwsConfig::survey()).unwrap();
        let report = engine.assess(&make_series(values));
        prop_assert!(report.sparse().is_some_and(|s| !s.note.is_empty()));
        prop_assert!(report.rolling().is_none());
    }
}
