//! Per-unit orchestration and batch execution.

use super::config::EwsConfig;
use super::csd::CSDSignalAnalyzer;
use super::detectability::DetectabilityAssessor;
use super::sparse::SparseSeriesAssessor;
use super::validator::SeriesValidator;
use crate::core::{
    CanonicalTimeSeries, DiagnosticReport, MonitoringUnit, PressureCovariate, SamplingRegime,
    Status, WarningCode,
};
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Runs the validator and the appropriate analysis path for each unit.
///
/// The engine holds only configuration; assessing the same input twice yields
/// equal reports.
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    config: EwsConfig,
    validator: SeriesValidator,
    csd: CSDSignalAnalyzer,
    detectability: DetectabilityAssessor,
    sparse: SparseSeriesAssessor,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::from_valid_config(EwsConfig::default())
    }
}

impl DiagnosticEngine {
    /// Create an engine, rejecting out-of-range configuration.
    pub fn new(config: EwsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EwsConfig) -> Self {
        Self {
            validator: SeriesValidator::new(&config),
            csd: CSDSignalAnalyzer::new(config.rolling_window),
            detectability: DetectabilityAssessor::new(&config),
            sparse: SparseSeriesAssessor::new(),
            config,
        }
    }

    pub fn config(&self) -> &EwsConfig {
        &self.config
    }

    /// Assess a single series without a pressure covariate.
    pub fn assess(&self, series: &CanonicalTimeSeries) -> DiagnosticReport {
        self.assess_parts(series, None)
    }

    /// Assess one monitoring unit.
    pub fn assess_unit(&self, unit: &MonitoringUnit) -> DiagnosticReport {
        self.assess_parts(&unit.series, unit.covariate.as_ref())
    }

    fn assess_parts(
        &self,
        series: &CanonicalTimeSeries,
        covariate: Option<&PressureCovariate>,
    ) -> DiagnosticReport {
        let summary = self.validator.validate(series);
        debug!(
            unit = series.label().unwrap_or("<unlabelled>"),
            regime = summary.regime.as_str(),
            length = summary.length,
            status = summary.status.as_str(),
            "validated series"
        );

        let mut report =
            DiagnosticReport::skeleton(summary.span, summary.length, summary.status, summary.regime);

        match summary.regime {
            SamplingRegime::Regular => {
                if summary.status == Status::InsufficientData {
                    return report;
                }
                if covariate.is_some() {
                    debug!("pressure covariate ignored on the regular path");
                }

                let csd = self.csd.analyze(series);
                let detectability = self.detectability.assess_with(series, &csd);

                report.signal_std = detectability.signal_std;
                report.noise_std = detectability.noise_std;
                report.lag1_autocorrelation = detectability.lag1_autocorrelation;
                report.warnings = detectability.warnings;
                report.max_step = csd.max_step;
                report.rolling_variance_trend = csd.rolling_variance_trend;
                report.rolling_autocorrelation_trend = csd.rolling_autocorrelation_trend;
                report.rolling = Some(csd.rolling);
            }
            SamplingRegime::Sparse => {
                let sparse = self.sparse.assess_sparse(series, covariate);
                report.warnings.extend(sparse.warnings.iter().copied());
                if summary.length < self.config.sparse_min_length {
                    report.warnings.insert(WarningCode::FewSurveys);
                }
                report.sparse = Some(sparse);
            }
        }

        report
    }

    /// Assess every unit; one report per unit id, in key order.
    pub fn run_batch(
        &self,
        units: &BTreeMap<String, MonitoringUnit>,
    ) -> BTreeMap<String, DiagnosticReport> {
        #[cfg(feature = "rayon")]
        let reports: BTreeMap<String, DiagnosticReport> = units
            .par_iter()
            .map(|(id, unit)| (id.clone(), self.assess_unit(unit)))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let reports: BTreeMap<String, DiagnosticReport> = units
            .iter()
            .map(|(id, unit)| (id.clone(), self.assess_unit(unit)))
            .collect();

        let insufficient = reports.values().filter(|r| !r.is_ok()).count();
        let sparse = reports
            .values()
            .filter(|r| r.regime() == SamplingRegime::Sparse)
            .count();
        info!(
            units = reports.len(),
            insufficient, sparse, "diagnostic batch complete"
        );

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Trend, SPARSE_NOTE};
    use crate::error::EwsError;

    fn annual(start: f64, values: &[f64]) -> CanonicalTimeSeries {
        let times = (0..values.len()).map(|i| start + i as f64).collect();
        CanonicalTimeSeries::from_raw(times, values.to_vec()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = DiagnosticEngine::new(EwsConfig::default().rolling_window(0));
        assert!(matches!(result, Err(EwsError::InvalidParameter(_))));
    }

    #[test]
    fn insufficient_regular_series_has_no_statistics() {
        let report = DiagnosticEngine::default().assess(&annual(2001.0, &[1.0, 4.0, 2.0, 8.0]));

        assert_eq!(report.status(), Status::InsufficientData);
        assert_eq!(report.regime(), SamplingRegime::Regular);
        assert!(report.signal_std().is_none());
        assert!(report.noise_std().is_none());
        assert!(report.lag1_autocorrelation().is_none());
        assert!(report.rolling().is_none());
        assert_eq!(report.rolling_variance_trend(), Trend::Undefined);
        assert!(report.warnings().is_empty());
        assert!(!report.interpretation().is_empty());
    }

    #[test]
    fn regular_series_gets_full_report() {
        let series = annual(
            2001.0,
            &[10.0, 10.0, 10.0, 10.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0],
        );
        let report = DiagnosticEngine::default().assess(&series);

        assert!(report.is_ok());
        assert_eq!(report.length(), 10);
        assert_eq!(report.span(), Some((2001.0, 2010.0)));
        assert_eq!(report.rolling_variance_trend(), Trend::Increasing);
        assert_eq!(report.max_step(), Some(5.0));
        assert!(report.rolling().is_some());
        assert!(report.sparse().is_none());
    }

    #[test]
    fn sparse_series_takes_the_survey_path() {
        let series = CanonicalTimeSeries::from_raw(
            vec![1993.0, 1995.0, 2001.0, 2004.0, 2008.0, 2016.0],
            vec![45.0, 40.0, 38.0, 30.0, 10.0, 12.0],
        )
        .unwrap();
        let covariate =
            PressureCovariate::from_raw(series.times().to_vec(), vec![0.0, 0.1, 0.3, 0.9, 1.5, 0.2])
                .unwrap();
        let unit = MonitoringUnit::new(series).with_covariate(covariate);

        let report = DiagnosticEngine::default().assess_unit(&unit);
        let sparse = report.sparse().unwrap();

        // Six surveys: below the regular minimum, above the survey advisory.
        assert_eq!(report.status(), Status::InsufficientData);
        assert!(!report.has_warning(WarningCode::FewSurveys));
        assert_eq!(report.regime(), SamplingRegime::Sparse);
        assert_eq!(sparse.max_inter_survey_change, Some(20.0));
        assert_eq!(sparse.note, SPARSE_NOTE);
        assert_eq!(sparse.pressure.unwrap().count, 6);
        assert!(report.rolling().is_none());
        assert_eq!(report.rolling_variance_trend(), Trend::Undefined);
    }

    #[test]
    fn short_survey_record_is_still_assessed() {
        let series = CanonicalTimeSeries::from_raw(
            vec![1995.0, 2001.0, 2008.0, 2016.0],
            vec![40.0, 38.0, 10.0, 12.0],
        )
        .unwrap();

        let report = DiagnosticEngine::default().assess(&series);
        let sparse = report.sparse().unwrap();

        assert_eq!(report.regime(), SamplingRegime::Sparse);
        assert_eq!(report.status(), Status::InsufficientData);
        assert_eq!(sparse.max_inter_survey_change, Some(28.0));
        assert_eq!(sparse.note, SPARSE_NOTE);
        assert!(report.has_warning(WarningCode::FewSurveys));

        let lenient = DiagnosticEngine::new(EwsConfig::default().sparse_min_length(4)).unwrap();
        assert!(!lenient.assess(&series).has_warning(WarningCode::FewSurveys));
    }

    #[test]
    fn long_survey_record_keeps_ok_status() {
        let times = vec![
            1990.0, 1991.0, 1994.0, 1995.0, 2000.0, 2002.0, 2003.0, 2007.0, 2011.0, 2012.0,
        ];
        let series = CanonicalTimeSeries::from_raw(times, vec![30.0; 10]).unwrap();

        let report = DiagnosticEngine::new(EwsConfig::survey()).unwrap().assess(&series);
        assert!(report.is_ok());
        assert!(report.sparse().is_some());
        assert!(report.rolling().is_none());
    }

    #[test]
    fn mid_year_annual_dates_take_the_regular_path() {
        let dates: Vec<chrono::NaiveDate> = (2019..=2030)
            .map(|y| chrono::NaiveDate::from_ymd_opt(y, 7, 1).unwrap())
            .collect();
        let values = (0..12).map(|i| Some(40.0 - 0.3 * i as f64 + (i % 3) as f64)).collect();
        let series = CanonicalTimeSeries::from_dates(&dates, values).unwrap();

        let report = DiagnosticEngine::default().assess(&series);
        assert_eq!(report.regime(), SamplingRegime::Regular);
        assert!(report.is_ok());
        assert!(report.rolling().is_some());
        assert!(report.lag1_autocorrelation().is_some());
        assert!(report.sparse().is_none());
    }

    #[test]
    fn misaligned_covariate_surfaces_on_report() {
        let series = annual(2000.0, &[5.0, 6.0, 5.5, 7.0, 6.5, 8.0]);
        let covariate = PressureCovariate::from_raw(vec![1990.0, 1991.0], vec![1.0, 2.0]).unwrap();
        let unit = MonitoringUnit::new(series).with_covariate(covariate);

        let engine = DiagnosticEngine::new(EwsConfig::survey()).unwrap();
        let report = engine.assess_unit(&unit);
        assert!(report.has_warning(WarningCode::CovariateMisaligned));
    }

    #[test]
    fn batch_returns_one_report_per_unit() {
        let mut units = BTreeMap::new();
        units.insert("short".to_string(), MonitoringUnit::new(annual(2000.0, &[1.0, 2.0])));
        units.insert(
            "long".to_string(),
            MonitoringUnit::new(annual(2000.0, &(1..=20).map(f64::from).collect::<Vec<_>>())),
        );

        let reports = DiagnosticEngine::default().run_batch(&units);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports["short"].status(), Status::InsufficientData);
        assert!(reports["long"].is_ok());
    }
}
