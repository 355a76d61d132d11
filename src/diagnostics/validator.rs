//! Entry gate: effective length, span and sampling regime.

use super::config::EwsConfig;
use crate::core::{CanonicalTimeSeries, SamplingRegime, Status};
use crate::utils::stats;

/// Summary produced by [`SeriesValidator::validate`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationSummary {
    pub status: Status,
    pub span: Option<(f64, f64)>,
    /// Count of non-missing observations.
    pub length: usize,
    pub regime: SamplingRegime,
}

/// Checks that a series is long enough and classifies how it was sampled.
#[derive(Debug, Clone)]
pub struct SeriesValidator {
    min_series_length: usize,
    regularity_tolerance: f64,
    gap_tolerance: f64,
    regime_override: Option<SamplingRegime>,
}

impl Default for SeriesValidator {
    fn default() -> Self {
        Self::new(&EwsConfig::default())
    }
}

impl SeriesValidator {
    pub fn new(config: &EwsConfig) -> Self {
        Self {
            min_series_length: config.min_series_length,
            regularity_tolerance: config.regularity_tolerance,
            gap_tolerance: config.gap_tolerance,
            regime_override: config.regime_override,
        }
    }

    pub fn validate(&self, series: &CanonicalTimeSeries) -> ValidationSummary {
        let length = series.observed_len();
        let status = if length < self.min_series_length {
            Status::InsufficientData
        } else {
            Status::Ok
        };
        let regime = self
            .regime_override
            .unwrap_or_else(|| {
                classify_regime(series, self.regularity_tolerance, self.gap_tolerance)
            });

        ValidationSummary {
            status,
            span: series.span(),
            length,
            regime,
        }
    }
}

/// Classify a series as regular or sparse from its observed time gaps.
///
/// Gaps within `gap_tolerance` times the median gap of each other count as the
/// same spacing, so decimal-year times from dated surveys (leap years shift
/// them by a few thousandths) still compare equal. Regular when the largest
/// such cluster holds at least `tolerance` of all gaps. Fewer than two
/// observations is sparse.
pub fn classify_regime(
    series: &CanonicalTimeSeries,
    tolerance: f64,
    gap_tolerance: f64,
) -> SamplingRegime {
    let mut gaps = series.observed_gaps();
    let Some(median_gap) = stats::median(&gaps) else {
        return SamplingRegime::Sparse;
    };
    gaps.sort_by(f64::total_cmp);
    let width = gap_tolerance * median_gap;

    // Largest run of sorted gaps spanning at most `width`.
    let mut modal_count = 0;
    let mut start = 0;
    for end in 0..gaps.len() {
        while gaps[end] - gaps[start] > width {
            start += 1;
        }
        modal_count = modal_count.max(end - start + 1);
    }

    if modal_count as f64 / gaps.len() as f64 >= tolerance {
        SamplingRegime::Regular
    } else {
        SamplingRegime::Sparse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn annual(values: Vec<Option<f64>>) -> CanonicalTimeSeries {
        let times = (0..values.len()).map(|i| 2001.0 + i as f64).collect();
        CanonicalTimeSeries::new(times, values).unwrap()
    }

    #[test]
    fn short_series_is_insufficient() {
        let series = annual(vec![Some(1.0); 9]);
        let summary = SeriesValidator::default().validate(&series);

        assert_eq!(summary.status, Status::InsufficientData);
        assert_eq!(summary.length, 9);
        assert_eq!(summary.span, Some((2001.0, 2009.0)));
    }

    #[test]
    fn missing_entries_do_not_count_toward_length() {
        let mut values = vec![Some(1.0); 12];
        values[3] = None;
        values[7] = None;
        values[11] = None;
        let summary = SeriesValidator::default().validate(&annual(values));

        assert_eq!(summary.length, 9);
        assert_eq!(summary.status, Status::InsufficientData);
        assert_eq!(summary.span, Some((2001.0, 2011.0)));
    }

    #[test]
    fn ten_observations_pass() {
        let summary = SeriesValidator::default().validate(&annual(vec![Some(2.0); 10]));
        assert_eq!(summary.status, Status::Ok);
        assert_eq!(summary.regime, SamplingRegime::Regular);
    }

    #[test]
    fn irregular_surveys_are_sparse() {
        let series = CanonicalTimeSeries::from_raw(
            vec![1995.0, 2001.0, 2008.0, 2016.0],
            vec![40.0, 38.0, 10.0, 12.0],
        )
        .unwrap();
        assert_eq!(classify_regime(&series, 0.5, 0.05), SamplingRegime::Sparse);
    }

    #[test]
    fn occasional_gap_keeps_series_regular() {
        let mut values = vec![Some(1.0); 10];
        values[4] = None;
        assert_eq!(classify_regime(&annual(values), 0.5, 0.05), SamplingRegime::Regular);
    }

    #[test]
    fn fractional_year_gaps_compare_within_tolerance() {
        let times: Vec<f64> = (0..8).map(|i| 2005.1 + 0.1 * i as f64).collect();
        let series = CanonicalTimeSeries::new(times, vec![Some(1.0); 8]).unwrap();
        assert_eq!(classify_regime(&series, 0.9, 0.05), SamplingRegime::Regular);
    }

    #[test]
    fn empty_or_single_observation_is_sparse() {
        let empty = annual(vec![None, None]);
        let summary = SeriesValidator::default().validate(&empty);
        assert_eq!(summary.regime, SamplingRegime::Sparse);
        assert_eq!(summary.span, None);
        assert_eq!(summary.length, 0);

        assert_eq!(
            classify_regime(&annual(vec![Some(3.0)]), 0.5, 0.05),
            SamplingRegime::Sparse
        );
    }

    #[test]
    fn mid_year_dates_across_leap_years_are_regular() {
        let dates: Vec<NaiveDate> = (2019..=2030)
            .map(|y| NaiveDate::from_ymd_opt(y, 7, 1).unwrap())
            .collect();
        let series = CanonicalTimeSeries::from_dates(&dates, vec![Some(30.0); 12]).unwrap();

        // Leap years nudge some gaps about 0.0014 years off 1.0.
        assert!(series.observed_gaps().iter().any(|g| (g - 1.0).abs() > 1e-9));
        assert_eq!(classify_regime(&series, 0.5, 0.05), SamplingRegime::Regular);
        assert_eq!(classify_regime(&series, 0.5, 0.0), SamplingRegime::Sparse);
        assert_eq!(
            SeriesValidator::default().validate(&series).regime,
            SamplingRegime::Regular
        );
    }

    #[test]
    fn loosely_similar_survey_gaps_stay_sparse() {
        let series = CanonicalTimeSeries::from_raw(
            vec![1993.0, 2002.0, 2004.0, 2011.0, 2017.0],
            vec![27.0, 29.0, 25.0, 24.0, 8.0],
        )
        .unwrap();
        assert_eq!(classify_regime(&series, 0.5, 0.05), SamplingRegime::Sparse);
    }

    #[test]
    fn override_wins_over_inference() {
        let config = EwsConfig::survey();
        let summary = SeriesValidator::new(&config).validate(&annual(vec![Some(1.0); 12]));
        assert_eq!(summary.regime, SamplingRegime::Sparse);
    }
}
