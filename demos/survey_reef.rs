//! Sparse survey sites with a bleaching-stress covariate.
//!
//! Surveys repeated every few years cannot support rolling diagnostics, so the
//! engine reports jump sizes and pressure context instead.

use anofox_ews::core::{CanonicalTimeSeries, MonitoringUnit, PressureCovariate};
use anofox_ews::diagnostics::{DiagnosticEngine, EwsConfig};
use anofox_ews::Result;
use std::collections::BTreeMap;

fn site(years: &[f64], cover: &[f64], heat_stress: Option<&[f64]>) -> Result<MonitoringUnit> {
    let series = CanonicalTimeSeries::from_raw(years.to_vec(), cover.to_vec())?;
    let unit = MonitoringUnit::new(series);
    Ok(match heat_stress {
        Some(stress) => {
            unit.with_covariate(PressureCovariate::from_raw(years.to_vec(), stress.to_vec())?)
        }
        None => unit,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut units = BTreeMap::new();
    units.insert(
        "north_reef".to_string(),
        site(
            &[1995.0, 1998.0, 2001.0, 2008.0, 2012.0, 2016.0],
            &[40.0, 33.0, 38.0, 10.0, 15.0, 12.0],
            Some(&[2.1, 9.8, 3.0, 11.5, 4.2, 13.0]),
        )?,
    );
    units.insert(
        "outer_shoal".to_string(),
        site(
            &[1993.0, 2002.0, 2004.0, 2011.0, 2017.0],
            &[27.0, 29.0, f64::NAN, 24.0, 8.0],
            None,
        )?,
    );
    units.insert(
        "lagoon".to_string(),
        site(&[2005.0, 2013.0, 2019.0], &[18.0, 12.0, 14.0], None)?,
    );

    let engine = DiagnosticEngine::new(EwsConfig::survey())?;
    for (unit, report) in engine.run_batch(&units) {
        println!("== {unit} == {}", report.status());
        let Some(sparse) = report.sparse() else {
            println!("  not assessed on the survey path\n");
            continue;
        };

        if let Some((start, end)) = sparse.span {
            println!("  {} surveys, {start:.0}-{end:.0}", sparse.observations);
        }
        if let Some(change) = sparse.max_inter_survey_change {
            println!("  largest change between surveys: {change:.1}");
        }
        if let Some(p) = sparse.pressure {
            println!(
                "  pressure: n={} min={:.1} mean={:.1} max={:.1}",
                p.count, p.min, p.mean, p.max
            );
        }
        for code in report.warnings() {
            println!("  warning: {code}");
        }
        println!("  {}\n", sparse.note);
    }

    Ok(())
}
