//! Assess a small multi-site monitoring panel and print one block per site.
//!
//! Run with `RUST_LOG=debug cargo run --example reef_batch` to see per-unit events.

use anofox_ews::core::{build_panel, Aggregation, DiagnosticReport, PanelRecord, PanelSummary};
use anofox_ews::diagnostics::{DiagnosticEngine, EwsConfig};
use anofox_ews::Result;

fn synthetic_records() -> Vec<PanelRecord> {
    let mut records = Vec::new();

    // Long annual record drifting towards a collapse, three transects per year.
    for (i, year) in (1986..2016).enumerate() {
        let t = i as f64;
        let level = 45.0 - 0.02 * t * t;
        for offset in [-1.5, 0.0, 1.5] {
            let wiggle = (t * 0.9 + offset).sin() * (1.0 + 0.15 * t);
            records.push(PanelRecord::new("one_tree", f64::from(year), Some(level + wiggle)));
        }
    }

    // Noisy site: year-to-year swings dominate any slow change.
    for (i, year) in (1995..2015).enumerate() {
        let swing = if i % 2 == 0 { 8.0 } else { -8.0 };
        records.push(PanelRecord::new("davies", f64::from(year), Some(30.0 + swing)));
    }

    // Short record with a missed survey.
    for (year, cover) in [(2010, Some(22.0)), (2011, None), (2012, Some(25.0)), (2013, Some(21.0))] {
        records.push(PanelRecord::new("myrmidon", f64::from(year), cover));
    }

    records
}

fn render(unit: &str, report: &DiagnosticReport) {
    println!("== {unit} ==");
    println!("  status: {} ({})", report.status(), report.regime().as_str());
    if let Some((start, end)) = report.span() {
        println!("  span: {start:.0}-{end:.0}, {} observations", report.length());
    }
    if !report.is_ok() {
        println!();
        return;
    }

    let fmt = |x: Option<f64>| x.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"));
    println!("  signal std: {}", fmt(report.signal_std()));
    println!("  noise std:  {}", fmt(report.noise_std()));
    println!("  lag-1 AC:   {}", fmt(report.lag1_autocorrelation()));
    println!("  max step:   {}", fmt(report.max_step()));
    println!(
        "  rolling variance {}, rolling AC {}",
        report.rolling_variance_trend(),
        report.rolling_autocorrelation_trend()
    );
    if let Some(rolling) = report.rolling() {
        for (t, v) in rolling.recent_variance(3) {
            println!("    var[{t:.0}] = {v:.2}");
        }
    }
    for code in report.warnings() {
        println!("  warning: {code}");
    }
    println!("  {}", report.interpretation());
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let panel = build_panel(synthetic_records(), Aggregation::Mean)?;
    let summary = PanelSummary::from_panel(&panel);
    println!(
        "{} units, record lengths {:?}-{:?}, best sampled: {}",
        summary.unit_count(),
        summary.min_length(),
        summary.max_length(),
        summary.best_sampled().unwrap_or("-")
    );
    println!();

    let engine = DiagnosticEngine::new(EwsConfig::default())?;
    for (unit, report) in engine.run_batch(&panel) {
        render(&unit, &report);
    }

    Ok(())
}
