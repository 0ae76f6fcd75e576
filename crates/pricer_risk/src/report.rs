//! Report export: results CSV, sweep CSV and JSON snapshots.

use pricer_engines::PricingResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::sweeps::SweepResult;

/// Errors raised while writing report files.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// CSV encoding failure.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    /// JSON encoding failure.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders the comparison results as CSV, one row per engine.
///
/// # Errors
///
/// [`ReportError`] on encoding failure.
pub fn results_csv(results: &[PricingResult]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "engine",
        "model",
        "price",
        "clean_price",
        "duration",
        "convexity",
        "std_error",
        "status",
        "warnings",
        "error",
    ])?;
    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    for r in results {
        writer.write_record([
            r.engine.clone(),
            r.model.clone(),
            cell(r.price),
            cell(r.clean_price),
            cell(r.duration),
            cell(r.convexity),
            cell(r.std_error),
            r.status.to_string(),
            r.warnings.join("; "),
            r.error.clone().unwrap_or_default(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes the comparison results as a CSV table.
///
/// # Errors
///
/// [`ReportError`] on filesystem or encoding failure.
pub fn write_results_csv(path: &Path, results: &[PricingResult]) -> Result<(), ReportError> {
    std::fs::write(path, results_csv(results)?)?;
    info!(path = %path.display(), rows = results.len(), "wrote results csv");
    Ok(())
}

/// Renders a sensitivity sweep as wide CSV: the parameter column followed
/// by one price column per engine.
///
/// # Errors
///
/// [`ReportError`] on encoding failure.
pub fn sweep_csv(sweep: &SweepResult) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![sweep.kind.to_string()];
    header.extend(sweep.engines.iter().cloned());
    writer.write_record(&header)?;
    for row in &sweep.rows {
        let mut record = vec![row.parameter.to_string()];
        record.extend(
            row.prices
                .iter()
                .map(|p| p.map(|p| p.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    let bytes = writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes a sensitivity sweep as a wide CSV.
///
/// # Errors
///
/// [`ReportError`] on filesystem or encoding failure.
pub fn write_sweep_csv(path: &Path, sweep: &SweepResult) -> Result<(), ReportError> {
    std::fs::write(path, sweep_csv(sweep)?)?;
    info!(path = %path.display(), rows = sweep.rows.len(), "wrote sweep csv");
    Ok(())
}

/// Writes any serializable snapshot (results, scenario, calibrated
/// parameters) as pretty-printed JSON.
///
/// # Errors
///
/// [`ReportError`] on filesystem or encoding failure.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %path.display(), "wrote json report");
    Ok(())
}
