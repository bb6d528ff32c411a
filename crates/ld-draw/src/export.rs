//! Export of session results
//!
//! One row per result, in draw order.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use ld_stage::DrawResult;

/// Default export file name
pub const DEFAULT_WINNERS_FILE: &str = "winners.csv";

/// CSV header written before the results
pub const CSV_HEADER: [&str; 4] = ["Winner", "ID", "Name", "Account"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write results as CSV to any writer
pub fn write_results_csv<W: Write>(writer: W, results: &[DrawResult]) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;

    for result in results {
        let p = &result.participant;
        out.write_record([
            result.sequence.to_string().as_str(),
            p.id.as_deref().unwrap_or(""),
            p.name.as_str(),
            p.account.as_deref().unwrap_or(""),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// Write results as CSV to `path`, replacing any existing file
pub fn export_results_csv(path: impl AsRef<Path>, results: &[DrawResult]) -> Result<(), ExportError> {
    let path = path.as_ref();
    write_results_csv(File::create(path)?, results)?;
    log::info!("Exported {} result(s) to {}", results.len(), path.display());
    Ok(())
}

/// Results as a pretty-printed JSON array
pub fn results_to_json(results: &[DrawResult]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(results)?)
}
