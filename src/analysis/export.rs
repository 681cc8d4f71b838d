//! JSON export for run reports.

use super::RunReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct ReportDocument<'a> {
    passed: bool,
    report: &'a RunReport,
}

/// Export the run report to a JSON file.
///
/// The output is pretty-printed, with the overall verdict next to the report.
pub fn export_to_json(report: &RunReport, output_path: &Path) -> Result<()> {
    let document = ReportDocument {
        passed: report.passed(),
        report,
    };
    let json = serde_json::to_string_pretty(&document)
        .context("Failed to serialize run report to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}
