use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::model::record::ResultTable;
use crate::report::RunSummary;
use crate::report::text::render_report_text;

pub const RESULTS_FILE: &str = "partial_correlations.csv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub results: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

pub fn write_reports(
    result: &ResultTable,
    summary: &RunSummary,
    out_dir: &Path,
) -> Result<ReportPaths, InputError> {
    fs::create_dir_all(out_dir)?;
    let paths = ReportPaths {
        results: out_dir.join(RESULTS_FILE),
        summary: out_dir.join(SUMMARY_FILE),
        report: out_dir.join(REPORT_FILE),
    };

    write_results_csv(result, &paths.results)?;

    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| InputError::InvalidInput(format!("summary serialization failed: {e}")))?;
    write_text(&paths.summary, &json)?;
    write_text(&paths.report, &render_report_text(summary))?;

    tracing::info!(
        "wrote {} records to {}",
        result.records.len(),
        paths.results.display()
    );
    Ok(paths)
}

pub fn write_results_csv(result: &ResultTable, path: &Path) -> Result<(), InputError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in &result.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
