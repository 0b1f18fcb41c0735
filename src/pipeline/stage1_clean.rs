use serde::Serialize;

use crate::input::RawTable;
use crate::model::config::{CleaningPolicy, ResponseVar};
use crate::model::table::FeatureTable;
use crate::pipeline::AnalysisError;

const NA_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

#[derive(Debug, Clone)]
pub struct Stage1Params<'a> {
    pub response: ResponseVar,
    pub id_column: &'a str,
    pub cleaning: CleaningPolicy,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleaningAudit {
    pub rows_in: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub cells_unparsable: usize,
    pub cells_missing: usize,
    pub cells_non_finite: usize,
    pub id_columns: Vec<String>,
    pub non_numeric_columns: Vec<String>,
    pub excluded_response: Option<String>,
}

#[derive(Debug)]
pub struct Stage1Output {
    pub table: FeatureTable,
    pub audit: CleaningAudit,
}

pub fn run_stage1(
    raw: &RawTable,
    params: &Stage1Params<'_>,
) -> Result<Stage1Output, AnalysisError> {
    let mut audit = CleaningAudit {
        rows_in: raw.rows.len(),
        ..CleaningAudit::default()
    };

    let mut table = coerce_numeric(raw, params.id_column, &mut audit);

    let other = params.response.counterpart().column();
    if let Some(idx) = table.column_index(other) {
        table.drop_column(idx);
        tracing::info!(
            "excluded {} from the analysis table (response is {})",
            other,
            params.response.column()
        );
        audit.excluded_response = Some(other.to_string());
    }

    if table.column_index(params.response.column()).is_none() {
        return Err(AnalysisError::MissingResponse(
            params.response.column().to_string(),
        ));
    }
    if table.n_cols() < 2 {
        return Err(AnalysisError::TooFewColumns(table.n_cols()));
    }

    let invalid = invalid_rows(&table);
    audit.cells_missing = table
        .columns
        .iter()
        .flatten()
        .filter(|v| v.is_nan())
        .count();
    audit.cells_non_finite = table
        .columns
        .iter()
        .flatten()
        .filter(|v| v.is_infinite())
        .count();
    let n_invalid = invalid.iter().filter(|&&bad| bad).count();

    match params.cleaning {
        CleaningPolicy::DropRows => {
            drop_invalid_rows(&mut table);
            audit.rows_dropped = n_invalid;
            if n_invalid > 0 {
                tracing::info!(
                    "dropped {} of {} rows holding missing or non-finite values",
                    n_invalid,
                    audit.rows_in
                );
            }
        }
        CleaningPolicy::Reject => {
            if n_invalid > 0 {
                let column = first_invalid_column(&table).unwrap_or_default();
                return Err(AnalysisError::InvalidValues {
                    rows: n_invalid,
                    column,
                });
            }
        }
    }

    if table.n_rows() == 0 {
        return Err(AnalysisError::NoRowsLeft);
    }
    audit.rows_kept = table.n_rows();

    Ok(Stage1Output { table, audit })
}

/// Parses every non-identifier column as `f64`. Unparsable cells become NaN.
/// Columns where nothing parses are dropped as non-numeric.
pub fn coerce_numeric(
    raw: &RawTable,
    id_column: &str,
    audit: &mut CleaningAudit,
) -> FeatureTable {
    let id_idx = raw.headers.iter().position(|h| h == id_column);
    let row_ids = match id_idx {
        Some(idx) => raw.rows.iter().map(|row| row[idx].clone()).collect(),
        None => (1..=raw.rows.len()).map(|i| i.to_string()).collect(),
    };

    let mut names = Vec::new();
    let mut columns = Vec::new();
    for (col, header) in raw.headers.iter().enumerate() {
        // Unnamed leading columns are row indices written alongside the data.
        if Some(col) == id_idx || header.is_empty() {
            audit.id_columns.push(header.clone());
            continue;
        }

        let mut values = Vec::with_capacity(raw.rows.len());
        let mut parsed = 0usize;
        let mut unparsable = 0usize;
        for row in &raw.rows {
            let cell = row[col].trim();
            match cell.parse::<f64>() {
                Ok(v) => {
                    if !v.is_nan() {
                        parsed += 1;
                    }
                    values.push(v);
                }
                Err(_) => {
                    if !NA_TOKENS.contains(&cell) {
                        unparsable += 1;
                    }
                    values.push(f64::NAN);
                }
            }
        }

        if parsed == 0 {
            tracing::warn!("column {header} has no numeric values; excluded");
            audit.non_numeric_columns.push(header.clone());
            continue;
        }
        if unparsable > 0 {
            tracing::warn!("column {header}: {unparsable} non-numeric cells treated as missing");
            audit.cells_unparsable += unparsable;
        }
        names.push(header.clone());
        columns.push(values);
    }

    FeatureTable {
        row_ids,
        names,
        columns,
    }
}

/// Rows holding NaN or ±inf in any column.
pub fn invalid_rows(table: &FeatureTable) -> Vec<bool> {
    let mut invalid = vec![false; table.n_rows()];
    for column in &table.columns {
        for (row, v) in column.iter().enumerate() {
            if !v.is_finite() {
                invalid[row] = true;
            }
        }
    }
    invalid
}

/// Removes every row holding a missing or non-finite value. Idempotent.
pub fn drop_invalid_rows(table: &mut FeatureTable) -> usize {
    let keep: Vec<bool> = invalid_rows(table).into_iter().map(|bad| !bad).collect();
    let dropped = keep.iter().filter(|&&k| !k).count();
    if dropped > 0 {
        table.retain_rows(&keep);
    }
    dropped
}

fn first_invalid_column(table: &FeatureTable) -> Option<String> {
    table
        .columns
        .iter()
        .position(|c| c.iter().any(|v| !v.is_finite()))
        .map(|idx| table.names[idx].clone())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_clean.rs"]
mod tests;
