use std::path::Path;

use crate::input::InputError;
use crate::input::reader::csv_reader;

/// Header and cells exactly as read, before numeric coercion.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn load_raw_table(path: &Path) -> Result<RawTable, InputError> {
    let mut reader = csv_reader(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(InputError::Parse(format!(
            "{} has an empty header",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != headers.len() {
            return Err(InputError::Parse(format!(
                "{}: row {} has {} fields, header has {}",
                path.display(),
                idx + 2,
                record.len(),
                headers.len()
            )));
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "{} has no data rows",
            path.display()
        )));
    }

    tracing::info!(
        "loaded {}: {} rows x {} columns",
        path.display(),
        rows.len(),
        headers.len()
    );

    Ok(RawTable { headers, rows })
}
