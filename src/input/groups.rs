use std::path::Path;

use crate::groups::GroupMap;
use crate::input::InputError;
use crate::input::reader::csv_reader;

pub const VAR_COLUMN: &str = "var";
pub const GROUP_COLUMN: &str = "var_group";

/// Reads a `var,var_group` table. Duplicated variables keep their first
/// group.
pub fn load_group_file(path: &Path) -> Result<GroupMap, InputError> {
    let mut reader = csv_reader(path)?;
    let headers = reader.headers()?.clone();
    let var_col = find_column(&headers, VAR_COLUMN, path)?;
    let group_col = find_column(&headers, GROUP_COLUMN, path)?;

    let mut map = GroupMap::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line_no = idx + 2;
        let var = record.get(var_col).unwrap_or("");
        let group = record.get(group_col).unwrap_or("");
        if var.is_empty() {
            tracing::warn!("group file line {line_no} has an empty variable name; skipping");
            continue;
        }
        if group.is_empty() {
            return Err(InputError::Parse(format!(
                "group file line {line_no}: variable {var} has an empty group"
            )));
        }
        if !map.insert(var.to_string(), group.to_string()) {
            tracing::warn!(
                "duplicate variable in group file; keeping first (line {line_no}, var {var})"
            );
        }
    }

    if map.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "group file {} lists no variables",
            path.display()
        )));
    }

    Ok(map)
}

fn find_column(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, InputError> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        InputError::Parse(format!(
            "{} is missing required column '{name}'",
            path.display()
        ))
    })
}
