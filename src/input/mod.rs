use std::path::Path;

use thiserror::Error;

pub mod groups;
pub mod reader;
pub mod table;

pub use groups::load_group_file;
pub use table::{RawTable, load_raw_table};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub fn require_file(path: &Path, what: &str) -> Result<(), InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(format!(
            "{what} not found: {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
