use thiserror::Error;

use crate::groups::Classifier;
use crate::input::RawTable;
use crate::model::config::AnalysisConfig;
use crate::model::record::ResultTable;
use crate::stats::PrimitiveError;

pub mod stage1_clean;
pub mod stage2_covariates;
pub mod stage3_correlate;
pub mod stage4_adjust;
pub mod stage5_report;

use stage1_clean::{CleaningAudit, Stage1Params, run_stage1};
use stage2_covariates::run_stage2;
use stage3_correlate::run_stage3;
use stage4_adjust::run_stage4;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("response column '{0}' is not in the table")]
    MissingResponse(String),
    #[error("need at least 2 numeric columns, found {0}")]
    TooFewColumns(usize),
    #[error("no variable of the table has a group in the {0}")]
    NoMappedVariables(String),
    #[error("{rows} rows hold missing or non-finite values (first in column '{column}')")]
    InvalidValues { rows: usize, column: String },
    #[error("no rows left after removing missing and non-finite values")]
    NoRowsLeft,
    #[error("partial correlation failed for {var}: {reason}")]
    Predictor {
        var: String,
        reason: String,
        #[source]
        source: PrimitiveError,
    },
    #[error("no predictors were tested; Bonferroni correction is undefined")]
    NoTests,
    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug)]
pub struct AnalysisOutput {
    pub result: ResultTable,
    pub audit: CleaningAudit,
    pub unmapped: Vec<String>,
}

/// Cleans `raw`, plans one test per predictor, runs them and applies the
/// Bonferroni correction.
pub fn run_analysis(
    raw: &RawTable,
    config: &AnalysisConfig,
    classifier: &dyn Classifier,
) -> Result<AnalysisOutput, AnalysisError> {
    let stage1 = run_stage1(
        raw,
        &Stage1Params {
            response: config.response,
            id_column: &config.id_column,
            cleaning: config.cleaning,
        },
    )?;
    let table = stage1.table;
    let response_col = table
        .column_index(config.response.column())
        .ok_or_else(|| AnalysisError::MissingResponse(config.response.column().to_string()))?;

    let stage2 = run_stage2(&table, response_col, classifier, config.domain)?;

    let stage3 = run_in_pool(config.threads, || {
        run_stage3(&table, response_col, &stage2.plans, config.failure)
    })??;
    if stage3.failures > 0 {
        tracing::warn!(
            "{} of {} predictors could not be computed",
            stage3.failures,
            stage3.records.len()
        );
    }

    let result = run_stage4(stage3.records, config.adjust)?;

    Ok(AnalysisOutput {
        result,
        audit: stage1.audit,
        unmapped: stage2.unmapped,
    })
}

fn run_in_pool<T, F>(threads: Option<usize>, f: F) -> Result<T, AnalysisError>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(f))
        }
        None => Ok(f()),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/analysis.rs"]
mod tests;
