use crate::model::config::AdjustPolicy;
use crate::model::record::{CorrelationRecord, ResultTable};
use crate::pipeline::AnalysisError;

/// Bonferroni barrier: needs every record before `T` is known.
pub fn run_stage4(
    mut records: Vec<CorrelationRecord>,
    policy: AdjustPolicy,
) -> Result<ResultTable, AnalysisError> {
    let n_tests = records.len();
    if n_tests == 0 {
        return Err(AnalysisError::NoTests);
    }
    for record in &mut records {
        record.p_adj = bonferroni(record.p_val, n_tests, policy);
    }
    tracing::info!("Bonferroni correction over {n_tests} tests ({policy:?})");
    Ok(ResultTable { records, n_tests })
}

/// NaN p-values stay NaN.
pub fn bonferroni(p: f64, n_tests: usize, policy: AdjustPolicy) -> f64 {
    let adjusted = p * n_tests as f64;
    match policy {
        AdjustPolicy::Raw => adjusted,
        AdjustPolicy::Capped if adjusted > 1.0 => 1.0,
        AdjustPolicy::Capped => adjusted,
    }
}
