use rayon::prelude::*;

use crate::model::config::FailurePolicy;
use crate::model::record::{CorrelationRecord, RecordStatus};
use crate::model::table::FeatureTable;
use crate::pipeline::AnalysisError;
use crate::pipeline::stage2_covariates::PredictorPlan;
use crate::stats::{PrimitiveError, RankCovariance, partial_correlation, rank_covariance};

#[derive(Debug)]
pub struct Stage3Output {
    pub records: Vec<CorrelationRecord>,
    pub failures: usize,
}

/// Runs every plan against the response. Ranks are computed once over the
/// shared sample; each predictor is then an independent task. Records keep
/// the plan order.
pub fn run_stage3(
    table: &FeatureTable,
    response_col: usize,
    plans: &[PredictorPlan],
    failure: FailurePolicy,
) -> Result<Stage3Output, AnalysisError> {
    let cov = rank_covariance(&table.columns);

    let outcomes: Vec<Result<CorrelationRecord, PrimitiveError>> = plans
        .par_iter()
        .map(|plan| correlate(&cov, response_col, plan))
        .collect();

    let mut records = Vec::with_capacity(plans.len());
    let mut failures = 0usize;
    for (plan, outcome) in plans.iter().zip(outcomes) {
        match outcome {
            Ok(record) => records.push(record),
            Err(err) => {
                if failure == FailurePolicy::Fatal {
                    return Err(AnalysisError::Predictor {
                        var: plan.var.clone(),
                        reason: describe_failure(&err, table),
                        source: err,
                    });
                }
                tracing::warn!(
                    "{}: {}; recorded as missing",
                    plan.var,
                    describe_failure(&err, table)
                );
                failures += 1;
                records.push(failed_record(plan, cov.n_obs, &err));
            }
        }
    }

    Ok(Stage3Output { records, failures })
}

fn correlate(
    cov: &RankCovariance,
    response_col: usize,
    plan: &PredictorPlan,
) -> Result<CorrelationRecord, PrimitiveError> {
    let pc = partial_correlation(cov, plan.column, response_col, &plan.covariates)?;
    Ok(CorrelationRecord {
        var: plan.var.clone(),
        group: plan.group.label().map(str::to_string),
        n: pc.n,
        dof: pc.dof,
        n_covariates: pc.k,
        r: pc.r,
        ci95_low: pc.ci95.0,
        ci95_high: pc.ci95.1,
        p_val: pc.p_value,
        p_adj: f64::NAN,
        status: RecordStatus::Ok,
    })
}

fn failed_record(plan: &PredictorPlan, n: usize, err: &PrimitiveError) -> CorrelationRecord {
    let k = plan.covariates.len();
    CorrelationRecord {
        var: plan.var.clone(),
        group: plan.group.label().map(str::to_string),
        n,
        dof: n as i64 - k as i64 - 2,
        n_covariates: k,
        r: f64::NAN,
        ci95_low: f64::NAN,
        ci95_high: f64::NAN,
        p_val: f64::NAN,
        p_adj: f64::NAN,
        status: match err {
            PrimitiveError::TooFewObservations { .. } => RecordStatus::TooFewObservations,
            PrimitiveError::ZeroVariance { .. } => RecordStatus::ZeroVariance,
            PrimitiveError::Singular => RecordStatus::Singular,
        },
    }
}

fn describe_failure(err: &PrimitiveError, table: &FeatureTable) -> String {
    match err {
        PrimitiveError::ZeroVariance { column } => {
            format!("zero variance in {}", table.names[*column])
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_correlate.rs"]
mod tests;
