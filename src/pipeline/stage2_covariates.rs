use crate::groups::{Classifier, VarGroup};
use crate::model::config::IterationDomain;
use crate::model::table::FeatureTable;
use crate::pipeline::AnalysisError;

/// One predictor to test and the columns adjusted for.
#[derive(Debug, Clone)]
pub struct PredictorPlan {
    pub var: String,
    pub column: usize,
    pub group: VarGroup,
    pub covariates: Vec<usize>,
}

#[derive(Debug)]
pub struct Stage2Output {
    pub plans: Vec<PredictorPlan>,
    pub unmapped: Vec<String>,
}

pub fn run_stage2(
    table: &FeatureTable,
    response_col: usize,
    classifier: &dyn Classifier,
    domain: IterationDomain,
) -> Result<Stage2Output, AnalysisError> {
    let groups: Vec<VarGroup> = table.names.iter().map(|n| classifier.classify(n)).collect();

    let unmapped: Vec<String> = table
        .names
        .iter()
        .zip(&groups)
        .enumerate()
        .filter(|(idx, (_, g))| *idx != response_col && !g.is_known())
        .map(|(_, (name, _))| name.clone())
        .collect();
    let n_candidates = table.n_cols() - 1;
    if unmapped.len() == n_candidates {
        return Err(AnalysisError::NoMappedVariables(classifier.describe()));
    }
    if !unmapped.is_empty() {
        tracing::warn!(
            "{} variables have no group and are adjusted for in every test: {}",
            unmapped.len(),
            unmapped.join(", ")
        );
    }

    let candidates = iteration_domain(table, response_col, classifier, domain);
    let plans = candidates
        .into_iter()
        .map(|column| PredictorPlan {
            var: table.names[column].clone(),
            column,
            group: groups[column].clone(),
            covariates: covariate_set(column, response_col, &groups),
        })
        .collect::<Vec<_>>();

    tracing::info!(
        "{} predictors planned against {} ({:?} domain, {})",
        plans.len(),
        table.names[response_col],
        domain,
        classifier.describe()
    );

    Ok(Stage2Output { plans, unmapped })
}

/// Candidate predictor columns in iteration order, response excluded.
pub fn iteration_domain(
    table: &FeatureTable,
    response_col: usize,
    classifier: &dyn Classifier,
    domain: IterationDomain,
) -> Vec<usize> {
    let declared = match (domain, classifier.declared_variables()) {
        (IterationDomain::Mapped, Some(vars)) => vars,
        (IterationDomain::Mapped, None) => {
            tracing::debug!("classifier has no variable list; iterating table columns");
            return table_order(table, response_col);
        }
        (IterationDomain::Table, _) => return table_order(table, response_col),
    };

    let mut columns = Vec::with_capacity(declared.len());
    let mut absent = 0usize;
    for var in declared {
        match table.column_index(var) {
            Some(idx) if idx != response_col => columns.push(idx),
            Some(_) => {}
            None => absent += 1,
        }
    }
    if absent > 0 {
        tracing::info!("{absent} mapped variables are not columns of the table; skipped");
    }
    columns
}

fn table_order(table: &FeatureTable, response_col: usize) -> Vec<usize> {
    (0..table.n_cols()).filter(|&c| c != response_col).collect()
}

/// Every column other than `x` and `y` whose group is not `x`'s group.
/// Unknown groups never match, so unmapped columns are always covariates.
pub fn covariate_set(x: usize, y: usize, groups: &[VarGroup]) -> Vec<usize> {
    let x_group = &groups[x];
    (0..groups.len())
        .filter(|&c| c != x && c != y && !groups[c].shares_group(x_group))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_covariates.rs"]
mod tests;
