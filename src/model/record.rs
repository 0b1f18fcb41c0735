use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Ok,
    TooFewObservations,
    ZeroVariance,
    Singular,
}

/// One tested predictor. Field order is the column order of
/// `partial_correlations.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationRecord {
    pub var: String,
    pub group: Option<String>,
    pub n: usize,
    pub dof: i64,
    pub n_covariates: usize,
    pub r: f64,
    pub ci95_low: f64,
    pub ci95_high: f64,
    #[serde(rename = "p-val")]
    pub p_val: f64,
    #[serde(rename = "p-adj")]
    pub p_adj: f64,
    pub status: RecordStatus,
}

#[derive(Debug, Clone)]
pub struct ResultTable {
    pub records: Vec<CorrelationRecord>,
    pub n_tests: usize,
}

impl ResultTable {
    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status != RecordStatus::Ok)
            .count()
    }

    pub fn significant(&self, alpha: f64) -> Vec<&CorrelationRecord> {
        let mut hits: Vec<&CorrelationRecord> = self
            .records
            .iter()
            .filter(|r| r.status == RecordStatus::Ok && r.p_adj < alpha)
            .collect();
        hits.sort_by(|a, b| {
            a.p_adj
                .partial_cmp(&b.p_adj)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }
}
