use serde::Serialize;

use crate::model::config::AnalysisConfig;
use crate::model::record::ResultTable;
use crate::pipeline::AnalysisOutput;
use crate::pipeline::stage1_clean::CleaningAudit;

pub mod text;

pub const SIGNIFICANCE_ALPHA: f64 = 0.05;

#[derive(Debug, Clone, Serialize)]
pub struct TopHit {
    pub var: String,
    pub group: Option<String>,
    pub r: f64,
    pub p_adj: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub input: String,
    pub group_source: String,
    pub config: AnalysisConfig,
    pub cleaning: CleaningAudit,
    pub unmapped_variables: Vec<String>,
    pub n_tests: usize,
    pub n_failed: usize,
    pub n_significant: usize,
    pub alpha: f64,
    pub top_hits: Vec<TopHit>,
}

pub fn build_summary(
    output: &AnalysisOutput,
    config: &AnalysisConfig,
    input: &str,
    group_source: &str,
) -> RunSummary {
    let hits = top_hits(&output.result, SIGNIFICANCE_ALPHA);
    RunSummary {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.to_string(),
        group_source: group_source.to_string(),
        config: config.clone(),
        cleaning: output.audit.clone(),
        unmapped_variables: output.unmapped.clone(),
        n_tests: output.result.n_tests,
        n_failed: output.result.failures(),
        n_significant: hits.len(),
        alpha: SIGNIFICANCE_ALPHA,
        top_hits: hits,
    }
}

fn top_hits(result: &ResultTable, alpha: f64) -> Vec<TopHit> {
    result
        .significant(alpha)
        .into_iter()
        .map(|r| TopHit {
            var: r.var.clone(),
            group: r.group.clone(),
            r: r.r,
            p_adj: r.p_adj,
        })
        .collect()
}

pub fn format_f64_6(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.6}", v)
}

pub fn format_p(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.3e}", v)
}
