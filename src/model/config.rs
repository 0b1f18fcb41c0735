use clap::ValueEnum;
use serde::Serialize;

/// Response variables the analysis is defined for. The two are mutually
/// exclusive: whichever is not the response is removed from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum ResponseVar {
    #[value(name = "dN")]
    #[serde(rename = "dN")]
    DN,
    #[value(name = "mean.phylop")]
    #[serde(rename = "mean.phylop")]
    MeanPhylop,
}

impl ResponseVar {
    pub fn column(self) -> &'static str {
        match self {
            ResponseVar::DN => "dN",
            ResponseVar::MeanPhylop => "mean.phylop",
        }
    }

    pub fn counterpart(self) -> ResponseVar {
        match self {
            ResponseVar::DN => ResponseVar::MeanPhylop,
            ResponseVar::MeanPhylop => ResponseVar::DN,
        }
    }
}

/// Which variables are tried as predictors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IterationDomain {
    /// Every column of the cleaned table.
    Table,
    /// Every variable of the group mapping that is also a table column.
    Mapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleaningPolicy {
    /// Infinities become missing; rows holding any missing value are dropped.
    DropRows,
    /// Any missing or non-finite value aborts the run.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// A predictor that cannot be computed yields a NaN record.
    Record,
    /// A predictor that cannot be computed aborts the run.
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustPolicy {
    /// `p × T`, may exceed 1.
    Raw,
    /// `min(p × T, 1)`.
    Capped,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisConfig {
    pub response: ResponseVar,
    pub id_column: String,
    pub domain: IterationDomain,
    pub cleaning: CleaningPolicy,
    pub failure: FailurePolicy,
    pub adjust: AdjustPolicy,
    pub threads: Option<usize>,
}

pub const DEFAULT_ID_COLUMN: &str = "Systematic_ID";

impl AnalysisConfig {
    pub fn new(response: ResponseVar) -> Self {
        Self {
            response,
            id_column: DEFAULT_ID_COLUMN.to_string(),
            domain: IterationDomain::Mapped,
            cleaning: CleaningPolicy::DropRows,
            failure: FailurePolicy::Record,
            adjust: AdjustPolicy::Raw,
            threads: None,
        }
    }
}
