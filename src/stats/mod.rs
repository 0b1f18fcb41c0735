use thiserror::Error;

pub mod partial;
pub mod rank;

pub use partial::partial_correlation;
pub use rank::{RankCovariance, rank_covariance};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrimitiveError {
    #[error("too few observations (n={n}, covariates={k})")]
    TooFewObservations { n: usize, k: usize },
    /// `column` is the table index of the constant predictor or response.
    #[error("zero variance in column {column}")]
    ZeroVariance { column: usize },
    #[error("singular covariate adjustment")]
    Singular,
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/tests.rs"]
mod tests;
