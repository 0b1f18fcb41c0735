use nalgebra::DMatrix;
use rayon::prelude::*;

/// 1-based ranks; tied values share the mean of the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0f64; n];
    let mut i = 0usize;
    while i < n {
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // Positions i..j are tied; their 1-based ranks are i+1..=j.
        let rank = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = rank;
        }
        i = j;
    }
    ranks
}

/// Covariances of the ranks of every pair of columns of one shared sample
/// (`n - 1` denominator). A constant column is an all-zero row and column.
#[derive(Debug, Clone)]
pub struct RankCovariance {
    pub values: DMatrix<f64>,
    pub n_obs: usize,
    pub zero_variance: Vec<bool>,
}

impl RankCovariance {
    /// Spearman coefficient of columns `i` and `j`, NaN if either is constant.
    pub fn correlation(&self, i: usize, j: usize) -> f64 {
        if self.zero_variance[i] || self.zero_variance[j] {
            return f64::NAN;
        }
        let denom = (self.values[(i, i)] * self.values[(j, j)]).sqrt();
        (self.values[(i, j)] / denom).clamp(-1.0, 1.0)
    }
}

pub fn rank_covariance(columns: &[Vec<f64>]) -> RankCovariance {
    let p = columns.len();
    let n_obs = columns.first().map_or(0, Vec::len);

    let centered: Vec<Vec<f64>> = columns
        .par_iter()
        .map(|c| {
            let ranks = average_ranks(c);
            let mean = ranks.iter().sum::<f64>() / ranks.len().max(1) as f64;
            ranks.into_iter().map(|r| r - mean).collect()
        })
        .collect();
    let zero_variance: Vec<bool> = centered
        .iter()
        .map(|r| r.iter().all(|&v| v == 0.0))
        .collect();

    let denom = n_obs.saturating_sub(1).max(1) as f64;
    let rows: Vec<Vec<f64>> = (0..p)
        .into_par_iter()
        .map(|i| {
            (0..p)
                .map(|j| {
                    let dot: f64 = centered[i]
                        .iter()
                        .zip(&centered[j])
                        .map(|(a, b)| a * b)
                        .sum();
                    dot / denom
                })
                .collect()
        })
        .collect();

    let values = DMatrix::from_fn(p, p, |i, j| rows[i][j]);
    RankCovariance {
        values,
        n_obs,
        zero_variance,
    }
}
