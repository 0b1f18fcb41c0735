use nalgebra::DMatrix;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::stats::PrimitiveError;
use crate::stats::rank::RankCovariance;

const PINV_RCOND: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialCorrelation {
    pub n: usize,
    pub k: usize,
    pub dof: i64,
    pub r: f64,
    pub ci95: (f64, f64),
    pub p_value: f64,
}

/// Partial correlation of columns `x` and `y` given `covariates`, read off
/// the pseudo-inverse of the `[x, y, z..]` block of a rank covariance matrix.
/// Without covariates it is the plain Spearman correlation.
///
/// A constant covariate is a zero row and column of the block, which the
/// pseudo-inverse drops; it still counts towards `k`. The p-value is
/// two-sided, from Student's t with `n - k - 2` degrees of freedom.
pub fn partial_correlation(
    cov: &RankCovariance,
    x: usize,
    y: usize,
    covariates: &[usize],
) -> Result<PartialCorrelation, PrimitiveError> {
    let n = cov.n_obs;
    let k = covariates.len();
    let dof = n as i64 - k as i64 - 2;
    if n < 3 || dof < 1 {
        return Err(PrimitiveError::TooFewObservations { n, k });
    }
    if let Some(column) = [x, y].into_iter().find(|&c| cov.zero_variance[c]) {
        return Err(PrimitiveError::ZeroVariance { column });
    }

    let r = if covariates.is_empty() {
        cov.correlation(x, y)
    } else {
        let mut idx = Vec::with_capacity(k + 2);
        idx.push(x);
        idx.push(y);
        idx.extend_from_slice(covariates);
        let m = idx.len();
        let block = DMatrix::from_fn(m, m, |i, j| cov.values[(idx[i], idx[j])]);
        let precision = pseudo_inverse(block)?;
        let pxx = precision[(0, 0)];
        let pyy = precision[(1, 1)];
        if !(pxx > 0.0 && pyy > 0.0) {
            return Err(PrimitiveError::Singular);
        }
        -precision[(0, 1)] / (pxx * pyy).sqrt()
    };
    if !r.is_finite() {
        return Err(PrimitiveError::Singular);
    }
    let r = r.clamp(-1.0, 1.0);

    Ok(PartialCorrelation {
        n,
        k,
        dof,
        r,
        ci95: fisher_ci95(r, n - k),
        p_value: t_test_p_value(r, dof)?,
    })
}

fn pseudo_inverse(block: DMatrix<f64>) -> Result<DMatrix<f64>, PrimitiveError> {
    let svd = block.svd(true, true);
    let max_sv = svd.singular_values.max();
    if !max_sv.is_finite() || max_sv <= 0.0 {
        return Err(PrimitiveError::Singular);
    }
    svd.pseudo_inverse(PINV_RCOND * max_sv)
        .map_err(|_| PrimitiveError::Singular)
}

fn t_test_p_value(r: f64, dof: i64) -> Result<f64, PrimitiveError> {
    if r.abs() >= 1.0 {
        return Ok(0.0);
    }
    let dof = dof as f64;
    let t = r * (dof / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, dof).map_err(|_| PrimitiveError::Singular)?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// Fisher-z interval, `se = 1 / sqrt(n_eff - 3)`.
fn fisher_ci95(r: f64, n_eff: usize) -> (f64, f64) {
    if n_eff <= 3 {
        return (f64::NAN, f64::NAN);
    }
    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return (f64::NAN, f64::NAN);
    };
    let crit = normal.inverse_cdf(0.975);
    let z = r.atanh();
    let se = 1.0 / ((n_eff - 3) as f64).sqrt();
    ((z - crit * se).tanh(), (z + crit * se).tanh())
}
