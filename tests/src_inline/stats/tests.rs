use super::rank::average_ranks;
use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let sab: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    let saa: f64 = a.iter().map(|x| (x - ma) * (x - ma)).sum();
    let sbb: f64 = b.iter().map(|y| (y - mb) * (y - mb)).sum();
    sab / (saa * sbb).sqrt()
}

fn sample() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        vec![2.1, 1.9, 3.5, 3.0, 6.2, 5.1, 7.7, 6.9, 9.8, 8.4],
        vec![5.0, 3.0, 4.0, 1.0, 2.0, 8.0, 6.0, 10.0, 7.0, 9.0],
        vec![0.3, 0.9, 0.1, 0.7, 0.5, 0.2, 0.8, 0.4, 0.6, 1.0],
    ]
}

#[test]
fn test_average_ranks_ties() {
    assert_eq!(average_ranks(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
    assert_eq!(average_ranks(&[3.0, 1.0, 2.0]), vec![3.0, 1.0, 2.0]);
    assert_eq!(average_ranks(&[7.0, 7.0, 7.0]), vec![2.0, 2.0, 2.0]);
}

#[test]
fn test_rank_covariance_is_symmetric() {
    let m = rank_covariance(&sample());
    assert_eq!(m.n_obs, 10);
    // Distinct ranks 1..=10 have variance n(n+1)/12.
    for i in 0..4 {
        assert!(close(m.values[(i, i)], 110.0 / 12.0));
        assert!(close(m.correlation(i, i), 1.0));
        for j in 0..4 {
            assert!(close(m.values[(i, j)], m.values[(j, i)]));
        }
    }
}

#[test]
fn test_no_covariates_equals_spearman() {
    let data = sample();
    let m = rank_covariance(&data);
    let pc = partial_correlation(&m, 0, 1, &[]).unwrap();
    let expected = pearson(&average_ranks(&data[0]), &average_ranks(&data[1]));
    assert!(close(pc.r, expected));
    assert_eq!(pc.n, 10);
    assert_eq!(pc.k, 0);
    assert_eq!(pc.dof, 8);
}

#[test]
fn test_single_covariate_matches_first_order_formula() {
    let m = rank_covariance(&sample());
    let rxy = m.correlation(0, 1);
    let rxz = m.correlation(0, 2);
    let ryz = m.correlation(1, 2);
    let expected = (rxy - rxz * ryz) / ((1.0 - rxz * rxz) * (1.0 - ryz * ryz)).sqrt();

    let pc = partial_correlation(&m, 0, 1, &[2]).unwrap();
    assert!(close(pc.r, expected));
    assert_eq!(pc.dof, 7);
}

#[test]
fn test_p_value_matches_t_distribution() {
    use statrs::distribution::{ContinuousCDF, StudentsT};

    let m = rank_covariance(&sample());
    let pc = partial_correlation(&m, 0, 3, &[2]).unwrap();
    let dof = pc.dof as f64;
    let t = pc.r * (dof / (1.0 - pc.r * pc.r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, dof).unwrap();
    let expected = 2.0 * (1.0 - dist.cdf(t.abs()));
    assert!((pc.p_value - expected).abs() < 1e-8);
    assert!(pc.p_value > 0.0 && pc.p_value <= 1.0);
    assert!(pc.ci95.0 <= pc.r && pc.r <= pc.ci95.1);
}

#[test]
fn test_sign_flip_keeps_p_value() {
    let mut data = sample();
    let m = rank_covariance(&data);
    let a = partial_correlation(&m, 0, 1, &[2, 3]).unwrap();

    data[1] = data[1].iter().map(|v| -v).collect();
    let m = rank_covariance(&data);
    let b = partial_correlation(&m, 0, 1, &[2, 3]).unwrap();

    assert!(close(a.r, -b.r));
    assert!(close(a.p_value, b.p_value));
}

#[test]
fn test_perfect_monotone_pair() {
    let x: Vec<f64> = (1..=8).map(|v| v as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| v * v * v).collect();
    let m = rank_covariance(&[x, y]);
    let pc = partial_correlation(&m, 0, 1, &[]).unwrap();
    assert!(close(pc.r, 1.0));
    assert_eq!(pc.p_value, 0.0);
}

#[test]
fn test_constant_predictor_or_response_is_reported() {
    let mut data = sample();
    data[0] = vec![4.0; 10];
    let m = rank_covariance(&data);
    assert!(m.zero_variance[0]);
    assert!(m.correlation(0, 1).is_nan());
    assert_eq!(
        partial_correlation(&m, 0, 1, &[2]),
        Err(PrimitiveError::ZeroVariance { column: 0 })
    );
    assert_eq!(
        partial_correlation(&m, 1, 0, &[]),
        Err(PrimitiveError::ZeroVariance { column: 0 })
    );
}

#[test]
fn test_constant_covariate_is_ignored() {
    let mut data = sample();
    data[2] = vec![4.0; 10];
    let m = rank_covariance(&data);
    assert!(m.zero_variance[2]);

    let with_flat = partial_correlation(&m, 0, 1, &[2, 3]).unwrap();
    let without = partial_correlation(&m, 0, 1, &[3]).unwrap();
    assert!(close(with_flat.r, without.r));
    // The constant column still counts as a covariate.
    assert_eq!(with_flat.k, 2);
    assert_eq!(with_flat.dof, 6);

    let only_flat = partial_correlation(&m, 0, 1, &[2]).unwrap();
    assert!(close(only_flat.r, m.correlation(0, 1)));
}

#[test]
fn test_too_few_observations() {
    let data = vec![vec![1.0, 2.0, 3.0], vec![3.0, 1.0, 2.0], vec![1.0, 3.0, 2.0]];
    let m = rank_covariance(&data);
    assert!(partial_correlation(&m, 0, 1, &[]).is_ok());
    assert_eq!(
        partial_correlation(&m, 0, 1, &[2]),
        Err(PrimitiveError::TooFewObservations { n: 3, k: 1 })
    );
}

#[test]
fn test_collinear_covariates_use_pseudo_inverse() {
    let mut data = sample();
    data.push(data[2].iter().map(|v| v * 2.0 + 1.0).collect());
    let m = rank_covariance(&data);
    let dup = partial_correlation(&m, 0, 1, &[2, 4]).unwrap();
    let single = partial_correlation(&m, 0, 1, &[2]).unwrap();
    assert!((dup.r - single.r).abs() < 1e-6);
}
