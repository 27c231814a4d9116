//! Posterior normalization utilities.
//!
//! Turn unnormalized probability masses into distributions that sum to one.
//! A zero or non-finite total is reported as `None` so callers can surface
//! a proper error instead of propagating NaN.

use super::stable::stable_sum;

/// Normalize a fixed-size mass vector into a probability distribution.
///
/// Returns `None` when the total mass is zero, negative, or not finite, or
/// when any entry is negative or NaN.
pub fn normalize_probs<const N: usize>(mass: &[f64; N]) -> Option<[f64; N]> {
    if mass.iter().any(|v| v.is_nan() || *v < 0.0) {
        return None;
    }
    let total = stable_sum(mass);
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    let mut out = [0.0; N];
    for (o, m) in out.iter_mut().zip(mass.iter()) {
        *o = m / total;
    }
    Some(out)
}

/// Largest absolute difference between two equally sized distributions (L∞).
pub fn max_divergence(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn normalize_basic() {
        let out = normalize_probs(&[1.0, 1.0]).unwrap();
        assert!(approx_eq(out[0], 0.5, 1e-12));
        assert!(approx_eq(out[1], 0.5, 1e-12));
    }

    #[test]
    fn normalize_scale_invariant() {
        let a = normalize_probs(&[1.0, 2.0, 3.0]).unwrap();
        let b = normalize_probs(&[1e-200, 2e-200, 3e-200]).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(approx_eq(*x, *y, 1e-12));
        }
    }

    #[test]
    fn normalize_sums_to_one() {
        let out = normalize_probs(&[0.96, 0.03, 0.01]).unwrap();
        let sum: f64 = out.iter().sum();
        assert!(approx_eq(sum, 1.0, 1e-12));
    }

    #[test]
    fn normalize_zero_total_is_none() {
        assert!(normalize_probs(&[0.0, 0.0, 0.0]).is_none());
    }

    #[test]
    fn normalize_rejects_nan_and_negative() {
        assert!(normalize_probs(&[f64::NAN, 1.0]).is_none());
        assert!(normalize_probs(&[-0.5, 1.0]).is_none());
        assert!(normalize_probs(&[f64::INFINITY, 1.0]).is_none());
    }

    #[test]
    fn max_divergence_correct() {
        let a = [0.5, 0.2, 0.3];
        let b = [0.3, 0.2, 0.5];
        assert!(approx_eq(max_divergence(&a, &b), 0.2, 1e-15));
        assert_eq!(max_divergence(&a, &a), 0.0);
        assert!(max_divergence(&a, &b[..2]).is_infinite());
    }
}
