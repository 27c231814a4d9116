//! Numerically careful summation helpers.
//!
//! Joint probabilities in an exhaustive enumeration span many orders of
//! magnitude, and millions of them may be folded into one total. Plain
//! left-to-right summation loses the small terms; these helpers do not.

/// Running sum with Neumaier compensation.
///
/// Tracks the low-order bits lost by each addition in a separate
/// compensation term, so the result is accurate to about one ulp
/// regardless of the number or ordering of the terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term.
    #[inline]
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// Fold another running sum into this one.
    pub fn merge(&mut self, other: &CompensatedSum) {
        self.add(other.sum);
        self.add(other.compensation);
    }

    /// Current value of the sum.
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Sum a slice with Neumaier compensation.
pub fn stable_sum(values: &[f64]) -> f64 {
    let mut acc = CompensatedSum::new();
    for &v in values {
        acc.add(v);
    }
    acc.value()
}

/// True when `a` and `b` agree within `rel_tol` relative to the larger
/// magnitude, or within `abs_tol` absolutely.
pub fn approx_eq(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    let diff = (a - b).abs();
    diff <= abs_tol || diff <= rel_tol * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn compensated_sum_recovers_small_terms() {
        let mut acc = CompensatedSum::new();
        acc.add(1.0);
        for _ in 0..10_000 {
            acc.add(1e-16);
        }
        acc.add(-1.0);
        assert!((acc.value() - 1e-12).abs() < 1e-20);
    }

    #[test]
    fn stable_sum_empty_is_zero() {
        assert_eq!(stable_sum(&[]), 0.0);
    }

    #[test]
    fn merge_matches_single_pass() {
        let values: Vec<f64> = (1..=100).map(|i| 1.0 / i as f64).collect();
        let mut left = CompensatedSum::new();
        let mut right = CompensatedSum::new();
        for v in &values[..40] {
            left.add(*v);
        }
        for v in &values[40..] {
            right.add(*v);
        }
        left.merge(&right);
        assert!(approx_eq(left.value(), stable_sum(&values), 1e-15, 0.0));
    }

    #[test]
    fn approx_eq_rejects_nan() {
        assert!(!approx_eq(f64::NAN, 1.0, 1.0, 1.0));
        assert!(approx_eq(1.0, 1.0 + 1e-12, 1e-9, 0.0));
        assert!(!approx_eq(1.0, 1.1, 1e-9, 1e-9));
    }

    proptest! {
        #[test]
        fn stable_sum_is_order_insensitive(mut values in proptest::collection::vec(0.0f64..1.0, 0..200)) {
            let forward = stable_sum(&values);
            values.reverse();
            let backward = stable_sum(&values);
            prop_assert!(approx_eq(forward, backward, 1e-14, 1e-300));
        }
    }
}
