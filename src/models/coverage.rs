use statrs::distribution::{ContinuousCDF, Normal};

/// Probability that a normally distributed move stays within ±k standard deviations.
///
/// P(|Z| <= k) = 2 * Phi(k) - 1
///
/// Informational only: the bounds never depend on it.
/// Returns 0 for non-positive or non-finite `k`.
pub fn coverage_probability(multiple: f64) -> f64 {
    if !(multiple > 0.0) || !multiple.is_finite() {
        return 0.0;
    }

    let normal = Normal::standard();
    (2.0 * normal.cdf(multiple) - 1.0).clamp(0.0, 1.0)
}
