/// Shannon entropy of a weighted possibility set
///
/// For weights `w` the entropy is `ln(Σw) − (Σ w·ln w) / Σw`. A
/// single-element set is exactly zero by definition, skipping the floating
/// point round trip. Returns `None` for an empty set or one whose weights
/// sum to zero; callers treat that as an invariant violation.
pub fn shannon_entropy(weights: &[f64]) -> Option<f64> {
    if weights.is_empty() {
        return None;
    }
    if weights.len() == 1 {
        return Some(0.0);
    }

    let mut sum_of_weights = 0.0;
    let mut sum_of_weight_log_weights = 0.0;
    for &weight in weights {
        if weight > 0.0 {
            sum_of_weights += weight;
            sum_of_weight_log_weights += weight * weight.ln();
        }
    }

    if sum_of_weights <= 0.0 {
        return None;
    }

    Some(sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights)
}

/// Index drawn from a cumulative weight distribution
///
/// `roll` is a uniform sample in `[0, 1)`; the result is the first index
/// whose cumulative weight strictly exceeds `roll * total`, so an entry of
/// zero weight is never drawn. Returns `None` for an empty or zero-total
/// distribution, or if rounding pushes the target past the final cumulative
/// sum; callers treat the overshoot as a defect rather than snapping to the
/// last index.
pub fn weighted_draw(weights: &[f64], roll: f64) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut remaining = roll * total;
    for (index, &weight) in weights.iter().enumerate() {
        remaining -= weight;
        if remaining < 0.0 {
            return Some(index);
        }
    }

    None
}
