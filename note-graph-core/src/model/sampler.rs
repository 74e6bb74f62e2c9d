use super::note::NOTE_COUNT;

/// Selects an index from a row of transition weights.
///
/// Builds the prefix-sum distribution over `weights` in ordinal order,
/// normalized by the row's total positive mass, and returns the smallest
/// index whose cumulative value exceeds `u`.
///
/// - Negative weights carry no probability mass.
/// - Rows that no longer sum to 1 (drift after updates) are still sampled
///   proportionally.
///
/// Returns `None` when no weight is positive.
pub(crate) fn select(weights: &[f64; NOTE_COUNT], u: f64) -> Option<usize> {
	let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
	if !(total > 0.0) || !total.is_finite() {
		return None;
	}

	let u = u.clamp(0.0, 1.0);
	let mut cumulative = 0.0;
	let mut last_positive = None;
	for (i, weight) in weights.iter().enumerate() {
		if *weight <= 0.0 {
			continue;
		}
		cumulative += weight / total;
		if cumulative > u {
			return Some(i);
		}
		last_positive = Some(i);
	}

	// Rounding can leave the final prefix sum a hair below u
	last_positive
}

/// Uniform selection used when a row has no positive mass.
pub(crate) fn select_uniform(u: f64) -> usize {
	((u.clamp(0.0, 1.0) * NOTE_COUNT as f64) as usize).min(NOTE_COUNT - 1)
}
