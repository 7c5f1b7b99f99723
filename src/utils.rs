//! Utility functions for the Hexapawn crate

use rand::Rng;

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use hexapawn::utils::shannon_entropy;
///
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// let entropy = shannon_entropy(vec![1.0, 0.0, 0.0]);
/// assert!(entropy.abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Calculate entropy from bead counts (normalizes first).
///
/// Returns 0.0 if the total weight is zero.
///
/// # Examples
///
/// ```
/// use hexapawn::utils::entropy_from_weights;
///
/// let entropy = entropy_from_weights([1, 1]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// assert_eq!(entropy_from_weights([0, 0]), 0.0);
/// ```
pub fn entropy_from_weights<I>(weights: I) -> f64
where
    I: IntoIterator<Item = u32>,
{
    let weights: Vec<f64> = weights.into_iter().map(f64::from).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    shannon_entropy(weights.iter().map(|w| w / total))
}

/// Pick an index with probability proportional to its integer weight.
///
/// Draws exactly one integer uniformly from `[0, total)` and returns the first
/// index whose running sum exceeds the draw. Returns `None` without touching
/// the generator when the weights are empty or all zero.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use hexapawn::utils::weighted_index;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let index = weighted_index(&mut rng, &[0, 5, 0]);
/// assert_eq!(index, Some(1));
///
/// assert_eq!(weighted_index(&mut rng, &[0, 0]), None);
/// ```
pub fn weighted_index<R>(rng: &mut R, weights: &[u32]) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return None;
    }

    let draw = rng.random_range(0..total);
    let mut cumulative = 0u64;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += u64::from(weight);
        if cumulative > draw {
            return Some(index);
        }
    }

    // Unreachable while draw < total
    weights.iter().rposition(|&w| w > 0)
}
