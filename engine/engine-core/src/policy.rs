//! Numeric helpers for policy vectors.
//!
//! Masking and renormalisation of raw priors, arg-max scans with explicit
//! tie handling, and sampling from a distribution.

use rand::Rng;

use crate::typed::ActionMask;

/// How [`mask_and_normalize`] produced its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// The masked prior had positive mass and was rescaled to sum to 1.
    Renormalized,
    /// Every legal action had zero prior mass. The mask was added to the
    /// prior and the result rescaled, giving a uniform distribution over
    /// legal actions.
    UniformFallback,
}

/// Zero out illegal actions in `policy` and rescale it to sum to 1.
///
/// Returns `None` (leaving `policy` masked to zeros) when the mask has no
/// legal action at all; callers treat that as a contract violation.
///
/// # Panics
///
/// Panics if `policy` and `mask` differ in length.
///
/// # Example
/// ```
/// use engine_core::policy::{mask_and_normalize, Normalization};
/// use engine_core::ActionMask;
///
/// let mask = ActionMask::from(vec![true, false, true]);
/// let mut p = vec![0.2, 0.6, 0.2];
/// assert_eq!(mask_and_normalize(&mut p, &mask), Some(Normalization::Renormalized));
/// assert_eq!(p, vec![0.5, 0.0, 0.5]);
/// ```
pub fn mask_and_normalize(policy: &mut [f32], mask: &ActionMask) -> Option<Normalization> {
    assert_eq!(policy.len(), mask.len(), "policy and mask lengths differ");

    for (a, p) in policy.iter_mut().enumerate() {
        *p *= mask.weight(a);
    }

    let sum: f32 = policy.iter().sum();
    if sum > 0.0 {
        for p in policy.iter_mut() {
            *p /= sum;
        }
        return Some(Normalization::Renormalized);
    }

    if mask.has_none() {
        return None;
    }

    for (a, p) in policy.iter_mut().enumerate() {
        *p += mask.weight(a);
    }
    let sum: f32 = policy.iter().sum();
    for p in policy.iter_mut() {
        *p /= sum;
    }
    Some(Normalization::UniformFallback)
}

/// Index of the first maximum in `values`, or `None` if empty.
///
/// Ties resolve to the lowest index.
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// All indices among `candidates` whose count equals the maximum count.
pub fn tied_argmax(counts: &[u32], candidates: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let candidates: Vec<usize> = candidates.into_iter().collect();
    let Some(max) = candidates.iter().map(|&a| counts[a]).max() else {
        return Vec::new();
    };
    candidates.into_iter().filter(|&a| counts[a] == max).collect()
}

/// Sample an index from a probability distribution.
///
/// Returns `None` only when every entry is zero.
pub fn sample_index<R: Rng + ?Sized>(policy: &[f32], rng: &mut R) -> Option<usize> {
    let r: f32 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &p) in policy.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return Some(i);
        }
    }

    // Floating point slack: fall back to the last non-zero entry
    policy.iter().rposition(|&p| p > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_mask_and_normalize_renormalizes_over_valid() {
        let mask = ActionMask::from(vec![true, true, false, true]);
        let mut p = vec![0.1, 0.3, 0.5, 0.1];

        let outcome = mask_and_normalize(&mut p, &mask);

        assert_eq!(outcome, Some(Normalization::Renormalized));
        assert!(p[2].abs() < 1e-6);
        assert!((p.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!((p[1] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_mask_and_normalize_uniform_fallback() {
        // All prior mass sits on the only illegal action
        let mask = ActionMask::from(vec![true, false, true, true]);
        let mut p = vec![0.0, 1.0, 0.0, 0.0];

        let outcome = mask_and_normalize(&mut p, &mask);

        assert_eq!(outcome, Some(Normalization::UniformFallback));
        for a in [0, 2, 3] {
            assert!((p[a] - 1.0 / 3.0).abs() < 1e-6);
        }
        assert!(p[1].abs() < 1e-6);
    }

    #[test]
    fn test_mask_and_normalize_empty_mask() {
        let mask = ActionMask::none(3);
        let mut p = vec![0.3, 0.3, 0.4];
        assert_eq!(mask_and_normalize(&mut p, &mask), None);
        assert!(p.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_argmax_first_prefers_lowest_index() {
        assert_eq!(argmax_first(&[0.1, 0.7, 0.7, 0.2]), Some(1));
        assert_eq!(argmax_first(&[-1.0, -2.0]), Some(0));
        assert_eq!(argmax_first(&[]), None);
    }

    #[test]
    fn test_tied_argmax() {
        let counts = [3, 5, 0, 5, 1];
        assert_eq!(tied_argmax(&counts, 0..counts.len()), vec![1, 3]);
        // Restricted candidate set
        assert_eq!(tied_argmax(&counts, [0, 2, 4]), vec![0]);
        assert_eq!(tied_argmax(&counts, [2]), vec![2]);
        assert!(tied_argmax(&counts, std::iter::empty()).is_empty());
    }

    #[test]
    fn test_sample_index_respects_support() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let policy = vec![0.0, 0.5, 0.3, 0.2, 0.0];

        let mut counts = [0u32; 5];
        for _ in 0..1000 {
            let a = sample_index(&policy, &mut rng).unwrap();
            counts[a] += 1;
        }

        assert_eq!(counts[0], 0);
        assert_eq!(counts[4], 0);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
    }

    #[test]
    fn test_sample_index_all_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(sample_index(&[0.0, 0.0], &mut rng), None);
    }
}
