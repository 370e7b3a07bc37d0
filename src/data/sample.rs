use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Pick `min(n, indices.len())` distinct entries of `indices` uniformly at
/// random, in random order.
///
/// `seed = None` draws from OS entropy, so repeated calls differ.
pub fn sample_indices(indices: &[usize], n: usize, seed: Option<u64>) -> Vec<usize> {
    let amount = n.min(indices.len());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    index::sample(&mut rng, indices.len(), amount)
        .into_iter()
        .map(|pos| indices[pos])
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn sample_size_is_capped_by_view() {
        assert_eq!(sample_indices(&[3, 7], 5, Some(1)).len(), 2);
        assert_eq!(sample_indices(&(0..100).collect::<Vec<_>>(), 5, None).len(), 5);
        assert!(sample_indices(&[], 5, None).is_empty());
    }

    #[test]
    fn sample_is_distinct_subset_of_view() {
        let view: Vec<usize> = (10..60).step_by(2).collect();
        let picked = sample_indices(&view, 5, Some(42));
        let unique: BTreeSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(picked.iter().all(|i| view.contains(i)));
    }

    #[test]
    fn seeded_sample_is_reproducible() {
        let view: Vec<usize> = (0..1000).collect();
        assert_eq!(
            sample_indices(&view, 5, Some(7)),
            sample_indices(&view, 5, Some(7))
        );
    }
}
