use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

/// Uniformly permute a copy of `items`.
///
/// `SliceRandom::shuffle` is Fisher-Yates walking from the last index down to 1,
/// swapping with a uniform index in `0..=i`. The input slice is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Uniform sample without replacement of at most `n` elements.
pub fn sample_n<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut out = shuffle(items, rng);
    out.truncate(n.min(items.len()));
    out
}

/// Distinct keys of `items`, minus the key of `exclude`.
///
/// Ordered so that a seeded rng downstream produces the same questions run to run.
pub fn dedup_excluding<T, K, F>(items: &[T], exclude: &T, key_fn: F) -> BTreeSet<K>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let excluded = key_fn(exclude);
    items
        .iter()
        .map(&key_fn)
        .filter(|key| *key != excluded)
        .collect()
}
