use std::collections::HashSet;

use rand::Rng;

/// Default number of questions shown at once.
pub const DEFAULT_SUBSET_SIZE: usize = 3;

/// Draws `min(count, pool_size)` distinct indices in `[0, pool_size)` by
/// uniform rejection sampling: candidates are drawn uniformly and duplicates
/// discarded until enough distinct indices have been collected.
///
/// Indices are returned in the order they were first drawn. When the pool is
/// no larger than the requested count the full range `0..pool_size` is
/// returned in ascending order instead.
///
/// Expected O(count) draws while `count` is small relative to `pool_size`.
/// The loop terminates for every input: it only runs when
/// `count < pool_size`, so there are always more candidate indices than
/// already-chosen ones and each iteration has a nonzero chance of progress.
#[must_use]
pub fn sample_distinct<R: Rng + ?Sized>(rng: &mut R, pool_size: usize, count: usize) -> Vec<usize> {
    if pool_size <= count {
        return (0..pool_size).collect();
    }

    let mut chosen = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    while chosen.len() < count {
        let candidate = rng.random_range(0..pool_size);
        if seen.insert(candidate) {
            chosen.push(candidate);
        }
    }
    chosen
}
