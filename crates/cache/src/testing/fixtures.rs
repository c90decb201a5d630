//! Test fixture generators
//!
//! Produces access workloads for exercising caches. All generators are
//! seeded, so a failing run can be replayed from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One cache operation in a generated workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Look up a key
    Get(u64),
    /// Store a value under a key
    Put(u64, u64),
    /// Remove a key
    Remove(u64),
}

impl Access {
    /// Key the operation touches
    pub const fn key(&self) -> u64 {
        match *self {
            Self::Get(key) | Self::Put(key, _) | Self::Remove(key) => key,
        }
    }
}

/// Generate `len` operations over keys `0..key_space` (deterministic)
///
/// Roughly half the operations are puts, two fifths gets and the rest
/// removals. Values are unique per put so updates are observable.
///
/// # Examples
///
/// ```
/// use recency_cache::testing::fixtures::workload_seeded;
///
/// let first = workload_seeded(100, 8, 42);
/// let second = workload_seeded(100, 8, 42);
/// assert_eq!(first, second); // Same seed produces same workload
/// assert!(first.iter().all(|access| access.key() < 8));
/// ```
pub fn workload_seeded(len: usize, key_space: u64, seed: u64) -> Vec<Access> {
    let mut rng = StdRng::seed_from_u64(seed);
    let key_space = key_space.max(1);

    (0..len as u64)
        .map(|value| {
            let key = rng.gen_range(0..key_space);
            match rng.gen_range(0..10) {
                0..=4 => Access::Put(key, value),
                5..=8 => Access::Get(key),
                _ => Access::Remove(key),
            }
        })
        .collect()
}

/// Generate `len` keys drawn from `0..key_space` with a hot set (deterministic)
///
/// Eighty percent of draws come from the first tenth of the key space, which
/// gives an LRU cache a realistic hit rate.
pub fn skewed_keys_seeded(len: usize, key_space: u64, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let key_space = key_space.max(1);
    let hot = (key_space / 10).max(1);

    (0..len)
        .map(|_| {
            if rng.gen_bool(0.8) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(0..key_space)
            }
        })
        .collect()
}
