use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

/// Source of uniform randomness for picking descriptions and temperatures.
///
/// Implementations must be safe to share between threads.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;

    /// Uniform integer in `range`.
    fn pick_in_range(&self, range: RangeInclusive<i32>) -> i32;
}

/// Draws from the calling thread's generator, so nothing is shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn pick_in_range(&self, range: RangeInclusive<i32>) -> i32 {
        rand::rng().random_range(range)
    }
}

/// A single seeded generator behind a lock, for reproducible output.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> SeededRandom {
        SeededRandom {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        // The generator holds no invariant a panic could break.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..len)
    }

    fn pick_in_range(&self, range: RangeInclusive<i32>) -> i32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(range)
    }
}

/// Always returns the same choice. Indices wrap around `len` and values are
/// clamped into the requested range.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom {
    pub index: usize,
    pub value: i32,
}

impl RandomSource for FixedRandom {
    fn pick_index(&self, len: usize) -> usize {
        self.index % len
    }

    fn pick_in_range(&self, range: RangeInclusive<i32>) -> i32 {
        self.value.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn thread_random_stays_in_bounds() {
        let random = ThreadRandom;
        for _ in 0..1000 {
            assert!(random.pick_index(3) < 3);
            assert!((-50..=140).contains(&random.pick_in_range(-50..=140)));
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let draws_a: Vec<_> = (0..20).map(|_| a.pick_in_range(-50..=140)).collect();
        let draws_b: Vec<_> = (0..20).map(|_| b.pick_in_range(-50..=140)).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().collect::<HashSet<_>>().len() > 1);
    }

    #[test]
    fn seeded_random_can_be_shared_between_threads() {
        let random = Arc::new(SeededRandom::new(7));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let random = random.clone();
                std::thread::spawn(move || (0..100).map(|_| random.pick_index(5)).max())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap() < 5);
        }
    }

    #[test]
    fn fixed_random_wraps_and_clamps() {
        let random = FixedRandom {
            index: 7,
            value: 500,
        };
        assert_eq!(random.pick_index(3), 1);
        assert_eq!(random.pick_in_range(-50..=140), 140);
    }
}
