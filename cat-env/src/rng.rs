use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The engine's single source of randomness.
///
/// Every call site that needs randomness (the `random` selector, `middle`'s
/// jitter, the multi-CAT controller's unvalidated/missing-pool draws) takes
/// a `&mut RngSource` explicitly rather than reaching for `rand::thread_rng`.
/// Constructing one from an explicit seed is the only way to get one, so
/// reproducibility is a property of the type, not a convention callers have
/// to remember.
#[derive(Debug, Clone)]
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    /// Build a deterministic source from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `[0, len)`. Panics if `len == 0`, matching the
    /// convention that callers check for an empty pool before drawing from
    /// it (selectors return `(None, [])` on empty input instead of calling
    /// this).
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Uniform signed integer in `[lo, hi]` inclusive.
    pub fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if lo == hi {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Pick a uniformly random element by reference.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        Some(&items[i])
    }
}
