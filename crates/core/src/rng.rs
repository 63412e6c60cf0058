use rand::{rngs::StdRng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform index in `0..len`, or `None` for an empty range.
    pub fn next_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next_u64() % len as u64) as usize)
    }

    /// Inclusive range roll. Returns `min` when the range is empty.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u64 + 1;
        min + (self.next_u64() % span) as u32
    }
}

pub(crate) fn pick_weighted<T>(
    items: impl Iterator<Item = (T, u32)>,
    rng: &mut RngState,
) -> Option<T> {
    let items: Vec<(T, u32)> = items.filter(|(_, w)| *w > 0).collect();
    let total: u64 = items.iter().map(|(_, w)| *w as u64).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.next_u64() % total;
    for (item, weight) in items {
        let weight = weight as u64;
        if roll < weight {
            return Some(item);
        }
        roll -= weight;
    }
    None
}
