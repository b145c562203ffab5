//! Seedable pseudo-random number generator (xorshift64).

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic per seed, so a session can be replayed.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1]. Uses the top 24 bits so every value is exact in f32.
    pub fn next_unit(&mut self) -> f32 {
        const MAX: u32 = (1 << 24) - 1;
        (self.next_u64() >> 40) as u32 as f32 / MAX as f32
    }

    /// Uniform in [low, high], both ends included. Callers guarantee low <= high.
    pub fn range_inclusive(&mut self, low: f32, high: f32) -> f32 {
        let v = low + (high - low) * self.next_unit();
        v.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_unit(), rng2.next_unit());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let v = rng.next_unit();
        assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn range_stays_inside_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.range_inclusive(125.0, 518.0);
            assert!((125.0..=518.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn degenerate_range_returns_the_point() {
        let mut rng = Rng::new(3);
        assert_eq!(rng.range_inclusive(200.0, 200.0), 200.0);
    }
}
