//! RNG oracle for cosmetic placement.
//!
//! Gameplay randomness (which use a removal consumes) is resolved once by the
//! initiating participant and travels as a concrete index. The oracle here
//! only drives local, non-authoritative choices such as where a visual entry
//! floats, so participants are free to disagree about its output.

/// Stateless seeded random number source.
///
/// Implementations must be deterministic: the same seed always yields the
/// same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit_f32(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes a base seed with a sequence number and a per-roll context.
///
/// Use distinct `context` values when one operation needs several
/// independent rolls (e.g. the x and z coordinates of a placement).
pub fn compute_seed(base_seed: u64, nonce: u64, item: u16, context: u32) -> u64 {
    let mut hash = base_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (item as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_output() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(compute_seed(1, 0, 5, 0), compute_seed(1, 0, 5, 1));
    }

    #[test]
    fn unit_values_stay_in_range() {
        let rng = PcgRng;
        for seed in 0..1_000 {
            let value = rng.unit_f32(compute_seed(7, seed, 3, 0));
            assert!((0.0..1.0).contains(&value));
        }
    }
}
