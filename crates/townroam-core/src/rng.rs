//! Deterministic chunk PRNG.
//!
//! `chunk_seed(key, world_seed)` hashes a chunk key into a 64-bit seed;
//! `ChunkRng` expands it with SplitMix64. Same key and world seed always
//! yield the same sequence. Not suitable for anything security related.

use crate::constants::{SEED_PRIME_X, SEED_PRIME_Z};
use crate::types::ChunkKey;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Combine two 64-bit values into one well-mixed seed.
pub fn hash_combine(a: u64, b: u64) -> u64 {
    mix64(a ^ b.wrapping_add(GOLDEN_GAMMA).wrapping_add(a << 6).wrapping_add(a >> 2))
}

/// Seed for a chunk: `cx * P1 + cz * P2`, folded with the world seed.
pub fn chunk_seed(key: ChunkKey, world_seed: u64) -> u64 {
    let raw = (key.x as i64)
        .wrapping_mul(SEED_PRIME_X)
        .wrapping_add((key.y as i64).wrapping_mul(SEED_PRIME_Z));
    hash_combine(world_seed, raw as u64)
}

/// SplitMix64 stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRng {
    state: u64,
}

impl ChunkRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn for_chunk(key: ChunkKey, world_seed: u64) -> Self {
        Self::new(chunk_seed(key, world_seed))
    }

    /// Derive an independent stream, e.g. one per spawned vehicle.
    pub fn fork(&mut self) -> Self {
        Self::new(mix64(self.next_u64()))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / 16_777_216.0 // 2^24
    }

    /// Uniform float in [lo, hi).
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform integer in [lo, hi] (inclusive). Returns `lo` if `hi < lo`.
    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as u64 + 1;
        lo + (self.next_u64() % span) as u32
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniformly pick -1.0 or 1.0.
    pub fn sign(&mut self) -> f32 {
        if self.next_u64() & 1 == 0 {
            -1.0
        } else {
            1.0
        }
    }
}
