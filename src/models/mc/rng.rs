//! Explicitly owned random stream for the simulation pricer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Seeded random stream. Every simulator owns exactly one; streams are never
/// shared, so independent runs (or shards of one run) stay reproducible.
#[derive(Debug, Clone)]
pub struct SimulationRng {
    inner: StdRng,
    seed: u64,
}

impl SimulationRng {
    /// The same seed always yields the same sequence of draws.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh stream seeded from the thread-local entropy source. The chosen
    /// seed is kept so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().gen())
    }

    /// Stream for shard `shard` of a run seeded with `seed`.
    ///
    /// The shard index is mixed with SplitMix64 so neighbouring shards get
    /// unrelated seeds; shard 0 differs from `from_seed(seed)`.
    pub fn for_shard(seed: u64, shard: u64) -> Self {
        let mut z = seed ^ shard.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::from_seed(z ^ (z >> 31))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One standard normal draw.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }
}
