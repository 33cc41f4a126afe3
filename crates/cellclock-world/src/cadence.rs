//! How often a life asks to evolve again.

use cellclock_core::LifeId;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::num::NonZeroU32;

/// Source of a life's time-to-next-evolution, queried at every reschedule
pub trait Cadence: fmt::Debug + Send {
    fn next_interval(&mut self) -> NonZeroU32;
}

/// The same interval every time
#[derive(Debug, Clone, Copy)]
pub struct Steady(pub NonZeroU32);

impl Cadence for Steady {
    fn next_interval(&mut self) -> NonZeroU32 {
        self.0
    }
}

/// `base ± spread`, floored at 1, drawn from a seeded stream
#[derive(Debug, Clone)]
pub struct Jittered {
    base: NonZeroU32,
    spread: u32,
    rng: ChaCha8Rng,
}

impl Jittered {
    pub fn new(base: NonZeroU32, spread: u32, seed: u64) -> Self {
        Self {
            base,
            spread,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Per-life stream derived from a world seed, so identical worlds replay identically
    pub fn for_life(base: NonZeroU32, spread: u32, world_seed: u64, id: LifeId) -> Self {
        let seed = world_seed ^ u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::new(base, spread, seed)
    }
}

impl Cadence for Jittered {
    fn next_interval(&mut self) -> NonZeroU32 {
        let spread = i64::from(self.spread);
        let offset = self.rng.gen_range(-spread..=spread);
        let interval = (i64::from(self.base.get()) + offset).clamp(1, i64::from(u32::MAX));
        NonZeroU32::new(interval as u32).unwrap_or(NonZeroU32::MIN)
    }
}
