//! Random initial state.

use cellclock_core::{Dimensions, Result, SeedConfig, WorldConfig};
use cellclock_world::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Initial alive matrix and the seed it was drawn from
#[derive(Debug, Clone)]
pub struct Genesis {
    pub alive: Grid<bool>,
    pub seed: u64,
}

/// Each cell starts alive with probability `rate` percent.
pub fn genesis(world: &WorldConfig, config: &SeedConfig) -> Result<Genesis> {
    let dimensions = Dimensions::new(world.width, world.depth)?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let alive = Grid::from_fn(dimensions, |_| rng.gen_range(0..100) < config.rate);

    info!(seed, rate = config.rate, alive = alive.count_alive(), "Initial state sampled");
    Ok(Genesis { alive, seed })
}
