//! Selects which simulation produces frames for the driver.

use crate::seed::Genesis;
use cellclock_core::{EngineKind, Error, LifeId, Result, SimulationConfig};
use cellclock_world::{rule_for, Frame, Inhabitant, Planet, Settler, World};
use tracing::info;

pub enum Engine {
    World(World),
    Planet(Planet),
}

impl Engine {
    pub fn from_config(config: &SimulationConfig, genesis: &Genesis) -> Result<Self> {
        match config.engine {
            EngineKind::World => {
                let world = World::from_config(&config.world, &genesis.alive, genesis.seed)?;
                Ok(Engine::World(world))
            }
            EngineKind::Planet => {
                let dimensions = genesis.alive.dimensions();
                let mut planet = Planet::new(dimensions.width as i64, dimensions.depth as i64)?;
                let rule = rule_for(config.world.rule);
                for (index, (pos, &alive)) in genesis.alive.iter().enumerate() {
                    let settler = Settler::new(LifeId(index as u32), pos, alive, rule.clone());
                    settle(&mut planet, Box::new(settler))?;
                }
                info!(generation = planet.generation(), "Planet populated");
                Ok(Engine::Planet(planet))
            }
        }
    }

    /// Next frame; the planet advances one generation per frame and uses it as time.
    pub fn next_frame(&mut self) -> Option<Frame> {
        match self {
            Engine::World(world) => world.next_frame(),
            Engine::Planet(planet) => {
                planet.advance_generation();
                Some(Frame {
                    time: planet.generation(),
                    matrix: planet.alive_matrix(),
                })
            }
        }
    }
}

/// Place an inhabitant, failing if its cell is already taken.
fn settle(planet: &mut Planet, inhabitant: Box<dyn Inhabitant>) -> Result<()> {
    let pos = inhabitant.coordinates();
    match (planet.try_put(inhabitant)?, pos) {
        (true, _) => Ok(()),
        (false, Some(pos)) => Err(Error::Occupied { x: pos.x, y: pos.y }),
        (false, None) => Err(Error::MalformedCoordinates("inhabitant has no coordinates".to_string())),
    }
}
