//! Discrete-event world.
//!
//! The world seats one [`Life`] per cell, keeps a frozen snapshot of the grid
//! that lives perceive through their [`Sensibility`], and drives a single
//! event timeline where every life and the world itself declare their own
//! time-to-next-event. Pulling a frame runs the timeline up to the next world
//! event, which refreshes the snapshot and publishes it.

use crate::cadence::{Cadence, Jittered, Steady};
use crate::grid::Grid;
use crate::life::{Life, LifeSnapshot, Living};
use crate::rule::{rule_for, Conway, Rule};
use crate::scheduler::{Agenda, Owner};
use crate::sensibility::{Sensibility, SharedSnapshot};
use cellclock_core::{Dimensions, Error, LifeId, Position, Result, SimTime, WorldConfig};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// One published view of the world
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Simulated time of the world event that published this frame
    pub time: SimTime,
    /// Alive/dead state of every cell, as of that event
    pub matrix: Grid<bool>,
}

impl Frame {
    pub fn alive_count(&self) -> usize {
        self.matrix.count_alive()
    }
}

type CadenceFactory = Box<dyn Fn(LifeId, NonZeroU32) -> Box<dyn Cadence>>;

/// Assembles a [`World`] from initial matrices
pub struct WorldBuilder<'a> {
    alive: &'a Grid<bool>,
    intervals: &'a Grid<u32>,
    world_interval: u32,
    rule: Arc<dyn Rule>,
    cadence: CadenceFactory,
}

impl<'a> WorldBuilder<'a> {
    /// Rule shared by every life (Conway by default)
    pub fn rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rule = rule;
        self
    }

    /// Reschedule each life at `initial ± spread`, from streams derived from `seed`
    pub fn jitter(self, spread: u32, seed: u64) -> Self {
        self.cadence(move |id, initial| {
            Box::new(Jittered::for_life(initial, spread, seed, id)) as Box<dyn Cadence>
        })
    }

    /// Custom cadence per life, given its id and its initial interval
    pub fn cadence(mut self, factory: impl Fn(LifeId, NonZeroU32) -> Box<dyn Cadence> + 'static) -> Self {
        self.cadence = Box::new(factory);
        self
    }

    pub fn build(self) -> Result<World> {
        World::genesis(self)
    }
}

/// The grid owner, scheduler and sole publisher of frames
pub struct World {
    dimensions: Dimensions,
    current: Grid<Life>,
    snapshot: SharedSnapshot,
    links: HashMap<LifeId, Position>,
    agenda: Agenda,
    frame: NonZeroU32,
    now: SimTime,
    published: u64,
}

impl World {
    /// World of Conway lives with steady cadences.
    pub fn new(alive: &Grid<bool>, intervals: &Grid<u32>, world_interval: u32) -> Result<Self> {
        Self::builder(alive, intervals, world_interval).build()
    }

    pub fn builder<'a>(alive: &'a Grid<bool>, intervals: &'a Grid<u32>, world_interval: u32) -> WorldBuilder<'a> {
        WorldBuilder {
            alive,
            intervals,
            world_interval,
            rule: Arc::new(Conway),
            cadence: Box::new(|_: LifeId, initial: NonZeroU32| {
                Box::new(Steady(initial)) as Box<dyn Cadence>
            }),
        }
    }

    /// Every cell starts with `config.cell_interval`; rule and jitter come from the config.
    pub fn from_config(config: &WorldConfig, alive: &Grid<bool>, seed: u64) -> Result<Self> {
        let expected = Dimensions::new(config.width, config.depth)?;
        if alive.dimensions() != expected {
            return Err(Error::Validation(format!(
                "alive matrix is {} but the world is configured as {}",
                alive.dimensions(),
                expected
            )));
        }

        let intervals = Grid::filled(expected, config.cell_interval);
        let builder = Self::builder(alive, &intervals, config.world_interval).rule(rule_for(config.rule));
        if config.jitter > 0 {
            builder.jitter(config.jitter, seed).build()
        } else {
            builder.build()
        }
    }

    /// One synchronous generation of `matrix`, computed by a throwaway world.
    pub fn next_generation(matrix: &Grid<bool>) -> Result<Grid<bool>> {
        // Lives evolve at t=1 against the initial snapshot; the world publishes at t=2
        // ahead of the lives' second evolution.
        let intervals = Grid::filled(matrix.dimensions(), 1);
        let mut world = World::new(matrix, &intervals, 2)?;
        world
            .next_frame()
            .map(|frame| frame.matrix)
            .ok_or_else(|| Error::Validation("world produced no frame".to_string()))
    }

    #[instrument(skip_all, fields(width = builder.alive.width(), depth = builder.alive.depth()))]
    fn genesis(builder: WorldBuilder<'_>) -> Result<Self> {
        let WorldBuilder {
            alive,
            intervals,
            world_interval,
            rule,
            cadence,
        } = builder;

        let dimensions = alive.dimensions();
        if intervals.dimensions() != dimensions {
            return Err(Error::ShapeMismatch {
                alive: (alive.width(), alive.depth()),
                intervals: (intervals.width(), intervals.depth()),
            });
        }

        let frame = NonZeroU32::new(world_interval).ok_or_else(|| Error::InvalidInterval {
            owner: "world".to_string(),
            interval: i64::from(world_interval),
        })?;

        let snapshot: SharedSnapshot = Arc::new(RwLock::new(Grid::filled(dimensions, None)));
        let mut slots: Grid<Option<Life>> = Grid::from_fn(dimensions, |_| None);
        let mut links = HashMap::with_capacity(dimensions.area());

        for (index, pos) in dimensions.positions().enumerate() {
            let initial = intervals.get(pos).copied().unwrap_or_default();
            let initial = NonZeroU32::new(initial).ok_or_else(|| Error::InvalidInterval {
                owner: format!("cell {}", pos),
                interval: i64::from(initial),
            })?;

            let id = LifeId(index as u32);
            let life = Life::new(
                id,
                Sensibility::new(&snapshot, pos)?,
                alive.get(pos).copied().unwrap_or(false),
                rule.clone(),
                cadence(id, initial),
            );
            Self::born(&mut slots, &mut links, life)?;
        }

        let current = slots.try_into_map(|slot| {
            slot.ok_or_else(|| Error::Validation("a cell was left empty at genesis".to_string()))
        })?;

        let mut world = Self {
            dimensions,
            current,
            snapshot,
            links,
            agenda: Agenda::new(),
            frame,
            now: 0,
            published: 0,
        };
        world.refresh_snapshot();

        for life in world.current.values_mut() {
            let first = SimTime::from(life.report_interval().get());
            world.agenda.schedule(Owner::Life(life.id()), first);
        }
        world.agenda.schedule(Owner::World, SimTime::from(frame.get()));

        info!(
            dimensions = %dimensions,
            lives = dimensions.area(),
            world_interval = frame.get(),
            alive = alive.count_alive(),
            "World created"
        );

        Ok(world)
    }

    fn born(slots: &mut Grid<Option<Life>>, links: &mut HashMap<LifeId, Position>, life: Life) -> Result<()> {
        let pos = life.position();
        slots.dimensions().check(pos)?;

        if let Some(slot) = slots.get_mut(pos) {
            if slot.is_some() {
                return Err(Error::Occupied { x: pos.x, y: pos.y });
            }
            links.insert(life.id(), pos);
            *slot = Some(life);
        }
        Ok(())
    }

    /// Infinite frame sequence; the caller decides how many frames to pull.
    pub fn running(&mut self) -> Frames<'_> {
        Frames { world: self }
    }

    /// Run the timeline up to and including the next world event.
    ///
    /// Returns `None` only if the agenda is empty, which a constructed world never is.
    pub fn next_frame(&mut self) -> Option<Frame> {
        while let Some(event) = self.agenda.pop() {
            match event.owner {
                Owner::Life(id) => self.evolve_life(id, event.at),
                Owner::World => return Some(self.publish(event.at)),
            }
        }

        warn!("World agenda is empty");
        None
    }

    fn evolve_life(&mut self, id: LifeId, at: SimTime) {
        let Some(life) = self.links.get(&id).and_then(|pos| self.current.get_mut(*pos)) else {
            warn!(life = %id, "Event for unknown life dropped");
            return;
        };

        life.evolve();
        let next = at.saturating_add(SimTime::from(life.report_interval().get()));
        trace!(life = %id, at, next, alive = life.is_alive(), "Life evolved");
        self.agenda.schedule(Owner::Life(id), next);
    }

    fn publish(&mut self, at: SimTime) -> Frame {
        self.refresh_snapshot();
        self.agenda
            .schedule(Owner::World, at.saturating_add(SimTime::from(self.frame.get())));
        self.now = at;
        self.published += 1;

        let frame = Frame {
            time: at,
            matrix: self.god_vision(),
        };
        debug!(
            time = at,
            frame = self.published,
            alive = frame.alive_count(),
            "Frame published"
        );
        frame
    }

    fn refresh_snapshot(&mut self) {
        let mut snapshot = self.snapshot.write();
        for (slot, life) in snapshot.values_mut().zip(self.current.values()) {
            *slot = Some(life.take_snapshot());
        }
    }

    fn god_vision(&self) -> Grid<bool> {
        self.snapshot
            .read()
            .map(|cell| cell.map_or(false, |snapshot| snapshot.alive))
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Fixed interval between two world events
    pub fn world_interval(&self) -> NonZeroU32 {
        self.frame
    }

    /// Time of the most recently published frame (0 before the first)
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn frames_published(&self) -> u64 {
        self.published
    }

    pub fn pending_events(&self) -> usize {
        self.agenda.len()
    }

    /// The live (possibly already evolved) occupant of a cell
    pub fn life_at(&self, pos: Position) -> Option<&Life> {
        self.current.get(pos)
    }

    /// What lives currently perceive at a cell
    pub fn snapshot_at(&self, pos: Position) -> Option<LifeSnapshot> {
        self.snapshot.read().get(pos).copied().flatten()
    }

    pub fn position_of(&self, id: LifeId) -> Option<Position> {
        self.links.get(&id).copied()
    }
}

/// Borrowing, infinite iterator over published frames
pub struct Frames<'a> {
    world: &'a mut World,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.world.next_frame()
    }
}
