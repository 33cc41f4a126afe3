//! Synchronous planet: every inhabitant evolves once per explicit call.
//!
//! Unlike [`World`](crate::World) there is no scheduler and no snapshot. The
//! generation pass walks the grid in raster order and mutates it directly, so
//! an inhabitant evolving later in a pass sees neighbors that already evolved
//! earlier in the same pass.

use crate::grid::Grid;
use crate::life::{LifeSnapshot, Living};
use crate::rule::Rule;
use crate::sensibility::Neighborhood;
use cellclock_core::{Dimensions, Error, LifeId, Position, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// An occupant a planet can seat and advance
pub trait Inhabitant: Living + fmt::Debug {
    /// Where the inhabitant asks to be placed; `None` when it has no usable coordinates
    fn coordinates(&self) -> Option<Position>;

    /// Update own state from the live surroundings
    fn evolve(&mut self, around: &Neighborhood);
}

/// Plain rule-driven inhabitant
#[derive(Debug, Clone)]
pub struct Settler {
    id: LifeId,
    position: Position,
    alive: bool,
    rule: Arc<dyn Rule>,
}

impl Settler {
    pub fn new(id: LifeId, position: Position, alive: bool, rule: Arc<dyn Rule>) -> Self {
        Self {
            id,
            position,
            alive,
            rule,
        }
    }
}

impl Living for Settler {
    fn id(&self) -> LifeId {
        self.id
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Inhabitant for Settler {
    fn coordinates(&self) -> Option<Position> {
        Some(self.position)
    }

    fn evolve(&mut self, around: &Neighborhood) {
        self.alive = self.rule.next_state(self.alive, around);
    }
}

type Slot = Option<Box<dyn Inhabitant>>;

/// A 2D planet of optional inhabitants
pub struct Planet {
    generation: u64,
    lives: Grid<Slot>,
}

impl Planet {
    /// Empty planet; both sides must be positive.
    #[instrument]
    pub fn new(width: i64, depth: i64) -> Result<Self> {
        let dimensions = Dimensions::from_signed(width, depth)?;
        info!(dimensions = %dimensions, "Planet created");
        Ok(Self::from_inhabitants(Grid::from_fn(dimensions, |_| None)))
    }

    /// Planet over an already populated grid
    pub fn from_inhabitants(lives: Grid<Slot>) -> Self {
        Self { generation: 0, lives }
    }

    /// Exclusive upper bounds of valid coordinates
    pub fn max_coordinates(&self) -> Dimensions {
        self.lives.dimensions()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seat an inhabitant in its requested cell.
    ///
    /// `Ok(false)` if the cell is already taken (the newcomer is dropped and the
    /// occupant is untouched). Missing or out-of-range coordinates are errors.
    pub fn try_put(&mut self, inhabitant: Box<dyn Inhabitant>) -> Result<bool> {
        let pos = inhabitant.coordinates().ok_or_else(|| {
            Error::MalformedCoordinates(format!("{} has no coordinates", inhabitant.id()))
        })?;
        self.lives.dimensions().check(pos)?;

        let Some(slot) = self.lives.get_mut(pos) else {
            return Ok(false);
        };
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(inhabitant);
        Ok(true)
    }

    /// Evolve every inhabitant once, in raster order, against the live grid.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
        let dimensions = self.lives.dimensions();

        for pos in dimensions.positions() {
            let Some(mut inhabitant) = self.lives.get_mut(pos).and_then(Option::take) else {
                continue;
            };
            let around = self.see_around(pos);
            inhabitant.evolve(&around);
            if let Some(slot) = self.lives.get_mut(pos) {
                *slot = Some(inhabitant);
            }
        }

        debug!(
            generation = self.generation,
            alive = self.alive_matrix().count_alive(),
            "Planet advanced"
        );
    }

    /// The current 3×3 surroundings of a cell, read straight from the live grid
    pub fn see_around(&self, pos: Position) -> Neighborhood {
        Neighborhood::gather(pos, |p| self.snapshot_at(p))
    }

    fn snapshot_at(&self, pos: Position) -> Option<LifeSnapshot> {
        self.lives
            .get(pos)
            .and_then(|slot| slot.as_ref())
            .map(|inhabitant| inhabitant.snapshot())
    }

    pub fn inhabitant_at(&self, pos: Position) -> Option<&dyn Inhabitant> {
        self.lives.get(pos).and_then(|slot| slot.as_deref())
    }

    /// Liveness of every cell; empty cells read as dead
    pub fn alive_matrix(&self) -> Grid<bool> {
        self.lives
            .map(|slot| slot.as_ref().map_or(false, |inhabitant| inhabitant.is_alive()))
    }

    /// Alive inhabitants among the given cells; out-of-range cells count as dead
    pub fn count_alive_among(&self, coordinates: impl IntoIterator<Item = Position>) -> usize {
        coordinates
            .into_iter()
            .filter(|&pos| self.snapshot_at(pos).map_or(false, |snapshot| snapshot.alive))
            .count()
    }
}

impl fmt::Debug for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planet")
            .field("generation", &self.generation)
            .field("dimensions", &self.lives.dimensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Conway, Immortal};

    #[derive(Debug)]
    struct Drifter;

    impl Living for Drifter {
        fn id(&self) -> LifeId {
            LifeId(99)
        }

        fn is_alive(&self) -> bool {
            true
        }
    }

    impl Inhabitant for Drifter {
        fn coordinates(&self) -> Option<Position> {
            None
        }

        fn evolve(&mut self, _around: &Neighborhood) {}
    }

    /// Turns alive as soon as any neighbor is alive
    #[derive(Debug)]
    struct Contagion(Settler);

    impl Living for Contagion {
        fn id(&self) -> LifeId {
            self.0.id()
        }

        fn is_alive(&self) -> bool {
            self.0.is_alive()
        }
    }

    impl Inhabitant for Contagion {
        fn coordinates(&self) -> Option<Position> {
            self.0.coordinates()
        }

        fn evolve(&mut self, around: &Neighborhood) {
            self.0.alive = self.0.alive || around.alive_count() > 0;
        }
    }

    fn settler(id: u32, x: i32, y: i32, alive: bool) -> Box<dyn Inhabitant> {
        Box::new(Settler::new(LifeId(id), Position::new(x, y), alive, Arc::new(Conway)))
    }

    #[test]
    fn test_planet_creation() {
        let planet = Planet::new(4, 3).unwrap();
        assert_eq!(planet.max_coordinates(), Dimensions::new(4, 3).unwrap());
        assert_eq!(planet.generation(), 0);
        assert_eq!(planet.alive_matrix().count_alive(), 0);

        assert!(Planet::new(0, 3).is_err());
        assert!(Planet::new(3, -1).is_err());
    }

    #[test]
    fn test_placement_is_exclusive() {
        let mut planet = Planet::new(3, 3).unwrap();
        assert!(planet.try_put(settler(1, 1, 1, true)).unwrap());
        assert!(!planet.try_put(settler(2, 1, 1, false)).unwrap());

        let seated = planet.inhabitant_at(Position::new(1, 1)).unwrap();
        assert_eq!(seated.id(), LifeId(1));
        assert!(seated.is_alive());
    }

    #[test]
    fn test_placement_rejects_bad_coordinates() {
        let mut planet = Planet::new(3, 3).unwrap();
        assert!(matches!(
            planet.try_put(settler(1, 3, 0, true)),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            planet.try_put(settler(1, 0, -1, true)),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            planet.try_put(Box::new(Drifter)),
            Err(Error::MalformedCoordinates(_))
        ));
    }

    #[test]
    fn test_count_alive_among() {
        let mut planet = Planet::new(3, 3).unwrap();
        planet.try_put(settler(0, 0, 0, true)).unwrap();
        planet.try_put(settler(1, 1, 0, false)).unwrap();
        planet.try_put(settler(2, 2, 2, true)).unwrap();

        let all = planet.max_coordinates().positions().collect::<Vec<_>>();
        assert_eq!(planet.count_alive_among(all), 2);
        assert_eq!(
            planet.count_alive_among([Position::new(0, 0), Position::new(1, 0), Position::new(5, 5)]),
            1
        );
    }

    #[test]
    fn test_generation_counter_and_rule() {
        let mut planet = Planet::new(3, 3).unwrap();
        for pos in planet.max_coordinates().positions().collect::<Vec<_>>() {
            let id = planet.max_coordinates().index_of(pos).unwrap() as u32;
            let inhabitant = Settler::new(LifeId(id), pos, pos.x == 1, Arc::new(Immortal));
            planet.try_put(Box::new(inhabitant)).unwrap();
        }

        planet.advance_generation();
        planet.advance_generation();
        assert_eq!(planet.generation(), 2);
        assert_eq!(planet.alive_matrix().count_alive(), 3);
    }

    #[test]
    fn test_later_inhabitants_see_earlier_evolution() {
        // A single alive cell at the left end of a row spreads across the whole row
        // in one pass, because each cell sees its left neighbor already converted.
        let mut planet = Planet::new(4, 1).unwrap();
        for x in 0..4 {
            let inner = Settler::new(LifeId(x as u32), Position::new(x, 0), x == 0, Arc::new(Immortal));
            planet.try_put(Box::new(Contagion(inner))).unwrap();
        }

        planet.advance_generation();
        assert_eq!(planet.alive_matrix().count_alive(), 4);
    }

    #[test]
    fn test_see_around_is_live() {
        let mut planet = Planet::new(2, 2).unwrap();
        planet.try_put(settler(0, 0, 0, true)).unwrap();
        assert_eq!(planet.see_around(Position::new(1, 1)).alive_count(), 1);
        assert_eq!(planet.see_around(Position::new(1, 1)).present_count(), 1);
        assert_eq!(planet.see_around(Position::new(0, 0)).absent_count(), 8);
    }

    #[test]
    fn test_see_around_far_outside_the_grid() {
        let mut planet = Planet::new(3, 3).unwrap();
        planet.try_put(settler(0, 0, 0, true)).unwrap();
        for pos in [Position::new(i32::MAX, 0), Position::new(i32::MIN, i32::MIN), Position::new(i32::MAX, i32::MAX)] {
            let around = planet.see_around(pos);
            assert_eq!(around.present_count(), 0, "at {}", pos);
            assert_eq!(around.alive_count(), 0, "at {}", pos);
        }
    }
}
