//! What a life is allowed to perceive of the world around it.
//!
//! A [`Sensibility`] is handed to each life at birth and bound to that life's
//! position. It reads the world's published snapshot and nothing else, so a
//! life evolving mid-tick never observes a neighbor that already evolved in
//! the same tick.

use crate::grid::Grid;
use crate::life::LifeSnapshot;
use cellclock_core::{Dimensions, Direction, Position, Result};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// The last published frame, shared between the world (writer) and the lives (readers)
pub(crate) type SharedSnapshot = Arc<RwLock<Grid<Option<LifeSnapshot>>>>;

/// The eight cells around a position as seen in a snapshot.
///
/// The center is never part of a neighborhood. A slot is `None` when it lies
/// outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighborhood {
    // [dy + 1][dx + 1]
    cells: [[Option<LifeSnapshot>; 3]; 3],
}

impl Neighborhood {
    /// Collect the neighborhood of `center` through a lookup function.
    ///
    /// Offsets that overflow the coordinate space are absent without consulting `look`.
    pub fn gather(center: Position, mut look: impl FnMut(Position) -> Option<LifeSnapshot>) -> Self {
        let mut cells = [[None; 3]; 3];
        for direction in Direction::all() {
            let (dx, dy) = direction.to_delta();
            cells[(dy + 1) as usize][(dx + 1) as usize] = center.step(direction).and_then(&mut look);
        }
        Self { cells }
    }

    /// The neighbor at offset `(dx, dy)`; `None` for the center or any offset beyond one cell.
    pub fn get(&self, dx: i32, dy: i32) -> Option<LifeSnapshot> {
        if (dx, dy) == (0, 0) || !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return None;
        }
        self.cells[(dy + 1) as usize][(dx + 1) as usize]
    }

    pub fn toward(&self, direction: Direction) -> Option<LifeSnapshot> {
        let (dx, dy) = direction.to_delta();
        self.get(dx, dy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, Option<LifeSnapshot>)> + '_ {
        Direction::all()
            .into_iter()
            .map(move |direction| (direction, self.toward(direction)))
    }

    /// Neighbors that exist (in-bounds cells)
    pub fn present_count(&self) -> usize {
        self.iter().filter(|(_, n)| n.is_some()).count()
    }

    /// Neighbor slots that fall outside the grid
    pub fn absent_count(&self) -> usize {
        8 - self.present_count()
    }

    pub fn alive_count(&self) -> usize {
        self.iter()
            .filter(|(_, n)| n.map_or(false, |snapshot| snapshot.alive))
            .count()
    }
}

/// Read-only view of the world's snapshot, bound to one position.
///
/// Holds a weak handle: the world owns its snapshot, a sensibility only looks
/// at it. Once the world is gone every neighbor reads as absent.
#[derive(Debug, Clone)]
pub struct Sensibility {
    reality: Weak<RwLock<Grid<Option<LifeSnapshot>>>>,
    position: Position,
    dimensions: Dimensions,
}

impl Sensibility {
    pub(crate) fn new(reality: &SharedSnapshot, position: Position) -> Result<Self> {
        let dimensions = reality.read().dimensions();
        dimensions.check(position)?;

        Ok(Self {
            reality: Arc::downgrade(reality),
            position,
            dimensions,
        })
    }

    /// A sensibility not attached to any world; it perceives nothing.
    pub fn blind(position: Position, dimensions: Dimensions) -> Result<Self> {
        dimensions.check(position)?;

        Ok(Self {
            reality: Weak::new(),
            position,
            dimensions,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Look at the 3×3 area around the bound position in the last published snapshot.
    pub fn see_around(&self) -> Neighborhood {
        let Some(reality) = self.reality.upgrade() else {
            return Neighborhood::default();
        };
        let snapshot = reality.read();
        Neighborhood::gather(self.position, |pos| snapshot.get(pos).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellclock_core::LifeId;

    fn shared(width: usize, depth: usize, alive: bool) -> SharedSnapshot {
        let dims = Dimensions::new(width, depth).unwrap();
        Arc::new(RwLock::new(Grid::from_fn(dims, |p| {
            Some(LifeSnapshot {
                id: LifeId(dims.index_of(p).unwrap() as u32),
                alive,
            })
        })))
    }

    #[test]
    fn test_corner_sees_three_neighbors() {
        let reality = shared(4, 4, true);
        for corner in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            let sense = Sensibility::new(&reality, Position::new(corner.0, corner.1)).unwrap();
            let around = sense.see_around();
            assert_eq!(around.present_count(), 3, "corner {:?}", corner);
            assert_eq!(around.absent_count(), 5, "corner {:?}", corner);
            assert_eq!(around.alive_count(), 3);
        }
    }

    #[test]
    fn test_interior_sees_eight_neighbors() {
        let reality = shared(3, 3, false);
        let around = Sensibility::new(&reality, Position::new(1, 1)).unwrap().see_around();
        assert_eq!(around.present_count(), 8);
        assert_eq!(around.alive_count(), 0);
        assert_eq!(around.get(0, 0), None);
        assert_eq!(around.get(1, 1).map(|n| n.id), Some(LifeId(8)));
        assert_eq!(around.toward(Direction::North).map(|n| n.id), Some(LifeId(1)));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let reality = shared(3, 3, false);
        assert!(Sensibility::new(&reality, Position::new(3, 0)).is_err());
        assert!(Sensibility::new(&reality, Position::new(0, -1)).is_err());
    }

    #[test]
    fn test_reads_follow_snapshot_writes() {
        let reality = shared(2, 1, false);
        let sense = Sensibility::new(&reality, Position::new(0, 0)).unwrap();
        assert_eq!(sense.see_around().alive_count(), 0);

        reality
            .write()
            .set(Position::new(1, 0), Some(LifeSnapshot { id: LifeId(1), alive: true }))
            .unwrap();
        assert_eq!(sense.see_around().alive_count(), 1);
    }

    #[test]
    fn test_detached_sensibility_sees_nothing() {
        let reality = shared(3, 3, true);
        let sense = Sensibility::new(&reality, Position::new(1, 1)).unwrap();
        drop(reality);
        assert_eq!(sense.see_around().present_count(), 0);

        let blind = Sensibility::blind(Position::new(0, 0), Dimensions::new(1, 1).unwrap()).unwrap();
        assert_eq!(blind.see_around(), Neighborhood::default());
        assert_eq!(blind.position(), Position::new(0, 0));
        assert_eq!(blind.dimensions(), Dimensions::new(1, 1).unwrap());
    }

    #[test]
    fn test_gather_at_coordinate_extremes() {
        let mut looked = Vec::new();
        let around = Neighborhood::gather(Position::new(i32::MAX, 0), |pos| {
            looked.push(pos);
            None
        });
        assert_eq!(around.present_count(), 0);
        // only the three western offsets are representable
        assert_eq!(looked.len(), 3);
        assert!(looked.iter().all(|pos| pos.x == i32::MAX - 1));

        let around = Neighborhood::gather(Position::new(i32::MIN, i32::MIN), |_| {
            Some(LifeSnapshot { id: LifeId(0), alive: true })
        });
        assert_eq!(around.present_count(), 3);
        assert_eq!(around.get(-1, 0), None);
        assert_eq!(around.get(1, 1).map(|n| n.alive), Some(true));
    }
}
