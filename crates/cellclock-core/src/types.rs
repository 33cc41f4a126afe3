//! Core type definitions for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated time, in abstract time units.
pub type SimTime = u64;

/// Unique identifier for a life seated on a world grid.
///
/// Ids are handed out in raster order at world construction and double as the
/// tie-break between events scheduled for the same simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LifeId(pub u32);

impl fmt::Display for LifeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "life#{}", self.0)
    }
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`; `None` when either coordinate overflows `i32`.
    pub fn add(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    pub fn step(&self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight compass directions around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// Immutable `(width, depth)` pair fixed when a grid is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub depth: usize,
}

impl Dimensions {
    /// Both sides must be strictly positive.
    pub fn new(width: usize, depth: usize) -> Result<Self> {
        if width == 0 || depth == 0 || i32::try_from(width).is_err() || i32::try_from(depth).is_err() {
            return Err(Error::InvalidDimensions {
                width: width as i64,
                depth: depth as i64,
            });
        }
        Ok(Self { width, depth })
    }

    /// Build from signed sides, rejecting zero and negative values.
    pub fn from_signed(width: i64, depth: i64) -> Result<Self> {
        match (usize::try_from(width), usize::try_from(depth)) {
            (Ok(w), Ok(d)) => Self::new(w, d),
            _ => Err(Error::InvalidDimensions { width, depth }),
        }
    }

    pub fn area(&self) -> usize {
        self.width * self.depth
    }

    /// A position is valid iff `0 <= x < width` and `0 <= y < depth`.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.depth
    }

    pub fn check(&self, pos: Position) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                x: pos.x,
                y: pos.y,
                width: self.width,
                depth: self.depth,
            })
        }
    }

    /// Row-major index of an in-range position
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        let x = (index % self.width) as i32;
        let y = (index / self.width) as i32;
        Position::new(x, y)
    }

    /// Iterator over all positions in raster (row-major) order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.area()).map(move |i| self.position_of(i))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.depth)
    }
}
