//! Bounded 2D grid used for every per-cell matrix in the world.

use cellclock_core::{Dimensions, Error, Position, Result};
use serde::Serialize;

/// A bounded, row-major 2D grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<T> {
    dimensions: Dimensions,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every position in raster order.
    pub fn from_fn(dimensions: Dimensions, mut f: impl FnMut(Position) -> T) -> Self {
        let cells = dimensions.positions().map(&mut f).collect();
        Self { dimensions, cells }
    }

    /// Build a grid from rows (`rows[y][x]`). Rows must be non-empty and equally long.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let depth = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let dimensions = Dimensions::new(width, depth)?;

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(Error::Validation(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }

        Ok(Self {
            dimensions,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    pub fn depth(&self) -> usize {
        self.dimensions.depth
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at a position, or `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.dimensions.index_of(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.dimensions.index_of(pos).map(move |i| &mut self.cells[i])
    }

    /// Overwrite the cell at a position
    pub fn set(&mut self, pos: Position, value: T) -> Result<()> {
        self.dimensions.check(pos)?;
        if let Some(cell) = self.get_mut(pos) {
            *cell = value;
        }
        Ok(())
    }

    /// Iterator over all cells with positions, in raster order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.dimensions.position_of(i), cell))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.cells.iter_mut()
    }

    /// Rows from top (`y = 0`) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.dimensions.width)
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            dimensions: self.dimensions,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn try_into_map<U, E>(self, f: impl FnMut(T) -> std::result::Result<U, E>) -> std::result::Result<Grid<U>, E> {
        Ok(Grid {
            dimensions: self.dimensions,
            cells: self.cells.into_iter().map(f).collect::<std::result::Result<_, _>>()?,
        })
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(dimensions: Dimensions, value: T) -> Self {
        Self {
            dimensions,
            cells: vec![value; dimensions.area()],
        }
    }
}

impl Grid<bool> {
    /// Number of `true` cells
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}
