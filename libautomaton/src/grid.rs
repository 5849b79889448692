use std::fmt;

use itertools::Itertools;
use libbitmap::IndexedImage;
use log::debug;

use crate::{
    error::{AutomatonError, AutomatonResult},
    seed::Seed,
};

/// The full history of an automaton, one generation per row, row 0 being the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an all dead grid and lays `seed` out on row 0.
    pub fn new(width: usize, height: usize, seed: &Seed) -> AutomatonResult<Self> {
        if seed.len() > width {
            return Err(AutomatonError::InvalidArgument(format!(
                "seed is {} cells long but the grid is only {width} wide",
                seed.len()
            )));
        }

        let mut grid = Self::blank(width, height)?;

        let offset = seed.offset(width);
        grid.cells[offset..offset + seed.len()].copy_from_slice(seed.cells());

        debug!(
            "Allocated {width}x{height} grid, seed of {} cells at column {offset}",
            seed.len()
        );

        Ok(grid)
    }

    pub fn blank(width: usize, height: usize) -> AutomatonResult<Self> {
        if width == 0 || height == 0 {
            return Err(AutomatonError::InvalidArgument(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }

        let len = width.checked_mul(height).ok_or_else(|| {
            AutomatonError::InvalidArgument(format!("grid of {width}x{height} is too large"))
        })?;

        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        let index = self.pos_to_index(row, column)?;
        self.cells.get(index).copied()
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        let index = self.pos_to_index(row, column)?;
        self.cells.get_mut(index)
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height {
            return None;
        }

        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn count_cells(&self, state: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// The raw cell bytes, row after row.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Row `row - 1` for reading next to row `row` for writing.
    ///
    /// # Panics
    ///
    /// If `row` is 0 or not below the height.
    pub(crate) fn previous_and_row_mut(&mut self, row: usize) -> (&[Cell], &mut [Cell]) {
        assert!(row >= 1 && row < self.height, "row {row} has no previous row");

        let (before, after) = self.cells.split_at_mut(row * self.width);
        let previous = &before[(row - 1) * self.width..];
        let current = &mut after[..self.width];

        (previous, current)
    }

    fn pos_to_index(&self, row: usize, column: usize) -> Option<usize> {
        if column >= self.width {
            return None;
        }

        if row >= self.height {
            return None;
        }

        Some(column + (row * self.width))
    }
}

impl IndexedImage for Grid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.as_bytes()[start..start + self.width]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .rows()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .join("\n");

        f.write_str(&text)
    }
}

/// A cell state, stored as the grayscale byte it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::NoUninit)]
#[repr(u8)]
pub enum Cell {
    /// Black.
    Alive = 0,

    /// White.
    #[default]
    Dead = 255,
}

impl Cell {
    /// Anything but the dead byte counts as alive.
    pub fn from_byte(byte: u8) -> Self {
        if byte == Cell::Dead as u8 {
            Cell::Dead
        } else {
            Cell::Alive
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Parses a seed character: '0' is dead, anything else alive.
    pub fn from_seed_char(c: char) -> Self {
        if c == '0' { Cell::Dead } else { Cell::Alive }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Alive => '#',
            Cell::Dead => '.',
        }
    }
}
