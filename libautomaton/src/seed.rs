use std::str::FromStr;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    error::{AutomatonError, AutomatonResult},
    grid::Cell,
};

/// Where a seed shorter than the grid goes on row 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Placement {
    Left,
    Right,
    #[default]
    Center,
}

impl Placement {
    /// First column of a seed of `seed_len` cells in a row of `width` cells.
    pub fn offset(self, width: usize, seed_len: usize) -> usize {
        let max_offset = width.saturating_sub(seed_len);

        let offset = match self {
            Placement::Left => 0,
            Placement::Right => max_offset,
            Placement::Center => (width / 2).saturating_sub(seed_len / 2),
        };

        offset.min(max_offset)
    }
}

/// The initial generation, laid out on row 0 of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    cells: Vec<Cell>,
    placement: Placement,
}

impl Seed {
    pub fn new(cells: Vec<Cell>, placement: Placement) -> AutomatonResult<Self> {
        if cells.is_empty() {
            return Err(AutomatonError::InvalidArgument(
                "seed must have at least one cell".to_owned(),
            ));
        }

        Ok(Self { cells, placement })
    }

    /// One alive cell.
    pub fn single(placement: Placement) -> Self {
        Self {
            cells: vec![Cell::Alive],
            placement,
        }
    }

    /// `length` alive cells in a row.
    pub fn run(length: usize, placement: Placement) -> AutomatonResult<Self> {
        Self::new(vec![Cell::Alive; length], placement)
    }

    /// An explicit pattern, '0' for dead cells and any other character for alive ones.
    /// Explicit patterns always start at column 0.
    pub fn from_pattern(pattern: &str) -> AutomatonResult<Self> {
        let cells = pattern.chars().map(Cell::from_seed_char).collect_vec();

        Self::new(cells, Placement::Left).map_err(|_| {
            AutomatonError::InvalidArgument("seed pattern must not be empty".to_owned())
        })
    }

    /// A full row of `width` cells with `alive_cells` of them alive at random.
    pub fn random(width: usize, alive_cells: usize) -> AutomatonResult<Self> {
        Self::random_with(width, alive_cells, &mut rand::rng())
    }

    pub fn random_with<R>(width: usize, alive_cells: usize, rng: &mut R) -> AutomatonResult<Self>
    where
        R: Rng,
    {
        if alive_cells > width {
            return Err(AutomatonError::InvalidArgument(format!(
                "can't place {alive_cells} alive cells in a row of {width}"
            )));
        }

        let mut cells = vec![Cell::Dead; width];
        let mut available_columns = (0..width).collect_vec();

        for _ in 0..alive_cells {
            let chosen_index = rng.random_range(0..available_columns.len());
            let chosen_column = available_columns.swap_remove(chosen_index);
            cells[chosen_column] = Cell::Alive;
        }

        Self::new(cells, Placement::Left)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn offset(&self, width: usize) -> usize {
        self.placement.offset(width, self.len())
    }
}

impl FromStr for Seed {
    type Err = AutomatonError;

    fn from_str(s: &str) -> AutomatonResult<Self> {
        Self::from_pattern(s)
    }
}
