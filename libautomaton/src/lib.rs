use log::{debug, trace};

use grid::{Cell, Grid};
use rule::RuleTable;

pub mod error;
pub mod grid;
pub mod rule;
pub mod seed;

pub use error::{AutomatonError, AutomatonResult};

/// Fills rows `1..generation_count` of the grid, each from the row above it.
///
/// `generation_count` counts the seed row and is capped to the grid height.
/// Rows past it are left untouched.
pub fn evolve(grid: &mut Grid, table: &RuleTable, generation_count: usize) {
    let generation_count = generation_count.min(grid.height());

    for row in 1..generation_count {
        let (previous, current) = grid.previous_and_row_mut(row);
        compute_row_into(previous, current, table);
        trace!("Computed generation {row}");
    }

    debug!(
        "Evolved {} generations of {}",
        generation_count.saturating_sub(1),
        table.rule()
    );
}

pub fn compute_row(previous: &[Cell], table: &RuleTable) -> Vec<Cell> {
    let mut next = vec![Cell::Dead; previous.len()];
    compute_row_into(previous, &mut next, table);
    next
}

/// Like [`compute_row`], writing into `next`, which must be as long as `previous`.
pub(crate) fn compute_row_into(previous: &[Cell], next: &mut [Cell], table: &RuleTable) {
    debug_assert_eq!(previous.len(), next.len());

    for (column, cell) in next.iter_mut().enumerate() {
        let [north_west, north, north_east] = neighborhood(previous, column);
        *cell = table.apply(north_west, north, north_east);
    }
}

/// The cells above and beside `column`, wrapping around the row edges.
pub fn neighborhood(row: &[Cell], column: usize) -> [Cell; 3] {
    let width = row.len();

    let west = (column + width - 1) % width;
    let east = (column + 1) % width;

    [row[west], row[column], row[east]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::Cell::{Alive as A, Dead as D},
        rule::Rule,
        seed::{Placement, Seed},
    };

    fn rule_30() -> RuleTable {
        RuleTable::compile(Rule::RULE_30)
    }

    #[test]
    fn test_wraparound_neighborhood() {
        let row = [A, D, D, D, A];

        assert_eq!(neighborhood(&row, 0), [A, A, D]);
        assert_eq!(neighborhood(&row, 4), [D, A, A]);
        assert_eq!(neighborhood(&row, 2), [D, D, D]);
    }

    #[test]
    fn test_single_cell_is_its_own_neighbor() {
        assert_eq!(neighborhood(&[A], 0), [A, A, A]);
        assert_eq!(neighborhood(&[D], 0), [D, D, D]);

        // Rule 30 kills (A, A, A) and keeps (D, D, D) dead.
        assert_eq!(compute_row(&[A], &rule_30()), vec![D]);
        assert_eq!(compute_row(&[D], &rule_30()), vec![D]);
    }

    #[test]
    fn test_wraparound_row() {
        // Column 0 sees (A, A, D) = pattern 6 and column 4 sees (D, A, A) = pattern 3.
        let next = compute_row(&[A, D, D, D, A], &rule_30());
        assert_eq!(next, vec![D, A, D, A, A]);
    }

    #[test]
    fn test_computed_row_keeps_width() {
        for width in 1..=9 {
            let previous = vec![A; width];
            assert_eq!(compute_row(&previous, &rule_30()).len(), width);
        }
    }

    #[test]
    fn test_rule_30_from_single_cell() {
        let seed: Seed = "00100".parse().unwrap();
        let mut grid = Grid::new(5, 3, &seed).unwrap();

        evolve(&mut grid, &rule_30(), 3);

        assert_eq!(grid.row(0).unwrap(), &[D, D, A, D, D]);
        assert_eq!(grid.row(1).unwrap(), &[D, A, A, A, D]);
        assert_eq!(grid.row(2).unwrap(), &[A, A, D, D, A]);
    }

    #[test]
    fn test_rule_90_sierpinski() {
        let seed = Seed::single(Placement::Center);
        let mut grid = Grid::new(9, 5, &seed).unwrap();

        evolve(&mut grid, &RuleTable::compile(Rule::RULE_90), 5);

        assert_eq!(
            grid.to_string(),
            "....#....\n...#.#...\n..#...#..\n.#.#.#.#.\n#.......#"
        );
    }

    #[test]
    fn test_generation_count_leaves_rows_dead() {
        let seed = Seed::single(Placement::Center);
        let mut grid = Grid::new(11, 6, &seed).unwrap();

        evolve(&mut grid, &rule_30(), 3);

        assert!(grid.row(2).unwrap().contains(&A));
        for row in 3..6 {
            assert!(grid.row(row).unwrap().iter().all(|cell| *cell == D));
        }
    }

    #[test]
    fn test_generation_count_is_capped() {
        let seed = Seed::single(Placement::Center);
        let mut capped = Grid::new(11, 4, &seed).unwrap();
        let mut exact = capped.clone();

        evolve(&mut capped, &rule_30(), 100);
        evolve(&mut exact, &rule_30(), 4);

        assert_eq!(capped, exact);
    }

    #[test]
    fn test_seed_row_is_never_recomputed() {
        let seed: Seed = "1111111".parse().unwrap();
        let mut grid = Grid::new(7, 3, &seed).unwrap();

        evolve(&mut grid, &rule_30(), 3);

        assert_eq!(grid.row(0).unwrap(), &[A; 7]);
        assert_eq!(grid.row(1).unwrap(), &[D; 7]);
    }
}
