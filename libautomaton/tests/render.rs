use std::{env, fs, process};

use libautomaton::{
    evolve,
    grid::Grid,
    rule::{Rule, RuleTable, compile_rule},
    seed::{Placement, Seed},
};
use libbitmap::{header::PIXEL_DATA_OFFSET, padded_width, save_bitmap, write_bitmap};

const PIXEL_DATA_START: usize = PIXEL_DATA_OFFSET as usize;

fn rule_30_grid(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height, &Seed::single(Placement::Center)).unwrap();
    evolve(&mut grid, &compile_rule(Rule::RULE_30), height);
    grid
}

#[test]
fn rule_30_bitmap_pixels() {
    let seed: Seed = "00100".parse().unwrap();
    let mut grid = Grid::new(5, 3, &seed).unwrap();
    evolve(&mut grid, &RuleTable::compile(Rule::RULE_30), 3);

    let mut out = Vec::new();
    write_bitmap(&mut out, &grid).unwrap();

    assert_eq!(out.len(), PIXEL_DATA_START + 8 * 3);

    #[rustfmt::skip]
    let expected: [u8; 24] = [
        0,   0,   255, 255, 0,   255, 255, 255, // row 2
        255, 0,   0,   0,   255, 255, 255, 255, // row 1
        255, 255, 0,   255, 255, 255, 255, 255, // row 0
    ];
    assert_eq!(&out[PIXEL_DATA_START..], &expected);
}

#[test]
fn evolution_is_deterministic() {
    let first = rule_30_grid(64, 32);
    let second = rule_30_grid(64, 32);

    assert_eq!(first, second);

    let mut first_bytes = Vec::new();
    let mut second_bytes = Vec::new();
    write_bitmap(&mut first_bytes, &first).unwrap();
    write_bitmap(&mut second_bytes, &second).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn saved_grid_has_exact_length() {
    let grid = rule_30_grid(10, 6);
    let path = env::temp_dir().join(format!("libautomaton_{}_render.bmp", process::id()));

    save_bitmap(&path, &grid).unwrap();

    let bytes = fs::read(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(padded_width(10), 12);
    assert_eq!(bytes.len(), PIXEL_DATA_START + 12 * 6);

    // The bottom row goes first.
    let bottom_left = grid.cell(5, 0).unwrap().as_byte();
    assert_eq!(bytes[PIXEL_DATA_START], bottom_left);
}
