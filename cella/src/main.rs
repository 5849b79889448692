use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use libautomaton::{
    evolve,
    grid::{Cell, Grid},
    rule::compile_rule,
};
use libbitmap::{BitmapError, Section, save_bitmap};
use log::{info, warn};

use cli::Args;
use config::{Run, RunConfig};

mod cli;
mod config;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config_path, overrides) = Args::parse().into_parts();

    let config = if let Some(config_path) = config_path {
        RunConfig::load(&config_path)
            .with_context(|| format!("Couldn't load config {}", config_path.display()))?
    } else {
        RunConfig::default()
    };

    let run = config.merge(overrides).resolve(default_output_path)?;

    render(&run)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "output_{}.bmp",
        chrono::Local::now().format("%H%M%S")
    ))
}

fn render(run: &Run) -> anyhow::Result<()> {
    let started = Instant::now();

    let table = compile_rule(run.rule);
    info!("Compiled {}", run.rule);

    let mut grid =
        Grid::new(run.width, run.height, &run.seed).context("Couldn't allocate the grid")?;
    info!(
        "Allocated {}x{} grid, seeded with {} cells ({})",
        run.width,
        run.height,
        run.seed.len(),
        run.seed.placement()
    );

    evolve(&mut grid, &table, run.generations);
    info!("Computed {} generations", run.generations - 1);

    if let Err(e) = save_bitmap(&run.output, &grid) {
        remove_truncated_output(&run.output, &e);
        return Err(e).with_context(|| format!("Couldn't write {}", run.output.display()));
    }

    println!(
        "{} {} {}x{} -> {} | {} alive | {:.2?}",
        "done".green(),
        run.rule.to_string().bold(),
        run.width,
        run.height,
        run.output.display().to_string().cyan(),
        grid.count_cells(Cell::Alive),
        started.elapsed(),
    );

    Ok(())
}

/// Deletes what a failed save left at `path`. Returns whether a file was removed.
fn remove_truncated_output(path: &Path, error: &BitmapError) -> bool {
    let BitmapError::Io { section, .. } = error else {
        return false;
    };

    if *section == Section::Create {
        return false;
    }

    warn!("Removing truncated output {}", path.display());
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Couldn't remove truncated output {}: {e}", path.display());
            false
        }
    }
}
