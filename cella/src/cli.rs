use std::path::PathBuf;

use clap::Parser;
use libautomaton::{rule::Rule, seed::Placement};

use crate::config::RunConfig;

/// Renders an elementary cellular automaton into a grayscale bitmap, one generation per row.
#[derive(Debug, Parser)]
#[command(name = "cella", version)]
pub struct Args {
    /// Output bitmap path. Defaults to output_HHMMSS.bmp in the working directory.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Explicit seed row, '0' for dead cells and anything else for alive ones.
    #[arg(short, long, value_name = "PATTERN")]
    pub seed: Option<String>,

    /// Where the generated seed goes on the first row: left, right or center.
    #[arg(short, long, value_name = "PLACEMENT")]
    pub placement: Option<Placement>,

    /// Number of alive cells in the generated seed.
    #[arg(short = 'l', long, value_name = "CELLS")]
    pub seed_length: Option<usize>,

    /// Seed the first row with this many alive cells at random positions.
    #[arg(long = "random", value_name = "ALIVE", conflicts_with = "seed")]
    pub random_alive: Option<usize>,

    /// Generations to compute after the seed row.
    #[arg(short, long, value_name = "COUNT")]
    pub iterations: Option<usize>,

    /// Rule number, 0 to 255.
    #[arg(short, long, value_name = "RULE")]
    pub rule: Option<Rule>,

    /// Grid width in cells.
    #[arg(short = 'W', long, value_name = "CELLS")]
    pub width: Option<usize>,

    /// Grid height in cells.
    #[arg(short = 'H', long, value_name = "CELLS")]
    pub height: Option<usize>,

    /// JSON run configuration, flags given on the command line take precedence.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Splits off the config file path from the settings given as flags.
    pub fn into_parts(self) -> (Option<PathBuf>, RunConfig) {
        let overrides = RunConfig {
            width: self.width,
            height: self.height,
            rule: self.rule,
            seed: self.seed,
            placement: self.placement,
            seed_length: self.seed_length,
            random_alive: self.random_alive,
            iterations: self.iterations,
            output: self.output,
        };

        (self.config, overrides)
    }
}
