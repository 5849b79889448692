use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use libautomaton::{
    rule::Rule,
    seed::{Placement, Seed},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 100;

/// Run settings as they come from a config file or the command line, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub rule: Option<Rule>,

    /// Explicit seed pattern, overrides placement, seed_length and random_alive.
    pub seed: Option<String>,

    pub placement: Option<Placement>,

    /// Length of the generated run of alive cells.
    pub seed_length: Option<usize>,

    /// Seed row with this many alive cells at random positions.
    pub random_alive: Option<usize>,

    /// Generations to compute after the seed row.
    pub iterations: Option<usize>,

    pub output: Option<PathBuf>,
}

impl RunConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    /// Fields set in `overrides` win over the ones in `self`.
    pub fn merge(self, overrides: RunConfig) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            rule: overrides.rule.or(self.rule),
            seed: overrides.seed.or(self.seed),
            placement: overrides.placement.or(self.placement),
            seed_length: overrides.seed_length.or(self.seed_length),
            random_alive: overrides.random_alive.or(self.random_alive),
            iterations: overrides.iterations.or(self.iterations),
            output: overrides.output.or(self.output),
        }
    }

    /// Fills in the defaults and checks that the settings fit together.
    /// `default_output` is only called when no output path was given.
    pub fn resolve<F>(self, default_output: F) -> anyhow::Result<Run>
    where
        F: FnOnce() -> PathBuf,
    {
        let pattern = self
            .seed
            .as_deref()
            .map(Seed::from_pattern)
            .transpose()
            .context("Invalid seed pattern")?;

        let width = self
            .width
            .or(pattern.as_ref().map(Seed::len))
            .unwrap_or(DEFAULT_WIDTH);

        let height = match (self.height, self.iterations) {
            (Some(height), _) => height,
            (None, Some(iterations)) => iterations
                .checked_add(1)
                .context("Too many iterations")?,
            (None, None) => DEFAULT_HEIGHT,
        };

        let generations = match self.iterations {
            Some(iterations) if iterations >= height => {
                bail!("{iterations} iterations don't fit in a grid {height} rows high")
            }
            Some(iterations) => iterations + 1,
            None => height,
        };

        let seed = match (pattern, self.random_alive) {
            (Some(pattern), _) => pattern,
            (None, Some(alive_cells)) => {
                Seed::random(width, alive_cells).context("Invalid random seed")?
            }
            (None, None) => {
                let placement = self.placement.unwrap_or_default();
                Seed::run(self.seed_length.unwrap_or(1), placement)
                    .context("Invalid seed length")?
            }
        };

        Ok(Run {
            width,
            height,
            rule: self.rule.unwrap_or_default(),
            seed,
            generations,
            output: self.output.unwrap_or_else(default_output),
        })
    }
}

/// Fully resolved settings of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub width: usize,
    pub height: usize,
    pub rule: Rule,
    pub seed: Seed,

    /// Rows to fill, seed row included.
    pub generations: usize,

    pub output: PathBuf,
}
