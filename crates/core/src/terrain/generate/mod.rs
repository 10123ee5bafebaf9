mod elevation;
pub mod noise;
mod river;
mod smooth;

use crate::{
    terrain::{
        generate::{
            elevation::NoiseFill, noise::NoiseGenerator, river::RiverCarve,
            smooth::Smoothing,
        },
        grid::ElevationGrid,
    },
    timed, TerrainConfig,
};
use anyhow::Context;
use std::fmt::Debug;

/// Run the full elevation pipeline over a grid, in place. Any previous
/// contents of the grid are overwritten by the first stage.
pub(crate) fn generate_elevations(
    grid: &mut ElevationGrid,
    config: &TerrainConfig,
) -> anyhow::Result<()> {
    let noise = NoiseGenerator::new(config.seed.to_u64());

    // Run each generation step. The order is very important!
    apply_generator(grid, NoiseFill::new(noise, config.noise))?;
    apply_generator(
        grid,
        Smoothing {
            iterations: config.smoothing_iterations,
        },
    )?;
    if config.river.enabled {
        apply_generator(grid, RiverCarve::new(config.river))?;
    }
    Ok(())
}

/// A helper to run a generation step on a grid.
fn apply_generator(
    grid: &mut ElevationGrid,
    generator: impl Debug + Generate,
) -> anyhow::Result<()> {
    timed!(&format!("{:?}", generator), generator.generate(grid))
        .with_context(|| format!("error in {:?}", generator))
}

/// One stage of the elevation pipeline. Each stage takes the grid as the
/// previous stage left it and rewrites some or all of its samples. Stages
/// can never change the grid's dimensions.
///
/// An error from a stage means a bug in the stage, not bad input. Input is
/// validated before the pipeline starts.
trait Generate {
    fn generate(&self, grid: &mut ElevationGrid) -> anyhow::Result<()>;
}
