use crate::{
    terrain::{
        generate::{noise::NoiseGenerator, Generate},
        grid::ElevationGrid,
    },
    NoiseConfig,
};
use anyhow::ensure;

/// Fill every sample of the grid with fractal noise. The grid is mapped onto
/// `[0, scale)` on both axes, so `scale` controls how many noise cells span
/// the terrain regardless of its resolution.
#[derive(Debug)]
pub struct NoiseFill {
    noise: NoiseGenerator,
    config: NoiseConfig,
}

impl NoiseFill {
    pub fn new(noise: NoiseGenerator, config: NoiseConfig) -> Self {
        Self { noise, config }
    }
}

impl Generate for NoiseFill {
    fn generate(&self, grid: &mut ElevationGrid) -> anyhow::Result<()> {
        let width = grid.width() as f64;
        let height = grid.height() as f64;
        let NoiseConfig {
            scale,
            octaves,
            persistence,
        } = self.config;

        for point in grid.points().collect::<Vec<_>>() {
            let value = self.noise.sample_octaves(
                point.x as f64 / width * scale,
                point.z as f64 / height * scale,
                0.0,
                octaves,
                persistence,
            );
            ensure!(value.is_finite(), "noise at {} is {}", point, value);
            grid.set(point.x, point.z, value as f32);
        }
        Ok(())
    }
}
