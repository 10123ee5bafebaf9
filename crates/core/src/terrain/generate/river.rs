use crate::{
    terrain::{generate::Generate, grid::ElevationGrid},
    RiverConfig,
};
use std::f32::consts::PI;

/// Carve a single meandering river channel along the X axis. The centerline
/// for column `x` sits at row
///
/// `H/2 + amplitude * sin(2π * cycles * x / W)`
///
/// and every sample closer than `width` rows to it is lowered by
/// `depth * (1 - distance/width)²`. That gives a smooth bowl-shaped cross
/// section: full depth at the centerline, nothing at the banks.
#[derive(Debug)]
pub struct RiverCarve {
    config: RiverConfig,
}

impl RiverCarve {
    pub fn new(config: RiverConfig) -> Self {
        Self { config }
    }

    /// Row of the channel centerline for a column
    fn center_row(&self, x: usize, width: usize, height: usize) -> f32 {
        let phase = 2.0 * PI * self.config.meander_cycles * x as f32
            / width as f32;
        height as f32 / 2.0 + self.config.meander_amplitude * phase.sin()
    }

    /// How much to lower a sample that is `distance` rows from the
    /// centerline
    fn cut(&self, distance: f32) -> f32 {
        let RiverConfig { width, depth, .. } = self.config;
        if distance < width {
            let influence = 1.0 - distance / width;
            depth * influence * influence
        } else {
            0.0
        }
    }
}

impl Generate for RiverCarve {
    fn generate(&self, grid: &mut ElevationGrid) -> anyhow::Result<()> {
        let width = grid.width();
        let height = grid.height();
        // Each sample only depends on its own position, so in-place is safe
        for x in 0..width {
            let center = self.center_row(x, width, height);
            for z in 0..height {
                let cut = self.cut((z as f32 - center).abs());
                if cut > 0.0 {
                    let index = grid.index(x, z);
                    grid.samples_mut()[index] -= cut;
                }
            }
        }
        Ok(())
    }
}
