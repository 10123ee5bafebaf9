mod seed;

pub use crate::config::seed::Seed;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a terrain. Two terrains generated with the same
/// config will always be identical, down to the bit.
///
/// This is the only way parameters get into the generation pipeline. There is
/// no global state, so a single process can generate any number of terrains
/// with different configs side by side.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TerrainConfig {
    /// RNG seed used to shuffle the noise permutation table. See [Seed] for
    /// the accepted input formats.
    pub seed: Seed,

    /// Number of grid samples along the X axis.
    #[validate(range(min = 2, max = 8192))]
    pub width: usize,

    /// Number of grid samples along the Z axis.
    #[validate(range(min = 2, max = 8192))]
    pub height: usize,

    /// World-space distance between two adjacent grid samples, on both the X
    /// and Z axes.
    #[validate(range(min = 0.0001))]
    pub horizontal_scale: f32,

    /// Multiplier applied to raw elevations to get world-space Y values.
    /// Applies to both mesh vertices and height queries, so the two always
    /// agree.
    #[validate(range(min = 0.0001))]
    pub vertical_scale: f32,

    /// Number of box-blur passes applied after the noise fill. Each pass
    /// averages every sample with its (up to) 8 neighbors.
    #[validate(range(max = 64))]
    pub smoothing_iterations: usize,

    /// Config for the fractal noise that seeds the elevations
    #[validate]
    pub noise: NoiseConfig,

    /// Config for the river channel carved into the terrain
    #[validate]
    pub river: RiverConfig,
}

/// Config for fractal gradient noise. Each octave doubles the frequency of
/// the previous one and scales its amplitude by `persistence`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NoiseConfig {
    /// How many noise cells span the full width (or height) of the grid. The
    /// grid is mapped onto `[0, scale)` on each axis before sampling.
    #[validate(range(min = 0.0))]
    pub scale: f64,

    /// Number of octaves to sum together. More octaves means more fine
    /// detail, at a linear cost in generation time.
    #[validate(range(min = 1, max = 16))]
    pub octaves: usize,

    /// Amplitude decay per octave. With 3 octaves and a persistence of 0.5,
    /// the amplitudes are `[1.0, 0.5, 0.25]`.
    ///
    /// Useful values are strictly between 0 and 1, but both endpoints are
    /// accepted. 0 keeps only the first octave, and 1 weights every octave
    /// equally. Either way the output stays in `[-1, 1]`, since the sum is
    /// normalized by the total amplitude.
    #[validate(range(min = 0.0, max = 1.0))]
    pub persistence: f64,
}

/// Config for the river carve stage. The river is a single meandering
/// channel running along the X axis, following a sine wave around the middle
/// row of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RiverConfig {
    /// Disable to skip the carve stage entirely
    pub enabled: bool,

    /// Half-width of the channel, in grid rows. Rows at least this far from
    /// the centerline are untouched.
    #[validate(range(min = 0.0))]
    pub width: f32,

    /// Elevation removed at the centerline. The cut falls off quadratically
    /// towards the banks.
    #[validate(range(min = 0.0))]
    pub depth: f32,

    /// Maximum distance (in grid rows) of the centerline from the middle row
    pub meander_amplitude: f32,

    /// Number of full sine periods the centerline completes across the grid
    #[validate(range(min = 0.0))]
    pub meander_cycles: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            // Danger! This means the default will vary between calls!
            seed: Seed::Int(rand::random()),

            width: 128,
            height: 128,
            horizontal_scale: 1.0,
            vertical_scale: 1.0,
            smoothing_iterations: 3,
            noise: NoiseConfig::default(),
            river: RiverConfig::default(),
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            octaves: 3,
            persistence: 0.5,
        }
    }
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 6.0,
            depth: 0.3,
            meander_amplitude: 8.0,
            // 1.5 cycles => sin(3π·x/W)
            meander_cycles: 1.5,
        }
    }
}
