use crate::util::lerp;
use derive_more::Display;

/// A position on the sample grid. `x` runs along the grid's width and `z`
/// along its height, matching the world-space X and Z axes.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
#[display(fmt = "({}, {})", x, z)]
pub struct GridPoint {
    pub x: usize,
    pub z: usize,
}

impl GridPoint {
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }
}

/// A dense `width × height` grid of elevation samples. Samples are stored
/// with X as the major axis, i.e. the sample at `(x, z)` lives at index
/// `x * height + z`. Mesh vertices use the same ordering, so a sample's index
/// is also its vertex index.
///
/// The length of the sample buffer is always exactly `width * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl ElevationGrid {
    /// Create a flat grid at elevation 0. Dimensions must already be
    /// validated by the caller.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 2 && height >= 2, "grid must be at least 2x2");
        Self {
            width,
            height,
            samples: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    /// Flat index of a grid point in the sample buffer
    pub fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(
            x < self.width && z < self.height,
            "{} out of bounds for {}x{} grid",
            GridPoint::new(x, z),
            self.width,
            self.height
        );
        x * self.height + z
    }

    /// Get the elevation at a grid point. Panics if the point is out of
    /// bounds.
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.samples[self.index(x, z)]
    }

    /// Set the elevation at a grid point. Panics if the point is out of
    /// bounds.
    pub fn set(&mut self, x: usize, z: usize, elevation: f32) {
        let index = self.index(x, z);
        self.samples[index] = elevation;
    }

    /// Get the elevation at a signed grid position, replicating edge samples
    /// for anything outside the grid. Never reads out of bounds.
    pub fn get_clamped(&self, x: isize, z: isize) -> f32 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let z = z.clamp(0, self.height as isize - 1) as usize;
        self.get(x, z)
    }

    /// Bilinearly interpolate the four samples surrounding a fractional grid
    /// position. Returns `None` outside `[0, width-1) × [0, height-1)`.
    ///
    /// When both fractional offsets are zero the result is exactly the
    /// sample at that grid point.
    pub fn sample_bilinear(&self, grid_x: f32, grid_z: f32) -> Option<f32> {
        let max_x = (self.width - 1) as f32;
        let max_z = (self.height - 1) as f32;
        // The negated form also rejects NaN
        if !(grid_x >= 0.0 && grid_x < max_x && grid_z >= 0.0 && grid_z < max_z)
        {
            return None;
        }

        let x0 = grid_x.floor() as usize;
        let z0 = grid_z.floor() as usize;
        let tx = grid_x - x0 as f32;
        let tz = grid_z - z0 as f32;

        let top = lerp(self.get(x0, z0), self.get(x0 + 1, z0), tx);
        let bottom = lerp(self.get(x0, z0 + 1), self.get(x0 + 1, z0 + 1), tx);
        Some(lerp(top, bottom, tz))
    }

    /// All samples, in storage order
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Swap in a complete new sample buffer. Used by stages that compute into
    /// a separate buffer so they never read values they have already written.
    pub(crate) fn replace_samples(&mut self, samples: Vec<f32>) {
        assert_eq!(
            samples.len(),
            self.samples.len(),
            "replacement buffer must match grid size"
        );
        self.samples = samples;
    }

    /// Iterate over every grid point in storage order
    pub fn points(&self) -> impl Iterator<Item = GridPoint> {
        let height = self.height;
        (0..self.width)
            .flat_map(move |x| (0..height).map(move |z| GridPoint::new(x, z)))
    }
}
