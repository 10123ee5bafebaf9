pub mod generate;
pub mod grid;
pub mod mesh;

use crate::{
    terrain::{
        grid::{ElevationGrid, GridPoint},
        mesh::TerrainMesh,
    },
    timed,
    util::range::NumRange,
    NoiseConfig, Seed, TerrainConfig,
};
use anyhow::{anyhow, Context};
use log::{debug, info};
use validator::Validate;

/// A rectangular grid of elevation samples, plus the mesh generated from it.
///
/// A height field is created with fixed dimensions (see [HeightField::new])
/// and starts out flat. [HeightField::generate] runs the generation pipeline
/// over it:
///
/// 1. Fill with fractal gradient noise
/// 2. Smooth (box blur, configurable number of passes)
/// 3. Carve a meandering river channel
/// 4. Rebuild the mesh
///
/// The mesh is never independent state. It's a projection of the current
/// elevations, and anything that changes elevations throws it away until
/// [HeightField::generate_mesh] is called again.
///
/// ## Coordinates
/// Grid point `(x, z)` sits at world position
/// `(x * horizontal_scale, elevation * vertical_scale, z * horizontal_scale)`.
/// [HeightField::height_at] uses the exact same mapping, so height queries
/// always agree with the rendered geometry.
#[derive(Clone, Debug)]
pub struct HeightField {
    /// The config this field was built with. Seed and noise params are
    /// updated on every call to [HeightField::generate], so this always
    /// describes the current elevations.
    config: TerrainConfig,
    grid: ElevationGrid,
    mesh: Option<TerrainMesh>,
}

impl HeightField {
    /// Create a flat height field with the given config. Returns an error if
    /// the config is invalid, e.g. if either dimension is less than 2. The
    /// sample buffer isn't allocated until validation passes.
    pub fn new(config: TerrainConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid terrain config")?;
        let grid = ElevationGrid::new(config.width, config.height);
        Ok(Self {
            config,
            grid,
            mesh: None,
        })
    }

    /// Create a height field and run the generation pipeline on it, using
    /// the seed and noise params from the config. This could take a while for
    /// large grids.
    pub fn from_config(config: TerrainConfig) -> anyhow::Result<Self> {
        info!("Generating terrain with config {:#?}", config);
        let seed = config.seed.clone();
        let noise = config.noise;
        let mut field = Self::new(config)?;
        field.generate(seed, noise)?;
        Ok(field)
    }

    /// Regenerate every elevation from scratch using the given seed and noise
    /// params, then rebuild the mesh. Smoothing and river params come from
    /// this field's config. Output is fully deterministic: the same seed and
    /// params always produce bit-identical elevations and meshes.
    pub fn generate(
        &mut self,
        seed: impl Into<Seed>,
        noise: NoiseConfig,
    ) -> anyhow::Result<()> {
        noise.validate().context("invalid noise config")?;
        self.config.seed = seed.into();
        self.config.noise = noise;
        self.mesh = None;

        info!(
            "Generating {}x{} height field with seed {}",
            self.width(),
            self.height(),
            self.config.seed
        );
        timed!(
            "Height field generation",
            log::Level::Info,
            generate::generate_elevations(&mut self.grid, &self.config)
        )?;
        self.generate_mesh();
        Ok(())
    }

    /// (Re)build the mesh from the current elevations, and return it.
    pub fn generate_mesh(&mut self) -> &TerrainMesh {
        let mesh = timed!(
            "Mesh generation",
            TerrainMesh::build(
                &self.grid,
                self.config.horizontal_scale,
                self.config.vertical_scale
            )
        );
        debug!(
            "Built mesh with {} vertices and {} triangles",
            mesh.vertices().len(),
            mesh.triangle_count()
        );
        self.mesh.insert(mesh)
    }

    /// The current mesh, or `None` if the elevations have changed since it
    /// was last built.
    pub fn mesh(&self) -> Option<&TerrainMesh> {
        self.mesh.as_ref()
    }

    /// Get the current mesh, or an error if it needs to be rebuilt. Useful
    /// for consumers that only have shared access to the field.
    pub fn require_mesh(&self) -> anyhow::Result<&TerrainMesh> {
        self.mesh
            .as_ref()
            .ok_or_else(|| anyhow!("mesh is stale, call generate_mesh first"))
    }

    /// Get the world-space height of the terrain surface at a world-space X/Z
    /// position, by bilinear interpolation between the four surrounding grid
    /// samples. Positions outside the grid return 0. This never fails, so it
    /// can be called freely from gameplay/physics code.
    ///
    /// The queryable domain is `[0, (W-1) * horizontal_scale)` on X and
    /// `[0, (H-1) * horizontal_scale)` on Z. The far edges themselves are
    /// outside it.
    pub fn height_at(&self, world_x: f32, world_z: f32) -> f32 {
        let scale = self.config.horizontal_scale;
        self.grid
            .sample_bilinear(
                world_to_grid(world_x, scale),
                world_to_grid(world_z, scale),
            )
            .map(|elevation| elevation * self.config.vertical_scale)
            .unwrap_or(0.0)
    }

    /// Get the raw (unscaled) elevation at a grid point. Returns `None` if the
    /// point is outside the grid.
    pub fn elevation(&self, x: usize, z: usize) -> Option<f32> {
        self.contains(x, z).then(|| self.grid.get(x, z))
    }

    /// Overwrite the raw elevation at a grid point. This invalidates the
    /// mesh. Returns an error if the point is outside the grid.
    pub fn set_elevation(
        &mut self,
        x: usize,
        z: usize,
        elevation: f32,
    ) -> anyhow::Result<()> {
        if !self.contains(x, z) {
            return Err(anyhow!(
                "{} is outside {}x{} height field",
                GridPoint::new(x, z),
                self.width(),
                self.height()
            ));
        }
        self.grid.set(x, z, elevation);
        self.mesh = None;
        Ok(())
    }

    /// Unit surface normal at a grid point, the same one the mesh uses for
    /// the corresponding vertex. Returns `None` outside the grid.
    pub fn normal_at(&self, x: usize, z: usize) -> Option<[f32; 3]> {
        self.contains(x, z)
            .then(|| mesh::surface_normal(&self.grid, x, z).into())
    }

    /// Lowest and highest raw elevations in the field
    pub fn elevation_range(&self) -> NumRange {
        // The grid is always at least 2x2, so this can't be empty
        NumRange::of_values(self.elevations().iter().copied())
            .unwrap_or(NumRange::new(0.0, 0.0))
    }

    fn contains(&self, x: usize, z: usize) -> bool {
        x < self.width() && z < self.height()
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn grid(&self) -> &ElevationGrid {
        &self.grid
    }

    /// All raw elevations, in grid storage order (see [ElevationGrid])
    pub fn elevations(&self) -> &[f32] {
        self.grid.samples()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn horizontal_scale(&self) -> f32 {
        self.config.horizontal_scale
    }

    pub fn vertical_scale(&self) -> f32 {
        self.config.vertical_scale
    }
}

/// Convert a world-space coordinate on the X or Z axis to a fractional grid
/// coordinate. `x * scale / scale` isn't always `x` in floating point, so a
/// coordinate that lands exactly on a vertex position (`i * scale`) snaps to
/// `i`. That keeps the interpolation fraction at exactly 0 there.
fn world_to_grid(world: f32, scale: f32) -> f32 {
    let grid = world / scale;
    let nearest = grid.round();
    if nearest * scale == world {
        nearest
    } else {
        grid
    }
}
