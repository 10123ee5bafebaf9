//! Relief is a procedural terrain generation engine. It synthesizes a height
//! field from coherent noise, smooths it, carves a river through it, and
//! triangulates it into a mesh with normals and texture coordinates. The mesh
//! can be handed straight to a renderer, queried for heights, or exported to
//! interchange formats.
//!
//! ```
//! use relief::{HeightField, Seed, TerrainConfig};
//!
//! let config = TerrainConfig {
//!     seed: Seed::Int(42),
//!     width: 64,
//!     height: 64,
//!     ..Default::default()
//! };
//! let field = HeightField::from_config(config).unwrap();
//! let mesh = field.mesh().unwrap();
//! assert_eq!(mesh.vertices().len(), 64 * 64);
//! println!("{}", field.height_at(10.5, 20.25));
//! ```
//!
//! See [TerrainConfig] for details on how generation can be customized.
//!
//! Rendering, GPU upload, and physics are all left to the caller. Everything
//! here is synchronous and single-threaded; if generation is too slow for
//! your frame budget, run it on a background thread and hand over the
//! finished [HeightField].

mod config;
pub mod export;
pub mod render;
mod terrain;
mod util;

pub use crate::{
    config::{NoiseConfig, RiverConfig, Seed, TerrainConfig},
    export::ExportFormat,
    render::Raster,
    terrain::{
        generate::noise::NoiseGenerator,
        grid::{ElevationGrid, GridPoint},
        mesh::{TerrainMesh, Vertex},
        HeightField,
    },
    util::range::NumRange,
};
