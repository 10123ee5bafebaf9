//! Triangulation of a height field into renderable vertex and index
//! buffers. The buffers are laid out so a renderer can upload them directly.

use crate::terrain::grid::ElevationGrid;
use bytemuck::{Pod, Zeroable};
use nalgebra::Vector3;

/// A single mesh vertex. The layout is `#[repr(C)]` with no padding, so a
/// slice of vertices can be handed to a GPU as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 3],
    /// Unit-length surface normal
    pub normal: [f32; 3],
    /// Texture coordinate, both components in `[0, 1]`
    pub uv: [f32; 2],
}

/// An indexed triangle list generated from a height field. There is exactly
/// one vertex per grid sample, in grid storage order, and two triangles per
/// grid cell.
///
/// ## Winding
/// Every triangle is wound **clockwise when viewed from above** (+Y) in a
/// right-handed frame, while normals point up. Renderers that treat
/// clockwise triangles as front faces will cull the underside of the terrain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build a mesh for the given grid. `horizontal_scale` spaces vertices
    /// on the X and Z axes, `vertical_scale` multiplies elevation into Y.
    pub(crate) fn build(
        grid: &ElevationGrid,
        horizontal_scale: f32,
        vertical_scale: f32,
    ) -> Self {
        let width = grid.width();
        let height = grid.height();
        let u_max = (width - 1) as f32;
        let v_max = (height - 1) as f32;

        let vertices = grid
            .points()
            .map(|point| {
                let (x, z) = (point.x, point.z);
                Vertex {
                    position: [
                        x as f32 * horizontal_scale,
                        grid.get(x, z) * vertical_scale,
                        z as f32 * horizontal_scale,
                    ],
                    normal: surface_normal(grid, x, z).into(),
                    uv: [x as f32 / u_max, z as f32 / v_max],
                }
            })
            .collect();

        let mut indices =
            Vec::with_capacity(Self::index_count(width, height));
        for x in 0..width - 1 {
            for z in 0..height - 1 {
                let top_left = grid.index(x, z) as u32;
                let top_right = grid.index(x + 1, z) as u32;
                let bottom_left = grid.index(x, z + 1) as u32;
                let bottom_right = grid.index(x + 1, z + 1) as u32;
                indices.extend_from_slice(&[
                    top_left,
                    top_right,
                    bottom_left,
                    top_right,
                    bottom_right,
                    bottom_left,
                ]);
            }
        }

        Self { vertices, indices }
    }

    /// Number of indices a mesh for a `width × height` grid will have: two
    /// triangles for each of the `(width-1) * (height-1)` cells.
    pub fn index_count(width: usize, height: usize) -> usize {
        6 * (width - 1) * (height - 1)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Iterate over each triangle as a triple of vertex indices
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|triangle| [triangle[0], triangle[1], triangle[2]])
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The raw bytes of the vertex buffer, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The raw bytes of the index buffer (`u32`, native endian)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Normal at a grid point via central differences over the raw (unscaled)
/// elevations. Neighbors past the edge of the grid replicate the edge.
pub(crate) fn surface_normal(
    grid: &ElevationGrid,
    x: usize,
    z: usize,
) -> Vector3<f32> {
    let (x, z) = (x as isize, z as isize);
    Vector3::new(
        grid.get_clamped(x - 1, z) - grid.get_clamped(x + 1, z),
        2.0,
        grid.get_clamped(x, z - 1) - grid.get_clamped(x, z + 1),
    )
    .normalize()
}
