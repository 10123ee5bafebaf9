//! Binary STL export. Only available with the "stl" feature enabled.

use crate::TerrainMesh;
use nalgebra::Vector3;
use std::io::{self, Write};
use stl_io::{Normal, Triangle, Vertex};

/// Convert a mesh into STL triangle soup. STL has no convention for which
/// axis is up, so we keep the mesh's Y-up frame.
///
/// STL follows the right-hand rule, i.e. vertices are **counter-clockwise**
/// when looking at the visible side. Terrain triangles are clockwise from
/// above, so each one is reversed here to make the top surface face up.
pub fn mesh_to_stl(mesh: &TerrainMesh) -> Vec<Triangle> {
    let vertices = mesh.vertices();
    mesh.triangles()
        .map(|[a, b, c]| {
            let corners = [c, b, a].map(|index| {
                Vector3::from(vertices[index as usize].position)
            });
            Triangle {
                normal: Normal::new(face_normal(&corners).into()),
                vertices: corners.map(|corner| Vertex::new(corner.into())),
            }
        })
        .collect()
}

/// Right-hand rule normal of a triangle. Degenerate triangles get a zero
/// normal, which STL readers treat as "compute it yourself".
fn face_normal(corners: &[Vector3<f32>; 3]) -> Vector3<f32> {
    (corners[1] - corners[0])
        .cross(&(corners[2] - corners[0]))
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// Write a mesh as binary STL
pub fn write_stl(mesh: &TerrainMesh, writer: &mut impl Write) -> io::Result<()> {
    let triangles = mesh_to_stl(mesh);
    stl_io::write_stl(writer, triangles.iter())
}
