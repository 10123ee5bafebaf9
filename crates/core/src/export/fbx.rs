//! An ASCII exporter that mimics the node layout of FBX files: a header
//! block, then a single geometry node holding flat arrays of positions,
//! polygon vertex indices, normals, and UVs.
//!
//! This is **not** a validated FBX implementation. Real FBX is a binary
//! format with a lot more required structure. The output here is only meant
//! for downstream tools that accept this ASCII variant, and its exact byte
//! layout isn't a stable contract. What is stable is the shape: header,
//! geometry node, flattened arrays, and sentinel-terminated polygons.
//!
//! ## Polygon indices
//! FBX marks the end of each polygon by storing its last index as
//! `-(index + 1)`. Every polygon here is a triangle, so every third entry of
//! `PolygonVertexIndex` is negative.

use crate::TerrainMesh;
use std::{
    fmt::Display,
    io::{self, Write},
};

/// Arbitrary, but must be unique within the file
const GEOMETRY_ID: u64 = 1_000_000;

/// Write a mesh in the FBX-like ASCII format
pub fn write_fbx(mesh: &TerrainMesh, writer: &mut impl Write) -> io::Result<()> {
    let vertices = mesh.vertices();

    writeln!(writer, "; FBX 7.3.0 project file")?;
    writeln!(writer, "; Generated by relief. ASCII approximation, not validated against FBX SDK")?;
    writeln!(writer, "; ----------------------------------------------------")?;
    writeln!(writer)?;
    writeln!(writer, "FBXHeaderExtension:  {{")?;
    writeln!(writer, "\tFBXHeaderVersion: 1003")?;
    writeln!(writer, "\tFBXVersion: 7300")?;
    writeln!(writer, "\tCreator: \"relief\"")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "Objects:  {{")?;
    writeln!(
        writer,
        "\tGeometry: {}, \"Geometry::Terrain\", \"Mesh\" {{",
        GEOMETRY_ID
    )?;

    write_array(
        writer,
        1,
        "Vertices",
        vertices.iter().flat_map(|vertex| vertex.position),
    )?;
    write_array(writer, 1, "PolygonVertexIndex", polygon_vertex_indices(mesh))?;
    writeln!(writer, "\t\tGeometryVersion: 124")?;

    writeln!(writer, "\t\tLayerElementNormal: 0 {{")?;
    writeln!(writer, "\t\t\tVersion: 101")?;
    writeln!(writer, "\t\t\tName: \"\"")?;
    writeln!(writer, "\t\t\tMappingInformationType: \"ByVertice\"")?;
    writeln!(writer, "\t\t\tReferenceInformationType: \"Direct\"")?;
    write_array(
        writer,
        2,
        "Normals",
        vertices.iter().flat_map(|vertex| vertex.normal),
    )?;
    writeln!(writer, "\t\t}}")?;

    writeln!(writer, "\t\tLayerElementUV: 0 {{")?;
    writeln!(writer, "\t\t\tVersion: 101")?;
    writeln!(writer, "\t\t\tName: \"map1\"")?;
    writeln!(writer, "\t\t\tMappingInformationType: \"ByVertice\"")?;
    writeln!(writer, "\t\t\tReferenceInformationType: \"Direct\"")?;
    write_array(
        writer,
        2,
        "UV",
        vertices.iter().flat_map(|vertex| vertex.uv),
    )?;
    writeln!(writer, "\t\t}}")?;

    writeln!(writer, "\t}}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Flatten the index buffer, encoding the last index of every triangle as
/// `-(index + 1)`.
pub fn polygon_vertex_indices(
    mesh: &TerrainMesh,
) -> impl Iterator<Item = i64> + '_ {
    mesh.triangles().flat_map(|[a, b, c]| {
        [a as i64, b as i64, -(c as i64 + 1)]
    })
}

/// Write a named array node: `Name: *count { a: v1,v2,... }`. `depth` is the
/// tab depth of the owning node.
fn write_array<T: Display>(
    writer: &mut impl Write,
    depth: usize,
    name: &str,
    values: impl Iterator<Item = T>,
) -> io::Result<()> {
    let indent = "\t".repeat(depth + 1);
    let values: Vec<String> = values.map(|value| value.to_string()).collect();
    writeln!(writer, "{}{}: *{} {{", indent, name, values.len())?;
    writeln!(writer, "{}\ta: {}", indent, values.join(","))?;
    writeln!(writer, "{}}}", indent)
}
