use crate::TerrainMesh;
use std::io::{self, Write};

/// Write a mesh as Wavefront OBJ. Positions (`v`), texture coordinates (`vt`)
/// and normals (`vn`) are each written once per vertex, in vertex buffer
/// order, so a single index addresses all three. Faces follow, one `f` line
/// per triangle, with OBJ's 1-based indices.
///
/// Triangles keep the mesh's winding (see [TerrainMesh]).
pub fn write_obj(mesh: &TerrainMesh, writer: &mut impl Write) -> io::Result<()> {
    let vertices = mesh.vertices();
    writeln!(writer, "# Terrain mesh exported by relief")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        vertices.len(),
        mesh.triangle_count()
    )?;
    writeln!(writer, "o terrain")?;

    for vertex in vertices {
        let [x, y, z] = vertex.position;
        writeln!(writer, "v {} {} {}", x, y, z)?;
    }
    for vertex in vertices {
        let [u, v] = vertex.uv;
        writeln!(writer, "vt {} {}", u, v)?;
    }
    for vertex in vertices {
        let [x, y, z] = vertex.normal;
        writeln!(writer, "vn {} {} {}", x, y, z)?;
    }

    for triangle in mesh.triangles() {
        let [a, b, c] = triangle.map(|index| index + 1);
        writeln!(writer, "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2}", a, b, c)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{terrain::grid::ElevationGrid, TerrainMesh};

    fn mesh() -> TerrainMesh {
        let mut grid = ElevationGrid::new(2, 2);
        grid.set(1, 1, 2.0);
        TerrainMesh::build(&grid, 1.0, 0.5)
    }

    #[test]
    fn test_write_obj() {
        let mut buffer = Vec::new();
        write_obj(&mesh(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let v: Vec<_> = lines.iter().filter(|l| l.starts_with("v ")).collect();
        assert_eq!(
            v,
            vec![&"v 0 0 0", &"v 0 0 1", &"v 1 0 0", &"v 1 1 1"]
        );
        let vt: Vec<_> =
            lines.iter().filter(|l| l.starts_with("vt ")).collect();
        assert_eq!(vt, vec![&"vt 0 0", &"vt 0 1", &"vt 1 0", &"vt 1 1"]);
        assert_eq!(lines.iter().filter(|l| l.starts_with("vn ")).count(), 4);

        let f: Vec<_> = lines.iter().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(f, vec![&"f 1/1/1 3/3/3 2/2/2", &"f 3/3/3 4/4/4 2/2/2"]);
        assert!(text.ends_with('\n'));
    }
}
