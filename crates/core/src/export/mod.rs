//! Exporters that serialize a [TerrainMesh] into interchange formats. Every
//! exporter comes in two flavors: one that writes into any [Write], and one
//! that writes a file to a path.
//!
//! File writes are best effort. If writing fails partway through, the error
//! is returned but the partial file is left on disk. Exports are always
//! regenerable, so a truncated file is harmless.
//!
//! ## Supported Formats
//! - OBJ (Wavefront, text)
//! - FBX-like ASCII (a textual approximation of the FBX structure, see [fbx])
//! - STL (binary, geometry only; requires the "stl" feature)

pub mod fbx;
pub mod obj;
#[cfg(feature = "stl")]
pub mod stl;

use crate::{timed, TerrainMesh};
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};
use strum::{Display, EnumString};

/// The geometry formats a mesh can be exported to.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExportFormat {
    /// Wavefront OBJ with positions, UVs, and normals
    Obj,
    /// ASCII text loosely following the FBX node layout
    Fbx,
    /// Binary STL, geometry only. Requires the "stl" feature
    Stl,
}

impl ExportFormat {
    /// The conventional file extension for this format, without the dot
    pub fn file_ext(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Fbx => "fbx",
            Self::Stl => "stl",
        }
    }

    /// Serialize a mesh in this format into a writer
    pub fn write(
        self,
        mesh: &TerrainMesh,
        writer: &mut impl Write,
    ) -> io::Result<()> {
        match self {
            Self::Obj => obj::write_obj(mesh, writer),
            Self::Fbx => fbx::write_fbx(mesh, writer),
            #[cfg(feature = "stl")]
            Self::Stl => stl::write_stl(mesh, writer),
            #[cfg(not(feature = "stl"))]
            Self::Stl => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "STL export requires the \"stl\" feature",
            )),
        }
    }

    /// Serialize a mesh in this format into a file. Any existing file at the
    /// path is overwritten.
    pub fn export(self, mesh: &TerrainMesh, path: &Path) -> anyhow::Result<()> {
        timed!(
            format!("Exporting {} to {:?}", self, path),
            write_file(path, |writer| self.write(mesh, writer))
        )?;
        info!("Exported {} mesh to {:?}", self, path);
        Ok(())
    }
}

/// Export a mesh as a Wavefront OBJ file
pub fn export_obj(mesh: &TerrainMesh, path: &Path) -> anyhow::Result<()> {
    ExportFormat::Obj.export(mesh, path)
}

/// Export a mesh as an FBX-like ASCII file
pub fn export_fbx_like(mesh: &TerrainMesh, path: &Path) -> anyhow::Result<()> {
    ExportFormat::Fbx.export(mesh, path)
}

/// Open (or truncate) a file, hand a buffered writer for it to the given
/// function, then flush.
pub(crate) fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("error opening output file {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("error writing to file {:?}", path))
}
