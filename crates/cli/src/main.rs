use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use relief::{
    render, timed, ExportFormat, HeightField, Seed, TerrainConfig,
};
use simple_logger::SimpleLogger;
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating height field terrain via the Relief generation kit.
#[derive(Debug, StructOpt)]
#[structopt(name = "relief")]
struct Opt {
    /// Path to a config file that defines the terrain to be generated.
    /// Supported formats: JSON, TOML. Any field left out uses its default.
    /// If no file is given, the entire default config is used
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Seed to generate with, overriding the one in the config file. Integers
    /// are used directly, anything else is hashed
    #[structopt(short, long)]
    seed: Option<Seed>,

    /// If given, the generated terrain will be saved to this directory. The
    /// exact files that appear in the directory are defined by the output
    /// formats. See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the terrain in. Supported formats:
    ///
    /// cfg - The full config object used for the terrain, in TOML format.
    ///   Feed this back in via `--config` to regenerate the same terrain
    ///
    /// obj - Wavefront OBJ mesh with normals and UVs
    ///
    /// fbx - FBX-style ASCII mesh
    ///
    /// stl - Binary STL mesh, for 3D printing
    ///
    /// png - Grayscale height map, one pixel per grid sample
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use during generation. See
    /// https://docs.rs/log/0.4/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the terrain's full config in a human-readable file
    Cfg,
    /// Export the mesh as Wavefront OBJ
    Obj,
    /// Export the mesh in the FBX-style ASCII format
    Fbx,
    /// Export the mesh as binary STL
    Stl,
    /// Render the elevations as a grayscale PNG
    Png,
}

impl OutputFormat {
    /// The mesh export format that backs this output, if any
    fn mesh_format(self) -> Option<ExportFormat> {
        match self {
            Self::Obj => Some(ExportFormat::Obj),
            Self::Fbx => Some(ExportFormat::Fbx),
            Self::Stl => Some(ExportFormat::Stl),
            Self::Cfg | Self::Png => None,
        }
    }

    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Png => "png",
            Self::Obj => ExportFormat::Obj.file_ext(),
            Self::Fbx => ExportFormat::Fbx.file_ext(),
            Self::Stl => ExportFormat::Stl.file_ext(),
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<TerrainConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the terrain in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    field: &HeightField,
) -> anyhow::Result<()> {
    let output_file_path = output_dir
        .join("terrain")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        match (output_format, output_format.mesh_format()) {
            (_, Some(mesh_format)) => {
                mesh_format.export(field.require_mesh()?, &output_file_path)?
            }
            (OutputFormat::Cfg, None) => {
                let text = toml::to_string_pretty(field.config())
                    .context("error serializing config")?;
                fs::write(&output_file_path, text).with_context(|| {
                    format!("error writing to file {:?}", &output_file_path)
                })?;
            }
            (_, None) => render::render_heightfield(field)
                .write_png(&output_file_path)?,
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let mut config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => TerrainConfig::default(),
    };
    if let Some(seed) = opt.seed {
        config.seed = seed;
    }

    let field = HeightField::from_config(config)?;
    info!(
        "Generated {}x{} terrain with seed {}, elevations in {}",
        field.width(),
        field.height(),
        field.config().seed,
        field.elevation_range()
    );

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("error creating output dir {:?}", &output_dir)
        })?;

        for output_format in opt.output_formats {
            gen_output(&output_dir, output_format, &field)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_file_ext() {
        let expected = [
            ("cfg", "toml"),
            ("obj", "obj"),
            ("fbx", "fbx"),
            ("stl", "stl"),
            ("png", "png"),
        ];
        for (name, ext) in expected {
            let format = OutputFormat::from_str(name).unwrap();
            assert_eq!(format.file_ext(), ext, "wrong extension for {}", name);
            if let Some(mesh_format) = format.mesh_format() {
                assert_eq!(format.file_ext(), mesh_format.file_ext());
            }
        }
    }
}
