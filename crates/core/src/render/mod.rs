//! Debug/texture visualization of height fields. Elevations are mapped
//! linearly onto 8-bit grayscale, lowest elevation black and highest white.

use crate::{util::range::NumRange, HeightField};
use anyhow::ensure;

/// A grayscale image with one 8-bit pixel per grid sample.
///
/// Pixels are row-major with X along each row: the pixel for grid point
/// `(x, z)` is at `z * width + x`. Note that this differs from the grid's own
/// storage order (X-major), since image encoders expect rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row by row
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the intensity of the pixel for grid point `(x, z)`
    pub fn get(&self, x: usize, z: usize) -> Option<u8> {
        if x < self.width && z < self.height {
            Some(self.pixels[z * self.width + x])
        } else {
            None
        }
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Render a height field's elevations into a grayscale raster
pub fn render_heightfield(field: &HeightField) -> Raster {
    let grid = field.grid();
    // Grid dimensions always match the sample buffer, no need to check
    Raster {
        width: grid.width(),
        height: grid.height(),
        pixels: grayscale_pixels(grid.samples(), grid.width(), grid.height()),
    }
}

/// Render raw elevations, given in grid storage order (sample `(x, z)` at
/// index `x * height + z`), into a grayscale raster. Returns an error if the
/// number of elevations isn't `width * height`.
///
/// A flat field (every elevation equal) renders as uniform black instead of
/// dividing by zero.
pub fn render_grayscale(
    elevations: &[f32],
    width: usize,
    height: usize,
) -> anyhow::Result<Raster> {
    ensure!(
        elevations.len() == width * height,
        "expected {}x{}={} elevations, got {}",
        width,
        height,
        width * height,
        elevations.len()
    );

    Ok(Raster {
        width,
        height,
        pixels: grayscale_pixels(elevations, width, height),
    })
}

/// Caller guarantees `elevations.len() == width * height`
fn grayscale_pixels(elevations: &[f32], width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![0; elevations.len()];
    // One pass for the bounds, a second to map each sample
    if let Some(range) = NumRange::of_values(elevations.iter().copied()) {
        for x in 0..width {
            for z in 0..height {
                let normalized = range.normalize(elevations[x * height + z]);
                pixels[z * width + x] = to_intensity(normalized);
            }
        }
    }
    pixels
}

/// Convert a value in `[0, 1]` to an 8-bit intensity, rounding to nearest
fn to_intensity(normalized: f32) -> u8 {
    (normalized.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(feature = "png")]
mod png {
    use super::Raster;
    use anyhow::Context;
    use image::GrayImage;
    use std::path::Path;

    impl Raster {
        /// Convert to an [image] buffer, for encoding or further processing.
        /// Only available with the "png" feature enabled.
        pub fn to_image(&self) -> anyhow::Result<GrayImage> {
            GrayImage::from_raw(
                self.width as u32,
                self.height as u32,
                self.pixels.clone(),
            )
            .context("raster dimensions don't match pixel buffer")
        }

        /// Encode as a PNG file. Only available with the "png" feature
        /// enabled.
        pub fn write_png(&self, path: &Path) -> anyhow::Result<()> {
            self.to_image()?
                .save_with_format(path, image::ImageFormat::Png)
                .with_context(|| format!("error writing to file {:?}", path))
        }
    }

    #[cfg(test)]
    mod tests {
        use crate::render::render_grayscale;

        #[test]
        fn test_write_png() {
            let raster =
                render_grayscale(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 2, 3).unwrap();
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("heights.png");
            raster.write_png(&path).unwrap();

            let image = image::open(&path).unwrap().into_luma8();
            assert_eq!(image.dimensions(), (2, 3));
            assert_eq!(image.get_pixel(1, 2).0, [255]);
            assert_eq!(image.get_pixel(0, 0).0, [0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_field() {
        let raster = render_grayscale(&[5.0; 12], 4, 3).unwrap();
        assert_eq!(raster.pixels().len(), 12);
        assert!(raster.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_gradient() {
        // 2 wide, 3 tall, grid order: (0,0) (0,1) (0,2) (1,0) (1,1) (1,2)
        let elevations = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let raster = render_grayscale(&elevations, 2, 3).unwrap();
        assert_eq!(raster.get(0, 0), Some(0));
        assert_eq!(raster.get(1, 2), Some(255));
        assert_eq!(raster.get(0, 1), Some(51));
        assert_eq!(raster.get(1, 0), Some(153));
        assert_eq!(raster.get(2, 0), None);
        // Row-major: first row is z=0
        assert_eq!(raster.pixels(), &[0, 153, 51, 204, 102, 255]);
    }

    #[test]
    fn test_negative_elevations() {
        let raster = render_grayscale(&[-2.0, -1.0, 0.0, 2.0], 2, 2).unwrap();
        assert_eq!(raster.pixels(), &[0, 128, 64, 255]);
    }

    #[test]
    fn test_render_heightfield() {
        let mut field = HeightField::new(crate::TerrainConfig {
            width: 3,
            height: 2,
            ..Default::default()
        })
        .unwrap();
        field.set_elevation(2, 1, 10.0).unwrap();
        let raster = render_heightfield(&field);
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.into_pixels(), vec![0, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_wrong_length() {
        assert!(render_grayscale(&[1.0, 2.0, 3.0], 2, 2).is_err());
    }

    #[test]
    fn test_to_intensity() {
        assert_eq!(to_intensity(0.0), 0);
        assert_eq!(to_intensity(0.5), 128);
        assert_eq!(to_intensity(1.0), 255);
        assert_eq!(to_intensity(1.5), 255);
    }
}
