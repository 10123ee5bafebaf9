use crate::terrain::{generate::Generate, grid::ElevationGrid};

/// Box-blur the grid a fixed number of times. Each pass replaces every sample
/// with the unweighted mean of its Moore neighborhood (itself plus up to 8
/// neighbors). Edge and corner samples average over the neighbors that
/// exist; nothing wraps around.
///
/// Every pass reads only the previous pass's values. Results go into a fresh
/// buffer that is swapped in once the pass is complete.
#[derive(Debug)]
pub struct Smoothing {
    pub iterations: usize,
}

impl Smoothing {
    fn smooth_once(grid: &ElevationGrid) -> Vec<f32> {
        let width = grid.width();
        let height = grid.height();
        let mut output = Vec::with_capacity(grid.len());

        // Same iteration order as the grid's storage, so we can just push
        for x in 0..width {
            let x_range = x.saturating_sub(1)..=(x + 1).min(width - 1);
            for z in 0..height {
                let z_range = z.saturating_sub(1)..=(z + 1).min(height - 1);
                let mut sum = 0.0;
                let mut count = 0;
                for nx in x_range.clone() {
                    for nz in z_range.clone() {
                        sum += grid.get(nx, nz);
                        count += 1;
                    }
                }
                output.push(sum / count as f32);
            }
        }
        output
    }
}

impl Generate for Smoothing {
    fn generate(&self, grid: &mut ElevationGrid) -> anyhow::Result<()> {
        for _ in 0..self.iterations {
            let smoothed = Self::smooth_once(grid);
            grid.replace_samples(smoothed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    /// A grid with a single spike in it
    fn spike() -> ElevationGrid {
        let mut grid = ElevationGrid::new(5, 4);
        grid.set(2, 1, 9.0);
        grid
    }

    #[test]
    fn test_single_pass_uses_previous_values() {
        let mut grid = ElevationGrid::new(6, 5);
        for point in grid.points().collect::<Vec<_>>() {
            let value = ((point.x * 7 + point.z * 3) % 5) as f32;
            grid.set(point.x, point.z, value);
        }
        let before = grid.clone();

        Smoothing { iterations: 1 }.generate(&mut grid).unwrap();

        // Every interior sample is the mean of its 9 neighbors **before** the
        // pass, not a mix of old and new values
        for x in 1..5 {
            for z in 1..4 {
                let mut sum = 0.0;
                for nx in x - 1..=x + 1 {
                    for nz in z - 1..=z + 1 {
                        sum += before.get(nx, nz);
                    }
                }
                assert_approx_eq!(grid.get(x, z), sum / 9.0);
            }
        }
    }

    #[test]
    fn test_edges_and_corners() {
        let mut grid = spike();
        Smoothing { iterations: 1 }.generate(&mut grid).unwrap();

        // Interior neighbor: 9 samples
        assert_approx_eq!(grid.get(2, 1), 1.0);
        assert_approx_eq!(grid.get(3, 2), 1.0);
        // Edge neighbor: 6 samples
        assert_approx_eq!(grid.get(2, 0), 1.5);
        // Corner far from the spike
        assert_approx_eq!(grid.get(0, 0), 0.0);
        assert_approx_eq!(grid.get(4, 3), 0.0);
    }

    #[test]
    fn test_corner_averages_four() {
        let mut grid = ElevationGrid::new(3, 3);
        grid.set(0, 0, 8.0);
        Smoothing { iterations: 1 }.generate(&mut grid).unwrap();
        assert_approx_eq!(grid.get(0, 0), 2.0);
    }

    #[test]
    fn test_zero_iterations() {
        let mut grid = spike();
        Smoothing { iterations: 0 }.generate(&mut grid).unwrap();
        assert_eq!(grid, spike());
    }

    #[test]
    fn test_flat_stays_flat() {
        let mut grid = ElevationGrid::new(4, 4);
        grid.samples_mut().iter_mut().for_each(|e| *e = 2.5);
        Smoothing { iterations: 3 }.generate(&mut grid).unwrap();
        assert!(grid.samples().iter().all(|&e| e == 2.5));
    }
}
