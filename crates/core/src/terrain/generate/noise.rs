use noise::NoiseFn;
use rand::{seq::SliceRandom, SeedableRng};
use rand_pcg::Pcg64;
use std::fmt;

/// Classic (improved) gradient noise over a seeded permutation table. The
/// table is built once, at construction, and never changes after that, so
/// sampling is a pure function of the input point. That also means a single
/// generator can be shared between threads and sampled concurrently.
///
/// Output is periodic with a period of [Self::PERIOD] on every axis.
#[derive(Clone)]
pub struct NoiseGenerator {
    /// Shuffled `0..=255`, stored twice back to back so that
    /// `permutation[a + b]` never needs to wrap for `a, b <= 255`.
    permutation: [u8; Self::TABLE_LEN],
}

impl NoiseGenerator {
    /// Noise repeats itself after this many units on each axis
    pub const PERIOD: usize = 256;
    const TABLE_LEN: usize = Self::PERIOD * 2;

    /// Build a generator for the given seed. Identical seeds always produce
    /// identical permutation tables, and therefore identical noise.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut values: Vec<u8> = (0..=u8::MAX).collect();
        // Fisher-Yates, driven by the seeded RNG
        values.shuffle(&mut rng);

        let mut permutation = [0; Self::TABLE_LEN];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = values[i % Self::PERIOD];
        }
        Self { permutation }
    }

    /// Sample a single octave of noise at the given point. Output is in
    /// `[-1, 1]`. Every integer lattice point samples to exactly 0.
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, x) = Self::split_coord(x);
        let (yi, y) = Self::split_coord(y);
        let (zi, z) = Self::split_coord(z);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        // Hash each of the 8 corners of the unit cube containing the point
        let p = |i: usize| self.permutation[i] as usize;
        let a = p(xi) + yi;
        let aa = p(a) + zi;
        let ab = p(a + 1) + zi;
        let b = p(xi + 1) + yi;
        let ba = p(b) + zi;
        let bb = p(b + 1) + zi;

        let value = lerp(
            w,
            lerp(
                v,
                lerp(
                    u,
                    grad(p(aa), x, y, z),
                    grad(p(ba), x - 1.0, y, z),
                ),
                lerp(
                    u,
                    grad(p(ab), x, y - 1.0, z),
                    grad(p(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p(aa + 1), x, y, z - 1.0),
                    grad(p(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p(ab + 1), x, y - 1.0, z - 1.0),
                    grad(p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        );
        value.clamp(-1.0, 1.0)
    }

    /// Sample fractal noise: `octaves` layers of [Self::sample3], each at
    /// double the frequency of the last, with amplitude multiplied by
    /// `persistence` each step. The sum is divided by the total amplitude so
    /// the output stays in roughly `[-1, 1]`.
    ///
    /// Zero octaves is meaningless, and returns 0.
    pub fn sample_octaves(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: usize,
        persistence: f64,
    ) -> f64 {
        let mut total = 0.0;
        let mut total_amplitude = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for _ in 0..octaves {
            total += self.sample3(x * frequency, y * frequency, z * frequency)
                * amplitude;
            total_amplitude += amplitude;
            frequency *= 2.0;
            amplitude *= persistence;
        }

        if total_amplitude > 0.0 {
            total / total_amplitude
        } else {
            0.0
        }
    }

    /// Split a coordinate into its lattice cell (wrapped to the period) and
    /// its fractional offset within that cell.
    fn split_coord(coord: f64) -> (usize, f64) {
        let floor = coord.floor();
        let cell = (floor as i64 & (Self::PERIOD as i64 - 1)) as usize;
        (cell, coord - floor)
    }
}

impl fmt::Debug for NoiseGenerator {
    // The raw table is 512 numbers of noise (heh), keep it out of logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseGenerator").finish_non_exhaustive()
    }
}

/// Lets the generator plug into the `noise` crate's combinators
impl NoiseFn<[f64; 3]> for NoiseGenerator {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample3(point[0], point[1], point[2])
    }
}

/// Smootherstep: `6t^5 - 15t^4 + 10t^3`
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the offset vector with one of 12 cube-edge gradients,
/// selected by the low 4 bits of the hash.
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_deterministic() {
        let a = NoiseGenerator::new(42);
        let b = NoiseGenerator::new(42);
        assert_eq!(a.permutation, b.permutation);
        for i in 0..100 {
            let t = i as f64 * 0.37;
            assert_eq!(
                a.sample3(t, t * 0.5, -t).to_bits(),
                b.sample3(t, t * 0.5, -t).to_bits()
            );
        }
    }

    #[test]
    fn test_different_seeds() {
        let a = NoiseGenerator::new(1);
        let b = NoiseGenerator::new(2);
        assert_ne!(a.permutation, b.permutation);
        let differs = (0..100).any(|i| {
            let t = i as f64 * 0.37 + 0.1;
            a.sample3(t, t, t) != b.sample3(t, t, t)
        });
        assert!(differs, "different seeds produced identical noise");
    }

    #[test]
    fn test_permutation_table() {
        let noise = NoiseGenerator::new(7);
        // The first half is a permutation of 0..=255
        let mut first_half = noise.permutation[..256].to_vec();
        first_half.sort_unstable();
        assert_eq!(first_half, (0..=255).collect::<Vec<u8>>());
        // The second half duplicates the first
        assert_eq!(noise.permutation[..256], noise.permutation[256..]);
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let noise = NoiseGenerator::new(3);
        for (x, y, z) in [(0.0, 0.0, 0.0), (5.0, -2.0, 17.0), (-300.0, 1.0, 9.0)]
        {
            assert_eq!(noise.sample3(x, y, z), 0.0);
        }
    }

    #[test]
    fn test_sample3_bounds() {
        let noise = NoiseGenerator::new(1234);
        let mut rng = Pcg64::seed_from_u64(99);
        for _ in 0..10_000 {
            let x = rng.gen_range(-512.0..512.0);
            let y = rng.gen_range(-512.0..512.0);
            let z = rng.gen_range(-512.0..512.0);
            let value = noise.sample3(x, y, z);
            assert!(
                (-1.0..=1.0).contains(&value),
                "noise({}, {}, {}) = {} is out of range",
                x,
                y,
                z,
                value
            );
        }
    }

    #[test]
    fn test_sample_octaves_bounds() {
        let noise = NoiseGenerator::new(1234);
        let mut rng = Pcg64::seed_from_u64(100);
        for _ in 0..10_000 {
            let x = rng.gen_range(-64.0..64.0);
            let z = rng.gen_range(-64.0..64.0);
            let octaves = rng.gen_range(1..=6);
            let persistence = rng.gen_range(0.05..0.95);
            let value = noise.sample_octaves(x, 0.0, z, octaves, persistence);
            assert!(
                (-1.05..=1.05).contains(&value),
                "{} octaves at ({}, {}) = {} is out of range",
                octaves,
                x,
                z,
                value
            );
        }
    }

    #[test]
    fn test_persistence_endpoints() {
        let noise = NoiseGenerator::new(1234);
        let mut rng = Pcg64::seed_from_u64(101);
        for _ in 0..1000 {
            let x = rng.gen_range(-64.0..64.0);
            let z = rng.gen_range(-64.0..64.0);
            // Zero persistence silences everything past the first octave
            assert_eq!(
                noise.sample_octaves(x, 0.0, z, 4, 0.0),
                noise.sample3(x, 0.0, z)
            );
            // Full persistence is a plain mean of clamped octaves
            let value = noise.sample_octaves(x, 0.0, z, 4, 1.0);
            assert!((-1.0..=1.0).contains(&value), "{} is out of range", value);
        }
    }

    #[test]
    fn test_single_octave_matches_sample3() {
        let noise = NoiseGenerator::new(5);
        let value = noise.sample_octaves(1.3, 2.7, 0.0, 1, 0.5);
        assert_eq!(value, noise.sample3(1.3, 2.7, 0.0));
        assert_eq!(noise.sample_octaves(1.3, 2.7, 0.0, 0, 0.5), 0.0);
    }

    #[test]
    fn test_periodic() {
        let noise = NoiseGenerator::new(11);
        // Dyadic fractions keep the offset exact after adding the period
        for (x, y, z) in [(0.25, 0.5, 0.75), (3.125, -7.5, 100.0625)] {
            let period = NoiseGenerator::PERIOD as f64;
            assert_eq!(
                noise.sample3(x, y, z),
                noise.sample3(x + period, y - period, z + period)
            );
        }
    }

    #[test]
    fn test_noise_fn() {
        let noise = NoiseGenerator::new(8);
        assert_eq!(noise.get([0.4, 1.9, -3.2]), noise.sample3(0.4, 1.9, -3.2));
    }
}
