//! Gradient (Perlin) noise.

use crate::sampling::random_unit_vector;
use ember_math::Vec3;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Lattice of random unit gradients with per-axis permutation tables.
#[derive(Debug, Clone)]
pub struct Perlin {
    ranvec: [Vec3; Self::POINT_COUNT],
    perm_x: [usize; Self::POINT_COUNT],
    perm_y: [usize; Self::POINT_COUNT],
    perm_z: [usize; Self::POINT_COUNT],
}

impl Perlin {
    const POINT_COUNT: usize = 256;

    /// Build a new noise lattice from `rng`.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut ranvec = [Vec3::ZERO; Self::POINT_COUNT];
        ranvec
            .iter_mut()
            .for_each(|v| *v = random_unit_vector(rng));

        let perm_x = Self::generate_perm(rng);
        let perm_y = Self::generate_perm(rng);
        let perm_z = Self::generate_perm(rng);

        Self {
            ranvec,
            perm_x,
            perm_y,
            perm_z,
        }
    }

    /// Smoothed noise at `p`, roughly in `[-1, 1]`. Zero on lattice points.
    pub fn noise(&self, p: Vec3) -> f32 {
        let floor = p.floor();
        let u = p.x - floor.x;
        let v = p.y - floor.y;
        let w = p.z - floor.z;

        let i = Self::lattice_index(floor.x);
        let j = Self::lattice_index(floor.y);
        let k = Self::lattice_index(floor.z);

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];

        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let index = self.perm_x[(i + di) & 255]
                        ^ self.perm_y[(j + dj) & 255]
                        ^ self.perm_z[(k + dk) & 255];
                    *cell = self.ranvec[index];
                }
            }
        }

        Self::perlin_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves, each at double the frequency and half the
    /// weight of the last. Always non-negative.
    pub fn turb(&self, p: Vec3, depth: usize) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }

    /// Lattice coordinate wrapped into the permutation table. The tables
    /// repeat every 256 cells, so this holds for any finite coordinate.
    fn lattice_index(floor: f32) -> usize {
        floor.rem_euclid(Self::POINT_COUNT as f32) as usize
    }

    fn generate_perm(rng: &mut dyn RngCore) -> [usize; Self::POINT_COUNT] {
        let mut p = [0; Self::POINT_COUNT];
        p.iter_mut().enumerate().for_each(|(i, v)| *v = i);
        p.shuffle(rng);
        p
    }

    /// Trilinear blend of the corner gradients with a Hermite fade curve.
    fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);

        let mut accum = 0.0;

        for (i, plane) in c.iter().enumerate() {
            let fi = i as f32;
            for (j, row) in plane.iter().enumerate() {
                let fj = j as f32;
                for (k, gradient) in row.iter().enumerate() {
                    let fk = k as f32;
                    let weight_v = Vec3::new(u - fi, v - fj, w - fk);
                    accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                        * (fj * vv + (1.0 - fj) * (1.0 - vv))
                        * (fk * ww + (1.0 - fk) * (1.0 - ww))
                        * gradient.dot(weight_v);
                }
            }
        }

        accum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_noise_vanishes_on_lattice() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(1));

        for p in [Vec3::ZERO, Vec3::new(3.0, -2.0, 7.0), Vec3::new(-300.0, 4.0, 1.0)] {
            assert!(perlin.noise(p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_noise_is_bounded_and_varies() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(2));
        let mut rng = StdRng::seed_from_u64(3);

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for _ in 0..2000 {
            let p = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let n = perlin.noise(p);
            assert!(n.abs() <= 1.0, "noise {n} out of range at {p}");
            min = min.min(n);
            max = max.max(n);
        }

        assert!(min < -0.1 && max > 0.1);
    }

    #[test]
    fn test_noise_far_from_origin() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(1));

        for p in [
            Vec3::new(3.0e9, 0.5, 0.5),
            Vec3::new(-3.0e9, 1.0e12, 0.25),
            Vec3::new(5.0e7, 0.0, -5.0e7),
        ] {
            assert!(perlin.noise(p).abs() <= 1.0);
            assert!(perlin.turb(p, 7).is_finite());
        }
    }

    #[test]
    fn test_lattice_repeats_every_256_cells() {
        let perlin = Perlin::new(&mut StdRng::seed_from_u64(4));
        let p = Vec3::new(0.3, 0.6, 0.9);
        let shifted = p + Vec3::new(256.0, -512.0, 768.0);

        assert!((perlin.noise(p) - perlin.noise(shifted)).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_lattice() {
        let a = Perlin::new(&mut StdRng::seed_from_u64(99));
        let b = Perlin::new(&mut StdRng::seed_from_u64(99));
        let p = Vec3::new(0.3, 1.7, -2.2);

        assert_eq!(a.noise(p), b.noise(p));
        assert_eq!(a.turb(p, 7), b.turb(p, 7));
        assert!(a.turb(p, 7) >= 0.0);
    }
}
