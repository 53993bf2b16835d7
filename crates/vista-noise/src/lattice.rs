//! Integer avalanche hash and the terrain value-noise source built on it.

use noise::NoiseFn;

use crate::blend::smooth_bilinear;

/// Hash a lattice point and seed into `[0, 0.5)`.
///
/// Pure 32-bit wrapping arithmetic: multiply-add of the inputs, then two
/// xor-shift/multiply avalanche rounds. The shifts are arithmetic, so the
/// final fold always clears the sign bit and the output covers the lower
/// half of the unit interval. Identical inputs give bit-identical output on
/// every platform.
#[inline]
pub fn lattice_hash(x: i32, z: i32, seed: i32) -> f64 {
    let h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(z.wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(14_449));
    let n = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    ((n ^ (n >> 16)) as u32) as f64 / 4_294_967_296.0
}

/// Smoothed value noise over [`lattice_hash`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeNoise {
    seed: i32,
}

impl LatticeNoise {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Cosine-eased bilinear sample at `(x, z)`, in `[0, 0.5)`.
    #[inline]
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        smooth_bilinear(x, z, |ix, iz| lattice_hash(ix, iz, self.seed))
    }
}

impl NoiseFn<f64, 2> for LatticeNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        for seed in [0, 1, 42, -7, i32::MAX] {
            for (x, z) in [(0, 0), (5, -3), (-1000, 1000), (i32::MIN, i32::MAX)] {
                let a = lattice_hash(x, z, seed);
                let b = lattice_hash(x, z, seed);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_hash_in_lower_half_interval() {
        for x in -200..200 {
            for z in -20..20 {
                let v = lattice_hash(x, z, 1234);
                assert!((0.0..0.5).contains(&v), "hash({x},{z}) = {v}");
            }
        }
    }

    #[test]
    fn test_hash_is_roughly_uniform() {
        let mut buckets = [0u32; 5];
        for x in 0..100 {
            for z in 0..100 {
                let v = lattice_hash(x, z, 0);
                buckets[(v * 10.0) as usize] += 1;
            }
        }
        for (i, &count) in buckets.iter().enumerate() {
            assert!(
                (1700..2300).contains(&count),
                "bucket {i} has {count} of 10000 samples"
            );
        }
    }

    #[test]
    fn test_seed_changes_output() {
        let a = LatticeNoise::new(1).get([10.5, 20.25]);
        let b = LatticeNoise::new(2).get([10.5, 20.25]);
        assert!((a - b).abs() > 1e-9, "seeds 1 and 2 gave {a} and {b}");
    }

    #[test]
    fn test_noise_is_continuous() {
        let noise = LatticeNoise::new(99);
        let step = 0.001;
        for i in 0..5000 {
            let x = i as f64 * step;
            let delta = (noise.sample(x + step, 3.3) - noise.sample(x, 3.3)).abs();
            assert!(delta < 0.01, "jump of {delta} at x={x}");
        }
    }
}
