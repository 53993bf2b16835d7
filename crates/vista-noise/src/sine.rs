//! Sine-based hash used for cloud noise.

use noise::NoiseFn;

use crate::blend::smooth_bilinear;

/// `fract(sin(x·12.9898 + z·78.233 + seed) · 43758.5453)`, in `[0, 1)`.
#[inline]
pub fn sine_hash(x: f64, z: f64, seed: f64) -> f64 {
    let v = (x * 12.9898 + z * 78.233 + seed).sin() * 43_758.5453;
    v - v.floor()
}

/// Smoothed value noise over [`sine_hash`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SineNoise {
    seed: f64,
}

impl SineNoise {
    pub fn new(seed: f64) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        smooth_bilinear(x, z, |ix, iz| sine_hash(ix as f64, iz as f64, self.seed))
    }
}

impl NoiseFn<f64, 2> for SineNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}
