//! Procedural star catalog: deterministic star placement on the upper sky
//! hemisphere with per-star twinkle phase.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A single star in the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Unit direction on the sky sphere; `y >= 0`.
    pub direction: DVec3,
    /// Phase of the twinkle oscillation, in `[0, 2π)`.
    pub twinkle_offset: f64,
    /// Brightness before twinkle and visibility, in `[0.8, 1.2)`.
    pub base_brightness: f64,
}

impl Star {
    /// Twinkle multiplier in `[0.6, 1.0]` at time `t`.
    #[inline]
    pub fn twinkle(&self, t: f64) -> f64 {
        0.8 + 0.2 * (t * 5.0 + self.twinkle_offset).sin()
    }

    /// Final brightness after twinkle, star visibility and fog.
    #[inline]
    pub fn brightness(&self, t: f64, visibility: f64, fog: f64) -> f64 {
        self.base_brightness * self.twinkle(t) * visibility * (1.0 - fog)
    }
}

/// Generates a deterministic star catalog from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    /// Generate the catalog. Stars are uniform over the upper hemisphere.
    pub fn generate(&self) -> Vec<Star> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.star_count)
            .map(|_| {
                let phi = TAU * rng.random::<f64>();
                let cos_theta = rng.random::<f64>();
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
                Star {
                    direction: DVec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin()),
                    twinkle_offset: rng.random::<f64>() * TAU,
                    base_brightness: 0.8 + rng.random::<f64>() * 0.4,
                }
            })
            .collect()
    }
}
