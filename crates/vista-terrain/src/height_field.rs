//! Layered value-noise elevation function.
//!
//! Height is a pure function of `(x, z, seed)`: a sum of cosine-smoothed
//! lattice-noise octaves, a broad ridge term, and a linear downhill bias
//! toward +z so the landscape is not isotropic.

use vista_noise::LatticeNoise;

/// Parameters of the elevation function.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightFieldParams {
    /// Terrain seed. Every octave and the ridge derive their noise seed from it.
    pub seed: i32,
    /// Number of detail octaves.
    pub octaves: u32,
    /// Frequency of the first octave; doubles per octave.
    pub base_scale: f64,
    /// Amplitude of the first octave; halves per octave.
    pub base_amplitude: f64,
    /// Seed offset between successive octaves.
    pub octave_seed_stride: i32,
    /// Frequency of the ridge term.
    pub ridge_scale: f64,
    /// Seed offset of the ridge noise.
    pub ridge_seed_offset: i32,
    /// Height of a full ridge.
    pub ridge_amplitude: f64,
    /// Elevation lost per unit of +z.
    pub slope: f64,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 5,
            base_scale: 0.01,
            base_amplitude: 50.0,
            octave_seed_stride: 1000,
            ridge_scale: 0.005,
            ridge_seed_offset: 99,
            ridge_amplitude: 20.0,
            slope: 0.03,
        }
    }
}

impl HeightFieldParams {
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Anything that can answer "how high is the ground at `(x, z)`".
///
/// The movement integrator resolves ground contact through this trait so it
/// never depends on rendering internals. Plain closures implement it too.
pub trait HeightQuery {
    fn height_at(&self, x: f64, z: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> HeightQuery for F {
    fn height_at(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

struct Octave {
    noise: LatticeNoise,
    scale: f64,
    amplitude: f64,
}

/// The deterministic terrain elevation function.
pub struct HeightField {
    params: HeightFieldParams,
    octaves: Vec<Octave>,
    ridge: LatticeNoise,
}

impl HeightField {
    pub fn new(params: HeightFieldParams) -> Self {
        let mut scale = params.base_scale;
        let mut amplitude = params.base_amplitude;
        let octaves = (0..params.octaves as i32)
            .map(|o| {
                let octave = Octave {
                    noise: LatticeNoise::new(
                        params
                            .seed
                            .wrapping_add(o.wrapping_mul(params.octave_seed_stride)),
                    ),
                    scale,
                    amplitude,
                };
                scale *= 2.0;
                amplitude *= 0.5;
                octave
            })
            .collect();
        let ridge = LatticeNoise::new(params.seed.wrapping_add(params.ridge_seed_offset));

        Self {
            params,
            octaves,
            ridge,
        }
    }

    /// Elevation at world `(x, z)`.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        let mut height = 0.0;
        for octave in &self.octaves {
            height += octave.noise.sample(x * octave.scale, z * octave.scale) * octave.amplitude;
        }

        let ridge_scale = self.params.ridge_scale;
        let ridge = (self.ridge.sample(x * ridge_scale, z * ridge_scale) - 0.5).abs() * 2.0;
        height += ridge * self.params.ridge_amplitude;

        height - z * self.params.slope
    }

    pub fn seed(&self) -> i32 {
        self.params.seed
    }

    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }

    /// Upper bound of the noise contribution (octaves plus ridge), ignoring
    /// the slope term.
    pub fn max_relief(&self) -> f64 {
        self.octaves.iter().map(|o| o.amplitude).sum::<f64>() + self.params.ridge_amplitude
    }
}

impl HeightQuery for HeightField {
    fn height_at(&self, x: f64, z: f64) -> f64 {
        self.height(x, z)
    }
}
