//! Normalized multi-octave composition of any 2D noise source.

use noise::NoiseFn;

/// Sums `octaves` samples of `source` at doubling frequency and halving
/// amplitude, divided by the total amplitude.
///
/// For a source in `[0, 1)` the result stays in `[0, 1)` whatever the octave
/// count.
#[derive(Clone, Debug)]
pub struct Fractal<N> {
    source: N,
    octaves: u32,
}

impl<N> Fractal<N> {
    pub const DEFAULT_OCTAVES: u32 = 4;

    pub fn new(source: N) -> Self {
        Self {
            source,
            octaves: Self::DEFAULT_OCTAVES,
        }
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }
}

impl<N: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Fractal<N> {
    fn get(&self, point: [f64; 2]) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            total += self
                .source
                .get([point[0] * frequency, point[1] * frequency])
                * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        total / max_amplitude
    }
}
