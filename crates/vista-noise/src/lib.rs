//! Deterministic value noise shared by the terrain and sky renderers.
//!
//! Two hash families feed the same smoothing pipeline: an integer avalanche
//! hash ([`LatticeNoise`]) used for terrain, and a sine hash ([`SineNoise`])
//! used for clouds. Both implement [`noise::NoiseFn`] so they compose with
//! [`Fractal`] and with anything else written against that trait.

mod blend;
mod fractal;
mod lattice;
mod sine;

pub use blend::{cosine_interpolate, lerp, smooth_bilinear, smoothstep};
pub use fractal::Fractal;
pub use lattice::{LatticeNoise, lattice_hash};
pub use noise::NoiseFn;
pub use sine::{SineNoise, sine_hash};
