//! Software rasterization primitives shared by the sky and terrain renderers.
//!
//! Everything here works on plain CPU memory: a fractional [`Rgb`] color
//! type that only clamps when committed, a packed-pixel [`Framebuffer`],
//! and the [`CameraState`] snapshot the renderers read each frame.

mod camera;
mod color;
mod error;
mod framebuffer;

pub use camera::{CameraBasis, CameraState, PITCH_LIMIT};
pub use color::Rgb;
pub use error::RasterError;
pub use framebuffer::Framebuffer;
