//! Frame driver for the vista renderer.
//!
//! Owns the canvas, both renderers and the player, advances the simulation
//! at a fixed rate, and presents frames either to a window or to PNG files.

pub mod capture;
mod error;
pub mod frame;
pub mod game_loop;
pub mod platform;
pub mod window;

pub use error::AppError;
pub use frame::{FrameDriver, FrameStats};
