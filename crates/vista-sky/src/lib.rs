//! Day-night model, star catalog, and the ray-traced sky dome.
//!
//! The day-night functions are pure in elapsed time so the terrain renderer
//! can query the same atmosphere without sharing state with the sky.

mod day_night;
mod renderer;
mod starfield;

pub use day_night::{
    Atmosphere, DAY_CYCLE_PERIOD, cloud_color, day_factor, horizon_color, sky_bottom_color,
    sky_color, sky_top_color, star_visibility,
};
pub use renderer::{SkyFrameStats, SkyRenderer, SkySettings};
pub use starfield::{Star, StarfieldGenerator};
