//! First-person walker: mouse look, WASD acceleration with friction, jump
//! and gravity, with ground contact resolved through a height query.

mod controller;
mod input;

pub use controller::{ControllerSettings, PlayerController};
pub use input::InputSnapshot;
