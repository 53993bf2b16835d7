//! Configuration for the vista renderer.
//!
//! Settings persist to disk as a RON file, accept CLI overrides via clap,
//! and are validated once at start-up. Unknown and missing fields are
//! tolerated so older and newer config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, CaptureConfig, Config, DebugConfig, RenderConfig, WindowConfig, WorldConfig,
};
pub use error::ConfigError;
