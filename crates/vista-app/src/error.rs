//! Application error types.

use std::path::PathBuf;

use crate::platform::PlatformError;

/// Fatal start-up and output errors. Rendering itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] vista_config::ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write frame {}: {source}", path.display())]
    Capture {
        path: PathBuf,
        #[source]
        source: vista_raster::RasterError,
    },
}
