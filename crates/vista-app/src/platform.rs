//! Platform directory resolution.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "vista";

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// OS-specific directories (XDG on Linux, Known Folders on Windows,
/// Library on macOS).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log of debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the platform directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let log_dir = dirs::state_dir()
            .or_else(dirs::cache_dir)
            .map(|d| d.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| base.join(APP_NAME).join("logs"));
        Ok(Self {
            config_dir: base.join(APP_NAME),
            log_dir,
        })
    }

    /// Use `config_dir` for configuration, with logs beneath it.
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            log_dir: config_dir.join("logs"),
            config_dir,
        }
    }

    /// Directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self::with_config_dir(root.join(APP_NAME))
    }

    /// Create every directory on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
