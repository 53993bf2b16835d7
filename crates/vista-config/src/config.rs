//! Configuration structs with defaults, validation, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Renderer tuning.
    pub render: RenderConfig,
    /// World generation.
    pub world: WorldConfig,
    /// Starting camera and mouse look.
    pub camera: CameraConfig,
    /// Headless frame capture.
    pub capture: CaptureConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Allow the window to be resized.
    pub resizable: bool,
}

/// Renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Ratio between the canvas and the sky's offscreen buffer.
    pub sky_downscale: u32,
    /// Depth of the first terrain slice.
    pub z_near: f64,
    /// Depth at which terrain marching stops.
    pub z_far: f64,
    /// Growth of terrain slice spacing and column stride with depth.
    pub lod_factor: f64,
}

/// World generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of the terrain height field; also seeds the clouds.
    pub terrain_seed: i32,
    /// Seed of the star catalog.
    pub star_seed: u64,
    /// Number of stars.
    pub star_count: u32,
    /// Maximum number of memoized height samples.
    pub height_cache_capacity: usize,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position `[x, y, z]`.
    pub start_position: [f64; 3],
    /// Vertical field of view in radians.
    pub fov: f64,
    /// Radians per pixel of mouse movement.
    pub mouse_sensitivity: f64,
}

/// Headless capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// Frames to render without a window. 0 opens a window instead.
    pub frames: u32,
    /// Directory the captured PNGs are written to.
    pub output_dir: PathBuf,
    /// Simulated seconds between captured frames.
    pub frame_interval: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Vista".to_string(),
            resizable: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sky_downscale: 6,
            z_near: 5.0,
            z_far: 120.0,
            lod_factor: 0.015,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            terrain_seed: 0,
            star_seed: 0,
            star_count: 500,
            height_cache_capacity: 1 << 20,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [256.0, 100.0, 0.0],
            fov: 1.2,
            mouse_sensitivity: 0.002,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frames: 0,
            output_dir: PathBuf::from("frames"),
            frame_interval: 0.25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Config {
    /// Reject values the renderers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid(
                "window",
                format!("dimensions {}x{} must be non-zero", self.window.width, self.window.height),
            ));
        }
        if self.render.sky_downscale == 0 {
            return Err(invalid("render.sky_downscale", "must be at least 1"));
        }
        let (near, far) = (self.render.z_near, self.render.z_far);
        if !(near.is_finite() && far.is_finite() && near > 0.0 && near < far) {
            return Err(invalid(
                "render.z_near",
                format!("need 0 < z_near < z_far, got {near} and {far}"),
            ));
        }
        if !(self.render.lod_factor.is_finite() && self.render.lod_factor > 0.0) {
            return Err(invalid(
                "render.lod_factor",
                format!("must be positive, got {}", self.render.lod_factor),
            ));
        }
        if self.world.height_cache_capacity == 0 {
            return Err(invalid("world.height_cache_capacity", "must be non-zero"));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < std::f64::consts::PI) {
            return Err(invalid(
                "camera.fov",
                format!("must lie in (0, π), got {}", self.camera.fov),
            ));
        }
        if !(self.capture.frame_interval.is_finite() && self.capture.frame_interval >= 0.0) {
            return Err(invalid(
                "capture.frame_interval",
                format!("must be non-negative, got {}", self.capture.frame_interval),
            ));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read the file: `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("star_count: 500"));
        assert!(ron_str.contains("sky_downscale: 6"));
    }

    #[test]
    fn test_defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(window: (width: 800))").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases: Vec<(&str, Box<dyn Fn(&mut Config)>)> = vec![
            ("window", Box::new(|c| c.window.width = 0)),
            ("window", Box::new(|c| c.window.height = 0)),
            ("render.sky_downscale", Box::new(|c| c.render.sky_downscale = 0)),
            ("render.z_near", Box::new(|c| c.render.z_near = 200.0)),
            ("render.z_near", Box::new(|c| c.render.z_near = c.render.z_far)),
            ("render.lod_factor", Box::new(|c| c.render.lod_factor = 0.0)),
            ("render.lod_factor", Box::new(|c| c.render.lod_factor = f64::NAN)),
            ("world.height_cache_capacity", Box::new(|c| c.world.height_cache_capacity = 0)),
            ("camera.fov", Box::new(|c| c.camera.fov = 0.0)),
        ];
        for (expected, mutate) in cases {
            let mut config = Config::default();
            mutate(&mut config);
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.world.terrain_seed = -42;
        config.capture.output_dir = PathBuf::from("/tmp/shots");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("vista");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.render.z_far = 200.0;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.render.z_far), Some(200.0));
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)), "{err}");
    }
}
