//! Per-frame orchestration: sky, then terrain, into one canvas.

use glam::DVec3;
use tracing::{info, trace};
use vista_config::Config;
use vista_player::{ControllerSettings, InputSnapshot, PlayerController};
use vista_raster::{CameraState, Framebuffer};
use vista_sky::{SkyFrameStats, SkyRenderer, SkySettings, StarfieldGenerator, day_factor, sky_color};
use vista_terrain::{
    HeightCache, HeightField, HeightFieldParams, TerrainFrameStats, TerrainRenderer,
    TerrainSettings,
};

/// Counters from one [`FrameDriver::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub sky: SkyFrameStats,
    pub terrain: TerrainFrameStats,
}

/// Everything needed to produce frames: the canvas, both renderers and the
/// player that owns the camera.
pub struct FrameDriver {
    canvas: Framebuffer,
    sky: SkyRenderer,
    terrain: TerrainRenderer,
    player: PlayerController,
}

impl FrameDriver {
    /// Build the world described by `config` and size it to the window.
    pub fn from_config(config: &Config) -> Self {
        let world = &config.world;
        let render = &config.render;

        let terrain = TerrainRenderer::new(
            HeightField::new(HeightFieldParams::with_seed(world.terrain_seed)),
            HeightCache::new(world.height_cache_capacity),
            TerrainSettings {
                z_near: render.z_near,
                z_far: render.z_far,
                lod_factor: render.lod_factor,
            },
        );
        let sky = SkyRenderer::new(
            SkySettings {
                downscale: render.sky_downscale,
                cloud_seed: world.terrain_seed as f64,
            },
            StarfieldGenerator::new(world.star_seed, world.star_count).generate(),
        );

        let [x, y, z] = config.camera.start_position;
        let camera = CameraState {
            position: DVec3::new(x, y, z),
            fov: config.camera.fov,
            ..Default::default()
        };
        let player = PlayerController::new(
            camera,
            ControllerSettings {
                mouse_sensitivity: config.camera.mouse_sensitivity,
                ..Default::default()
            },
        );

        info!(
            seed = world.terrain_seed,
            stars = world.star_count,
            "world created"
        );

        let mut driver = Self {
            canvas: Framebuffer::new(0, 0),
            sky,
            terrain,
            player,
        };
        driver.resize(config.window.width, config.window.height);
        driver
    }

    /// Reallocate the canvas and propagate the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.sky.resize(width, height);
        self.terrain.resize(width, height);
        self.player.set_aspect(width, height);
        info!(width, height, "canvas resized");
    }

    /// Advance the player by one fixed tick.
    pub fn update(&mut self, input: &InputSnapshot) {
        self.player.step(input, self.terrain.height_field());
    }

    /// Draw the frame for elapsed simulation time `time`.
    pub fn render(&mut self, time: f64) -> FrameStats {
        let camera = *self.player.camera();
        let sky = self.sky.render(&mut self.canvas, &camera, time);
        let terrain = self
            .terrain
            .draw(&mut self.canvas, &camera, day_factor(time), sky_color(time));
        trace!(
            time,
            terrain_pixels = terrain.pixels,
            cache_entries = self.terrain.cache().len(),
            "frame rendered"
        );
        FrameStats { sky, terrain }
    }

    pub fn canvas(&self) -> &Framebuffer {
        &self.canvas
    }

    pub fn camera(&self) -> &CameraState {
        self.player.camera()
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn terrain(&self) -> &TerrainRenderer {
        &self.terrain
    }

    pub fn sky(&self) -> &SkyRenderer {
        &self.sky
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn small_config(width: u32, height: u32) -> Config {
        let mut config = Config::default();
        config.window.width = width;
        config.window.height = height;
        config.world.star_count = 50;
        config.world.height_cache_capacity = 1 << 14;
        config
    }

    fn settled(config: &Config) -> FrameDriver {
        let mut driver = FrameDriver::from_config(config);
        for _ in 0..120 {
            driver.update(&InputSnapshot::default());
        }
        driver
    }

    #[test]
    fn test_from_config_sizes_everything() {
        let driver = FrameDriver::from_config(&small_config(96, 64));
        assert_eq!(driver.canvas().dimensions(), (96, 64));
        assert_eq!(driver.sky().dimensions(), (96, 64));
        assert_eq!(driver.terrain().dimensions(), (96, 64));
        assert!((driver.camera().aspect - 1.5).abs() < 1e-12);
        assert_eq!(driver.camera().position, DVec3::new(256.0, 100.0, 0.0));
    }

    #[test]
    fn test_frame_draws_sky_and_terrain() {
        let mut driver = settled(&small_config(96, 64));
        assert!(driver.player().is_grounded());
        driver.update(&InputSnapshot {
            look_delta: DVec2::new(0.0, 250.0),
            ..Default::default()
        });
        assert!((driver.camera().pitch + 0.5).abs() < 1e-12);
        let stats = driver.render(30.0);
        assert!(stats.sky.cloud_pixels > 0, "{stats:?}");
        assert!(stats.terrain.pixels > 0, "{stats:?}");
        let ys = driver.terrain().y_buffer();
        assert!(ys.iter().all(|&y| y < 64), "looking down should cover every column");
    }

    #[test]
    fn test_resize_propagates() {
        let mut driver = settled(&small_config(96, 64));
        driver.resize(50, 40);
        assert_eq!(driver.canvas().dimensions(), (50, 40));
        assert!((driver.camera().aspect - 1.25).abs() < 1e-12);
        driver.render(12.0);
        assert_eq!(driver.terrain().y_buffer().len(), 50);
    }

    #[test]
    fn test_zero_size_frame_is_skipped() {
        let mut driver = settled(&small_config(96, 64));
        driver.resize(0, 0);
        let stats = driver.render(5.0);
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn test_walking_moves_camera() {
        let mut driver = settled(&small_config(32, 24));
        let start = driver.camera().position;
        let walk = InputSnapshot {
            forward: true,
            ..Default::default()
        };
        for _ in 0..30 {
            driver.update(&walk);
        }
        assert!(driver.camera().position.z > start.z + 10.0);
    }

    #[test]
    fn test_same_config_renders_same_frame() {
        let config = small_config(64, 48);
        let mut a = settled(&config);
        let mut b = settled(&config);
        a.render(17.0);
        b.render(17.0);
        assert_eq!(a.canvas().pixels(), b.canvas().pixels());
    }
}
