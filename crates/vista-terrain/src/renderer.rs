//! Depth-sliced ray-marching terrain renderer.
//!
//! Each frame marches outward from the near plane in slices whose spacing
//! grows with depth. Every slice maps the screen columns to a line of world
//! positions, samples the height field at coarse column strides, projects
//! the interpolated heights to screen rows, and paints the vertical span
//! between that row and whatever a nearer slice already claimed.

use tracing::{debug, trace};
use vista_raster::{CameraState, Framebuffer, Rgb};

use crate::cache::{CachedHeightField, HeightCache};
use crate::height_field::HeightField;
use crate::occlusion::ColumnOcclusion;
use crate::shading::{FrameLighting, TerrainShader};

const FOV_SCALE: f64 = 1.4;
const PROJECTION_SCALE: f64 = 280.0 / FOV_SCALE;
const VERTICAL_EXAGGERATION: f64 = 1.5;
/// Pixels the horizon moves per radian of pitch.
const HORIZON_PITCH_SHIFT: f64 = 300.0;

/// Marching range and level-of-detail settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSettings {
    /// Depth of the first slice.
    pub z_near: f64,
    /// Slices at or beyond this depth are not marched.
    pub z_far: f64,
    /// Growth of slice spacing and column stride with depth.
    pub lod_factor: f64,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            z_near: 5.0,
            z_far: 120.0,
            lod_factor: 0.015,
        }
    }
}

impl TerrainSettings {
    /// Distance to the next slice after depth `z`.
    #[inline]
    pub fn slice_step(&self, z: f64) -> f64 {
        1.0 + z * self.lod_factor
    }

    /// Column stride used at depth `z`.
    #[inline]
    pub fn column_stride(&self, z: f64) -> usize {
        ((z * self.lod_factor * 2.0).floor() as usize).max(1)
    }
}

/// Counters from one [`TerrainRenderer::draw`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainFrameStats {
    pub slices: u32,
    pub column_samples: u64,
    pub spans: u64,
    pub pixels: u64,
}

/// Renders the height field into a framebuffer that already holds the sky.
pub struct TerrainRenderer {
    heights: CachedHeightField,
    shader: TerrainShader,
    settings: TerrainSettings,
    occlusion: ColumnOcclusion,
    width: u32,
    height: u32,
}

impl TerrainRenderer {
    pub fn new(field: HeightField, cache: HeightCache, settings: TerrainSettings) -> Self {
        let shader = TerrainShader::new(field.seed());
        Self {
            heights: CachedHeightField::new(field, cache),
            shader,
            settings,
            occlusion: ColumnOcclusion::default(),
            width: 0,
            height: 0,
        }
    }

    /// Adopt new surface dimensions for the following frames.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.occlusion.reset(width, height);
        debug!(width, height, "terrain renderer resized");
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// The pure elevation function, also usable as a ground query.
    pub fn height_field(&self) -> &HeightField {
        self.heights.field()
    }

    pub fn cache(&self) -> &HeightCache {
        self.heights.cache()
    }

    /// Topmost claimed row of every column after the last draw.
    pub fn y_buffer(&self) -> &[u32] {
        self.occlusion.y_buffer()
    }

    /// Draw one frame of terrain over `target`.
    ///
    /// `day_factor` and `sky_color` come from the day-night model so fog and
    /// tint match the sky. A target whose size differs from the last
    /// [`resize`](Self::resize), or a degenerate surface, skips the frame.
    pub fn draw(
        &mut self,
        target: &mut Framebuffer,
        camera: &CameraState,
        day_factor: f64,
        sky_color: Rgb,
    ) -> TerrainFrameStats {
        let mut stats = TerrainFrameStats::default();
        let (w, h) = (self.width, self.height);
        if target.dimensions() != (w, h) {
            debug!(
                target = ?target.dimensions(),
                expected = ?(w, h),
                "terrain draw skipped: surface size mismatch"
            );
            return stats;
        }
        self.occlusion.reset(w, h);
        let half_w = (w / 2) as f64;
        if half_w == 0.0 || h == 0 {
            return stats;
        }

        let lighting = FrameLighting::new(day_factor, sky_color);
        let (sin_yaw, cos_yaw) = camera.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = camera.pitch.sin_cos();
        let horizon = h as f64 / 2.0 + camera.pitch * HORIZON_PITCH_SHIFT;
        let cam = camera.position;
        let width = w as usize;
        let settings = self.settings;

        let mut z = settings.z_near;
        while z < settings.z_far {
            stats.slices += 1;
            let inv_z = 1.0 / z;
            let centre_x = cam.x + z * sin_yaw;
            let centre_z = cam.z + z * cos_yaw;
            let step_x = z * cos_yaw / half_w;
            let step_z = -z * sin_yaw / half_w;
            let stride = settings.column_stride(z);

            for x in (0..width).step_by(stride) {
                let proj = x as f64 - half_w;
                let next_proj = proj + stride as f64;
                let (wx1, wz1) = (centre_x + proj * step_x, centre_z + proj * step_z);
                let (wx2, wz2) = (centre_x + next_proj * step_x, centre_z + next_proj * step_z);
                let h1 = self.heights.height(wx1, wz1);
                let h2 = self.heights.height(wx2, wz2);

                for i in 0..stride {
                    let xi = x + i;
                    if xi >= width {
                        break;
                    }
                    stats.column_samples += 1;
                    let t = i as f64 / stride as f64;
                    let world_x = wx1 * (1.0 - t) + wx2 * t;
                    let world_z = wz1 * (1.0 - t) + wz2 * t;
                    let elevation = h1 * (1.0 - t) + h2 * t;

                    let projected = ((elevation - cam.y) * cos_pitch - z * sin_pitch)
                        * inv_z
                        * PROJECTION_SCALE
                        * VERTICAL_EXAGGERATION;
                    let Some(rows) = self.occlusion.claim(xi, horizon - projected) else {
                        continue;
                    };

                    let color = self.shader.shade(
                        &mut self.heights,
                        world_x,
                        world_z,
                        elevation,
                        z,
                        &lighting,
                    );
                    let pixels = target.pixels_mut();
                    for y in rows.clone() {
                        let fog = lighting.fog_amount(z, y as f64, horizon);
                        pixels[y as usize * width + xi] = lighting.apply_fog(color, fog).to_argb();
                    }
                    stats.spans += 1;
                    stats.pixels += (rows.end - rows.start) as u64;
                }
            }

            z += settings.slice_step(z);
        }

        trace!(
            slices = stats.slices,
            samples = stats.column_samples,
            spans = stats.spans,
            pixels = stats.pixels,
            cache_entries = self.heights.cache().len(),
            "terrain frame"
        );
        stats
    }
}
