//! Low-resolution sky dome: per-pixel view rays against a cloud plane
//! above and a void plane below, upscaled with bilinear filtering, then a
//! star overlay at full resolution.

use glam::DVec3;
use tracing::{debug, trace};
use vista_noise::{Fractal, NoiseFn, SineNoise, lerp, smoothstep};
use vista_raster::{CameraBasis, CameraState, Framebuffer, Rgb};

use crate::day_night::{Atmosphere, day_factor, sky_color};
use crate::starfield::Star;

const CLOUD_PLANE_Y: f64 = 240.0;
const CLOUD_SCALE: f64 = 0.025;
const CLOUD_SPEED: f64 = 1.0;
const CLOUD_THRESHOLD: f64 = 0.5;
const CLOUD_SOFTNESS: f64 = 0.1;
/// Applied to the cloud hit distance to flatten the plane near the horizon.
const PERSPECTIVE_EXPONENT: f64 = 0.45;
const CLOUD_FOG_START: f64 = 1.0;
const CLOUD_FOG_END: f64 = 5000.0;

const VOID_PLANE_Y: f64 = 0.0;
const VOID_FOG_START: f64 = 1.0;
const VOID_FOG_END: f64 = 2000.0;
const VOID_LIGHTEN: f64 = 0.2;

const SUN_BOOST: f64 = 0.1;

const TOP_NIGHT_FADE: f64 = 0.5;
const BOTTOM_NIGHT_FADE: f64 = 0.7;

const STAR_DISTANCE: f64 = 4000.0;
const STAR_RADIUS: f64 = 1.2;
const MIN_STAR_VISIBILITY: f64 = 0.01;
const MIN_STAR_BRIGHTNESS: f64 = 0.01;

/// Sky renderer settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkySettings {
    /// Ratio between the surface and offscreen buffer sizes.
    pub downscale: u32,
    /// Seed of the cloud noise.
    pub cloud_seed: f64,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            downscale: 6,
            cloud_seed: 0.0,
        }
    }
}

/// Counters from one [`SkyRenderer::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkyFrameStats {
    /// Offscreen pixels whose ray hit the cloud plane.
    pub cloud_pixels: u32,
    /// Offscreen pixels whose ray hit the void plane.
    pub void_pixels: u32,
    /// Offscreen pixels left with the background gradient.
    pub open_pixels: u32,
    pub stars_drawn: u32,
}

/// Intersection with a horizontal plane, in ray-parameter units.
#[inline]
fn plane_distance(plane_y: f64, origin_y: f64, ray_y: f64) -> f64 {
    (plane_y - origin_y) / ray_y
}

#[inline]
fn cloud_fog(distance: f64) -> f64 {
    smoothstep(CLOUD_FOG_START, CLOUD_FOG_END, distance)
}

#[inline]
fn void_fog(distance: f64) -> f64 {
    smoothstep(VOID_FOG_START, VOID_FOG_END, distance)
}

fn fade_to_black(color: Rgb, alpha: f64) -> Rgb {
    color.scale(1.0 - alpha).rounded()
}

/// Renders sky, clouds and stars into a full-size framebuffer.
pub struct SkyRenderer {
    settings: SkySettings,
    clouds: Fractal<SineNoise>,
    stars: Vec<Star>,
    sun_direction: DVec3,
    offscreen: Framebuffer,
    width: u32,
    height: u32,
}

impl SkyRenderer {
    pub fn new(settings: SkySettings, stars: Vec<Star>) -> Self {
        let settings = SkySettings {
            downscale: settings.downscale.max(1),
            ..settings
        };
        Self {
            clouds: Fractal::new(SineNoise::new(settings.cloud_seed)),
            settings,
            stars,
            sun_direction: DVec3::new(0.3, 0.5, 0.7).normalize(),
            offscreen: Framebuffer::new(0, 0),
            width: 0,
            height: 0,
        }
    }

    /// Adopt new surface dimensions. The offscreen buffer becomes
    /// `ceil(width / downscale) × ceil(height / downscale)`.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let d = self.settings.downscale;
        self.offscreen.resize(width.div_ceil(d), height.div_ceil(d));
        debug!(
            width,
            height,
            offscreen = ?self.offscreen.dimensions(),
            "sky renderer resized"
        );
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn settings(&self) -> &SkySettings {
        &self.settings
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// The low-resolution buffer from the last render.
    pub fn offscreen(&self) -> &Framebuffer {
        &self.offscreen
    }

    /// Same as [`day_factor`]; exposed so callers need only the renderer.
    pub fn day_factor(&self, time: f64) -> f64 {
        day_factor(time)
    }

    /// Same as [`sky_color`]; the color terrain fog should match.
    pub fn sky_color(&self, time: f64) -> Rgb {
        sky_color(time)
    }

    /// Render the sky at elapsed `time` over the whole of `target`.
    ///
    /// A target whose size differs from the last [`resize`](Self::resize)
    /// skips the frame.
    pub fn render(
        &mut self,
        target: &mut Framebuffer,
        camera: &CameraState,
        time: f64,
    ) -> SkyFrameStats {
        let mut stats = SkyFrameStats::default();
        if target.dimensions() != (self.width, self.height) {
            debug!(
                target = ?target.dimensions(),
                expected = ?(self.width, self.height),
                "sky render skipped: surface size mismatch"
            );
            return stats;
        }
        if target.is_empty() {
            return stats;
        }

        let atmo = Atmosphere::at(time);
        let basis = camera.basis();
        self.trace_dome(camera, &basis, &atmo, &mut stats);
        self.offscreen.upscale_into(target);
        stats.stars_drawn = self.draw_stars(target, camera, &basis, &atmo);

        trace!(
            cloud = stats.cloud_pixels,
            void = stats.void_pixels,
            open = stats.open_pixels,
            stars = stats.stars_drawn,
            day_factor = atmo.day_factor,
            "sky frame"
        );
        stats
    }

    fn trace_dome(
        &mut self,
        camera: &CameraState,
        basis: &CameraBasis,
        atmo: &Atmosphere,
        stats: &mut SkyFrameStats,
    ) {
        let night = atmo.night_alpha();
        self.offscreen.fill_vertical_gradient(
            fade_to_black(atmo.sky_top, night * TOP_NIGHT_FADE),
            fade_to_black(atmo.sky_bottom, night * BOTTOM_NIGHT_FADE),
        );

        let (w, h) = self.offscreen.dimensions();
        let tan_half_fov = camera.tan_half_fov();
        let void_tone = atmo.horizon.lerp_rounded(Rgb::WHITE, VOID_LIGHTEN);
        let origin = camera.position;

        for py in 0..h {
            let ndc_y = 1.0 - 2.0 * (py as f64 / h as f64);
            for px in 0..w {
                let ndc_x = 2.0 * (px as f64 / w as f64) - 1.0;
                let Some(ray) = basis.view_ray(ndc_x, ndc_y, tan_half_fov, camera.aspect) else {
                    stats.open_pixels += 1;
                    continue;
                };

                let color = if ray.y > 0.0 {
                    self.cloud_color(origin, ray, atmo)
                } else if ray.y < 0.0 {
                    let t = plane_distance(VOID_PLANE_Y, origin.y, ray.y);
                    (t > 0.0).then(|| {
                        let blend = void_fog(t.min(VOID_FOG_END));
                        atmo.sky_bottom.lerp_rounded(void_tone, blend)
                    })
                } else {
                    None
                };

                match color {
                    Some(c) => {
                        if ray.y > 0.0 {
                            stats.cloud_pixels += 1;
                        } else {
                            stats.void_pixels += 1;
                        }
                        self.offscreen.set(px, py, c);
                    }
                    None => stats.open_pixels += 1,
                }
            }
        }
    }

    fn cloud_color(&self, origin: DVec3, ray: DVec3, atmo: &Atmosphere) -> Option<Rgb> {
        let altitude = CLOUD_PLANE_Y - origin.y;
        let adjust = lerp(1.0, 5.0, ((0.2 - ray.y) / 0.2).clamp(0.0, 1.0));
        let t_raw = plane_distance(CLOUD_PLANE_Y, origin.y, ray.y) * adjust;
        if t_raw.is_nan() || t_raw <= 0.0 {
            return None;
        }
        let t_eff = altitude * (t_raw / altitude).powf(PERSPECTIVE_EXPONENT);
        let drift = atmo.time * CLOUD_SPEED;
        let wx = origin.x + ray.x * t_eff + drift;
        let wz = origin.z + ray.z * t_eff + drift;
        let n = self.clouds.get([wx * CLOUD_SCALE, wz * CLOUD_SCALE]);
        let cover = ((n - CLOUD_THRESHOLD) / CLOUD_SOFTNESS).clamp(0.0, 1.0);

        let fogged = atmo
            .sky_bottom
            .lerp(atmo.cloud, cover)
            .lerp(atmo.horizon, cloud_fog(t_raw.min(CLOUD_FOG_END)));
        let light = ray.dot(self.sun_direction).max(0.0);
        Some(fogged.scale(1.0 + SUN_BOOST * light).min_255())
    }

    fn draw_stars(
        &self,
        target: &mut Framebuffer,
        camera: &CameraState,
        basis: &CameraBasis,
        atmo: &Atmosphere,
    ) -> u32 {
        if atmo.star_visibility <= MIN_STAR_VISIBILITY {
            return 0;
        }
        let fog = cloud_fog(STAR_DISTANCE);
        let scale = camera.tan_half_fov();
        let (w, h) = (target.width() as f64, target.height() as f64);
        let mut drawn = 0;
        for star in &self.stars {
            let c = basis.to_camera_space(star.direction);
            if c.z <= 0.0 {
                continue;
            }
            let ndc_x = c.x / (c.z * scale * camera.aspect);
            let ndc_y = c.y / (c.z * scale);
            let sx = (ndc_x + 1.0) * 0.5 * w;
            let sy = (1.0 - ndc_y) * 0.5 * h;
            let brightness = star.brightness(atmo.time, atmo.star_visibility, fog);
            if brightness <= MIN_STAR_BRIGHTNESS {
                continue;
            }
            target.fill_disc(sx, sy, STAR_RADIUS, Rgb::WHITE, brightness.min(1.0));
            drawn += 1;
        }
        drawn
    }
}
