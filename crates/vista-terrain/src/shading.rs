//! Terrain surface color: blended biomes, procedural detail, slope lighting,
//! and the depth/elevation fog model.
//!
//! The constants are tuned for the look rather than derived from physics.

use std::f64::consts::PI;

use vista_noise::{LatticeNoise, lerp};
use vista_raster::Rgb;

use crate::cache::CachedHeightField;

const SHORE_COLOR: Rgb = Rgb::new(194.0, 178.0, 128.0);
const PLAINS_COLOR: Rgb = Rgb::new(120.0, 180.0, 80.0);
const FOREST_COLOR: Rgb = Rgb::new(80.0, 140.0, 60.0);
const TAIGA_COLOR: Rgb = Rgb::new(50.0, 100.0, 50.0);

const FOG_COLOR_DAY: Rgb = Rgb::new(155.0, 185.0, 215.0);
const FOG_COLOR_NIGHT: Rgb = Rgb::new(40.0, 50.0, 80.0);
/// Share of the sky color mixed into the fog color.
const FOG_SKY_MIX: f64 = 0.4;
/// Fog per unit of depth-plus-weighted-row-distance.
const FOG_STRENGTH: f64 = 0.0025;
/// Weight of the row distance from the horizon in the fog distance.
const FOG_ROW_WEIGHT: f64 = 0.3;
/// Share of the sky color tinted into every shaded fragment.
const SKY_TINT: f64 = 0.3;

const MOISTURE_SCALE: f64 = 0.001;
const MOISTURE_SEED_OFFSET: i32 = 5000;
const BUMP_SCALE: f64 = 0.02;
const BUMP_SEED_OFFSET: i32 = 1234;
const JITTER_SCALE: f64 = 0.015;
const CONTOUR_FREQUENCY: f64 = 0.15;

/// Azimuth of the sun used for terrain slope lighting.
const SUN_AZIMUTH: f64 = -PI / 3.0;
/// Horizontal distance to the neighbour sample used for the slope.
const SLOPE_PROBE: f64 = 3.0;
/// Beyond this depth slope lighting is replaced by a height-only estimate.
const FAR_LIGHTING_DEPTH: f64 = 80.0;
const AO_EXPONENT: f64 = 1.5;

/// Normalized height used for biome and luminance decisions, in `[0, 1]`.
#[inline]
pub fn normalized_height(h: f64) -> f64 {
    ((h - 10.0) * 0.008).clamp(0.0, 1.0)
}

/// Soft biome membership weights. They are blended, never thresholded, so
/// neighbouring biomes fade into each other without seams.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeWeights {
    pub shore: f64,
    pub taiga: f64,
    pub forest: f64,
    pub plains: f64,
}

impl BiomeWeights {
    pub fn new(h_norm: f64, moisture: f64) -> Self {
        let shore = (1.0 - h_norm * 5.0).max(0.0).powi(2);
        let taiga = ((h_norm - 0.65) * 3.0 + (moisture - 0.6) * 2.0).max(0.0);
        let forest = (1.0 - (moisture - 0.55).abs() * 2.5).max(0.0);
        let plains = ((1.0 - moisture) * 1.6 * (1.0 - taiga)).max(0.0);
        Self {
            shore,
            taiga,
            forest,
            plains,
        }
    }

    /// Weighted average of the biome palette.
    pub fn color(&self) -> Rgb {
        let sum = self.shore + self.taiga + self.forest + self.plains;
        let sum = if sum == 0.0 { 1.0 } else { sum };
        let weighted = |pick: fn(&Rgb) -> f64| {
            (pick(&SHORE_COLOR) * self.shore
                + pick(&PLAINS_COLOR) * self.plains
                + pick(&FOREST_COLOR) * self.forest
                + pick(&TAIGA_COLOR) * self.taiga)
                / sum
        };
        Rgb::new(weighted(|c| c.r), weighted(|c| c.g), weighted(|c| c.b))
    }
}

/// Lighting and fog parameters that are constant across one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLighting {
    pub ambient: f64,
    pub light_intensity: f64,
    /// Global dimming applied after lighting; low at night.
    pub night_dimming: f64,
    pub fog_color: Rgb,
    pub sky_color: Rgb,
    sun_x: f64,
    sun_z: f64,
}

impl FrameLighting {
    pub fn new(day_factor: f64, sky_color: Rgb) -> Self {
        let day_factor = day_factor.clamp(0.0, 1.0);
        let fog_base = FOG_COLOR_NIGHT.lerp(FOG_COLOR_DAY, day_factor);
        Self {
            ambient: lerp(0.15, 0.35, day_factor),
            light_intensity: lerp(0.5, 1.5, day_factor),
            night_dimming: lerp(0.2, 1.0, day_factor),
            fog_color: fog_base.lerp(sky_color, FOG_SKY_MIX),
            sky_color,
            sun_x: SUN_AZIMUTH.sin(),
            sun_z: SUN_AZIMUTH.cos(),
        }
    }

    /// Fog amount in `[0, 1]` for a fragment at depth `z` drawn on `row`.
    #[inline]
    pub fn fog_amount(&self, z: f64, row: f64, horizon: f64) -> f64 {
        ((z + (row - horizon).abs() * FOG_ROW_WEIGHT) * FOG_STRENGTH).min(1.0)
    }

    /// Blend `color` toward the fog color.
    #[inline]
    pub fn apply_fog(&self, color: Rgb, fog: f64) -> Rgb {
        color.lerp(self.fog_color, fog)
    }
}

/// Per-seed noise sources used to color the terrain.
pub struct TerrainShader {
    moisture: LatticeNoise,
    bump: LatticeNoise,
    jitter: LatticeNoise,
}

impl TerrainShader {
    pub fn new(seed: i32) -> Self {
        Self {
            moisture: LatticeNoise::new(seed.wrapping_add(MOISTURE_SEED_OFFSET)),
            bump: LatticeNoise::new(seed.wrapping_add(BUMP_SEED_OFFSET)),
            jitter: LatticeNoise::new(seed),
        }
    }

    /// Unfogged color of the surface at world `(x, z)` with elevation `h`,
    /// seen from depth `depth`.
    pub fn shade(
        &self,
        heights: &mut CachedHeightField,
        x: f64,
        z: f64,
        h: f64,
        depth: f64,
        lighting: &FrameLighting,
    ) -> Rgb {
        let h_norm = normalized_height(h);
        let moisture = self.moisture.sample(x * MOISTURE_SCALE, z * MOISTURE_SCALE);
        let bump_noise = self.bump.sample(x * BUMP_SCALE, z * BUMP_SCALE);
        let jitter = self.jitter.sample(x * JITTER_SCALE, z * JITTER_SCALE);

        let base = BiomeWeights::new(h_norm, moisture).color();

        let height_lum = 0.8 + h_norm * 0.25;
        let jitter_factor = 1.0 + (jitter - 0.5) * 0.08;
        let bump = 1.0 + (bump_noise - 0.5) * 0.1;
        let contour = 1.0 + (h * CONTOUR_FREQUENCY).sin() * 0.05;
        let k = height_lum * jitter_factor * contour * bump;
        let detailed = Rgb::new(base.r * k, base.g * k * 0.98, base.b * k * 0.96);

        let mut light = if depth > FAR_LIGHTING_DEPTH {
            0.8 + (h_norm - 0.5) * 0.4
        } else {
            let neighbour = heights.height(
                x - lighting.sun_x * SLOPE_PROBE,
                z - lighting.sun_z * SLOPE_PROBE,
            );
            let slope = (h - neighbour) / SLOPE_PROBE;
            let direct = lighting.light_intensity * (0.5 + slope * 0.15).clamp(0.0, 1.0);
            let lit = lighting.ambient + direct * (1.0 - lighting.ambient);
            let ao = 0.85 + 0.15 * ((h - 5.0) / 180.0 + (slope * 0.02).min(0.0)).clamp(0.0, 1.0);
            lit * ao.powf(AO_EXPONENT)
        };
        light *= lighting.night_dimming;

        detailed
            .scale(light)
            .min_255()
            .lerp(lighting.sky_color, SKY_TINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeightCache, HeightField, HeightFieldParams};

    #[test]
    fn test_low_dry_ground_is_mostly_shore() {
        let w = BiomeWeights::new(0.0, 0.2);
        assert!(w.shore >= w.forest && w.shore >= w.taiga);
        assert_eq!(w.taiga, 0.0);
    }

    #[test]
    fn test_high_wet_ground_favours_taiga() {
        let w = BiomeWeights::new(1.0, 0.9);
        assert!(w.taiga > w.plains, "{w:?}");
        assert_eq!(w.shore, 0.0);
    }

    #[test]
    fn test_biome_color_is_convex_blend_of_palette() {
        for &(h, m) in &[(0.0, 0.0), (0.3, 0.5), (0.9, 1.0), (0.5, 0.55), (1.0, 0.0)] {
            let c = BiomeWeights::new(h, m).color();
            assert!((50.0 - 1e-9..=194.0 + 1e-9).contains(&c.r), "r={} at ({h}, {m})", c.r);
            assert!((100.0 - 1e-9..=180.0 + 1e-9).contains(&c.g), "g={} at ({h}, {m})", c.g);
            assert!((50.0 - 1e-9..=128.0 + 1e-9).contains(&c.b), "b={} at ({h}, {m})", c.b);
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_black_without_nan() {
        let w = BiomeWeights {
            shore: 0.0,
            taiga: 0.0,
            forest: 0.0,
            plains: 0.0,
        };
        assert_eq!(w.color(), Rgb::BLACK);
    }

    #[test]
    fn test_fog_grows_with_depth_and_row_distance() {
        let lighting = FrameLighting::new(1.0, Rgb::new(100.0, 150.0, 200.0));
        let near = lighting.fog_amount(10.0, 100.0, 100.0);
        let far = lighting.fog_amount(110.0, 100.0, 100.0);
        let low = lighting.fog_amount(10.0, 300.0, 100.0);
        assert!(far > near && low > near);
        assert_eq!(lighting.fog_amount(1.0e6, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_night_fog_is_darker_than_day_fog() {
        let sky = Rgb::new(50.0, 50.0, 80.0);
        let night = FrameLighting::new(0.0, sky).fog_color;
        let day = FrameLighting::new(1.0, sky).fog_color;
        assert!(night.r < day.r && night.g < day.g && night.b < day.b);
    }

    #[test]
    fn test_shaded_color_stays_in_channel_range() {
        let mut heights = CachedHeightField::new(
            HeightField::new(HeightFieldParams::with_seed(11)),
            HeightCache::new(1024),
        );
        let shader = TerrainShader::new(11);
        for &day in &[0.0, 0.5, 1.0] {
            let lighting = FrameLighting::new(day, Rgb::new(165.0, 200.0, 255.0));
            for i in 0..100 {
                let (x, z) = (i as f64 * 7.3, i as f64 * -3.1);
                let h = heights.field().height(x, z);
                for &depth in &[10.0, 100.0] {
                    let c = shader.shade(&mut heights, x, z, h, depth, &lighting);
                    assert!(c.in_range(), "{c:?} at day={day} depth={depth}");
                }
            }
        }
    }

    #[test]
    fn test_daylight_is_brighter_than_night() {
        let mut heights = CachedHeightField::new(
            HeightField::new(HeightFieldParams::with_seed(2)),
            HeightCache::new(1024),
        );
        let shader = TerrainShader::new(2);
        let sky = Rgb::new(20.0, 20.0, 40.0);
        let h = heights.field().height(50.0, 50.0);
        let night = shader.shade(&mut heights, 50.0, 50.0, h, 20.0, &FrameLighting::new(0.0, sky));
        let day = shader.shade(&mut heights, 50.0, 50.0, h, 20.0, &FrameLighting::new(1.0, sky));
        assert!(day.g > night.g, "day={day:?} night={night:?}");
    }
}
