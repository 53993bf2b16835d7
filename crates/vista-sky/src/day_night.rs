//! Day/night cycle: one scalar derived from elapsed time drives every
//! time-of-day color.
//!
//! `day_factor` is 0 at `t = 0` (midnight), rises to 1 at half the period
//! (noon), and returns to 0 after a full period. Every function here is pure
//! so the sky and terrain renderers agree without sharing mutable state.

use std::f64::consts::{FRAC_PI_2, TAU};

use vista_noise::smoothstep;
use vista_raster::Rgb;

/// Seconds of elapsed time per full day/night cycle.
pub const DAY_CYCLE_PERIOD: f64 = 60.0;

const DAY_SKY_TOP: Rgb = Rgb::new(120.0, 180.0, 240.0);
const DAY_SKY_BOTTOM: Rgb = Rgb::new(165.0, 200.0, 255.0);
const NIGHT_SKY_TOP: Rgb = Rgb::new(0.0, 0.0, 20.0);
const NIGHT_SKY_BOTTOM: Rgb = Rgb::new(10.0, 10.0, 40.0);
const SUNRISE: Rgb = Rgb::new(255.0, 140.0, 70.0);
const NIGHT_HORIZON: Rgb = Rgb::new(15.0, 10.0, 30.0);
const SOFT_PURPLE: Rgb = Rgb::new(180.0, 150.0, 200.0);
const CLOUD_DAY: Rgb = Rgb::new(255.0, 255.0, 255.0);
const CLOUD_NIGHT: Rgb = Rgb::new(80.0, 80.0, 100.0);

/// How far the raw horizon blend is pulled toward the sky bottom color.
const HORIZON_TONE: f64 = 0.4;

/// Time of day in `[0, 1]` for elapsed time `t` seconds.
pub fn day_factor(t: f64) -> f64 {
    0.5 + 0.5 * (TAU * t / DAY_CYCLE_PERIOD - FRAC_PI_2).sin()
}

pub fn sky_top_color(day_factor: f64) -> Rgb {
    NIGHT_SKY_TOP.lerp_rounded(DAY_SKY_TOP, day_factor)
}

pub fn sky_bottom_color(day_factor: f64) -> Rgb {
    NIGHT_SKY_BOTTOM.lerp_rounded(DAY_SKY_BOTTOM, day_factor)
}

/// Horizon tint: night → sunrise → purple → sky bottom across three eased
/// segments, then toned toward the sky bottom color.
pub fn horizon_color(day_factor: f64) -> Rgb {
    let bottom = sky_bottom_color(day_factor);
    let base = if day_factor <= 0.33 {
        NIGHT_HORIZON.lerp_rounded(SUNRISE, smoothstep(0.0, 0.33, day_factor))
    } else if day_factor <= 0.66 {
        SUNRISE.lerp_rounded(SOFT_PURPLE, smoothstep(0.33, 0.66, day_factor))
    } else {
        SOFT_PURPLE.lerp_rounded(bottom, smoothstep(0.66, 1.0, day_factor))
    };
    base.lerp_rounded(bottom, HORIZON_TONE)
}

/// The sky color the terrain fogs and tints toward at time `t`.
pub fn sky_color(t: f64) -> Rgb {
    horizon_color(day_factor(t))
}

pub fn cloud_color(day_factor: f64) -> Rgb {
    CLOUD_NIGHT.lerp_rounded(CLOUD_DAY, day_factor)
}

/// Star opacity: fully visible at midnight, invisible at noon.
pub fn star_visibility(day_factor: f64) -> f64 {
    1.0 - day_factor
}

/// All time-of-day values for one frame, computed once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Atmosphere {
    pub time: f64,
    pub day_factor: f64,
    pub sky_top: Rgb,
    pub sky_bottom: Rgb,
    pub horizon: Rgb,
    pub cloud: Rgb,
    pub star_visibility: f64,
}

impl Atmosphere {
    pub fn at(time: f64) -> Self {
        let f = day_factor(time);
        Self {
            time,
            day_factor: f,
            sky_top: sky_top_color(f),
            sky_bottom: sky_bottom_color(f),
            horizon: horizon_color(f),
            cloud: cloud_color(f),
            star_visibility: star_visibility(f),
        }
    }

    /// Night share `1 − day_factor`.
    pub fn night_alpha(&self) -> f64 {
        1.0 - self.day_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_times() -> impl Iterator<Item = f64> {
        (-400..400).map(|i| i as f64 * 0.731)
    }

    #[test]
    fn test_day_factor_is_bounded() {
        for t in sample_times().chain([1.0e9, -3.3e7, 0.0]) {
            let f = day_factor(t);
            assert!((0.0..=1.0).contains(&f), "day_factor({t}) = {f}");
        }
    }

    #[test]
    fn test_day_factor_is_periodic() {
        for t in sample_times() {
            let a = day_factor(t);
            let b = day_factor(t + DAY_CYCLE_PERIOD);
            assert!((a - b).abs() < 1e-9, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn test_midnight_and_noon() {
        assert!(day_factor(0.0).abs() < 1e-12);
        assert!((day_factor(DAY_CYCLE_PERIOD / 2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sky_color_channels_in_range() {
        for t in sample_times() {
            let c = sky_color(t);
            assert!(c.in_range(), "sky_color({t}) = {c:?}");
        }
    }

    #[test]
    fn test_full_night_horizon_is_near_night_color() {
        let c = horizon_color(0.0);
        assert!(
            c.distance_sq(NIGHT_HORIZON) < c.distance_sq(SUNRISE),
            "night horizon {c:?} is closer to sunrise than to night"
        );
    }

    #[test]
    fn test_full_day_horizon_matches_sky_bottom() {
        assert_eq!(horizon_color(1.0), sky_bottom_color(1.0));
    }

    #[test]
    fn test_palette_is_rounded() {
        for i in 0..=20 {
            let f = i as f64 / 20.0;
            for c in [sky_top_color(f), sky_bottom_color(f), horizon_color(f), cloud_color(f)] {
                assert_eq!(c, c.rounded(), "unrounded palette color {c:?} at {f}");
            }
        }
    }

    #[test]
    fn test_atmosphere_agrees_with_pure_functions() {
        let t = 17.25;
        let atmo = Atmosphere::at(t);
        assert_eq!(atmo.day_factor, day_factor(t));
        assert_eq!(atmo.horizon, sky_color(t));
        assert!((atmo.star_visibility + atmo.day_factor - 1.0).abs() < 1e-12);
        assert_eq!(atmo.cloud, cloud_color(day_factor(t)));
    }
}
