//! First-person camera snapshot and the orthonormal basis derived from it.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;

/// Pitch is clamped to `±PITCH_LIMIT` radians (straight up / straight down).
pub const PITCH_LIMIT: f64 = FRAC_PI_2;

/// Camera state as the renderers see it for one frame.
///
/// Yaw is measured from +Z toward +X and is left unbounded; the trig in
/// [`CameraState::basis`] wraps it. Positive pitch looks up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Eye position in world units.
    pub position: DVec3,
    /// Heading in radians.
    pub yaw: f64,
    /// Elevation angle in radians, within `±PITCH_LIMIT`.
    pub pitch: f64,
    /// Vertical field of view in radians.
    pub fov: f64,
    /// Width / height of the target surface.
    pub aspect: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DVec3::new(256.0, 100.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 1.2,
            aspect: 1.0,
        }
    }
}

impl CameraState {
    /// Set the pitch, clamped to `±PITCH_LIMIT`.
    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Update the aspect ratio from surface dimensions. A zero height leaves
    /// the previous aspect in place.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f64 / height as f64;
        }
    }

    /// `tan(fov / 2)`, the half-extent of the image plane at unit distance.
    pub fn tan_half_fov(&self) -> f64 {
        (self.fov * 0.5).tan()
    }

    /// Forward/right/up basis for the current yaw and pitch.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_yaw_pitch(self.yaw, self.pitch)
    }
}

/// Orthonormal camera frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub forward: DVec3,
    pub right: DVec3,
    pub up: DVec3,
}

impl CameraBasis {
    /// Build the basis from yaw and pitch. `right` always lies in the
    /// horizontal plane; `up = forward × right`.
    pub fn from_yaw_pitch(yaw: f64, pitch: f64) -> Self {
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let forward = DVec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        let right = DVec3::new((yaw + FRAC_PI_2).sin(), 0.0, (yaw + FRAC_PI_2).cos());
        let up = forward.cross(right);
        Self { forward, right, up }
    }

    /// Normalized view ray through normalized device coordinates
    /// `(ndc_x, ndc_y)` in `[-1, 1]`, or `None` if the ray degenerates.
    pub fn view_ray(&self, ndc_x: f64, ndc_y: f64, tan_half_fov: f64, aspect: f64) -> Option<DVec3> {
        let ray = self.forward
            + self.right * (ndc_x * tan_half_fov * aspect)
            + self.up * (ndc_y * tan_half_fov);
        let len = ray.length();
        (len > f64::EPSILON && len.is_finite()).then(|| ray / len)
    }

    /// Express a world direction in camera space as `(right, up, forward)`
    /// components.
    pub fn to_camera_space(&self, dir: DVec3) -> DVec3 {
        DVec3::new(dir.dot(self.right), dir.dot(self.up), dir.dot(self.forward))
    }
}
