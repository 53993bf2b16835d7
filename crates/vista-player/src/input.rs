//! Immutable per-tick input state.

use glam::DVec2;

/// Input collected once per tick by the frame driver.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Mouse movement since the last snapshot, in pixels. Positive x is
    /// rightward, positive y is downward.
    pub look_delta: DVec2,
}

impl InputSnapshot {
    /// No keys held and no mouse movement.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Unit horizontal movement direction as world `(x, z)` for a heading of
    /// `yaw`, or zero when the held keys cancel out.
    pub fn move_direction(&self, yaw: f64) -> DVec2 {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let forward = DVec2::new(sin_yaw, cos_yaw);
        let right = DVec2::new(cos_yaw, -sin_yaw);

        let mut dir = DVec2::ZERO;
        if self.forward {
            dir += forward;
        }
        if self.back {
            dir -= forward;
        }
        if self.left {
            dir -= right;
        }
        if self.right {
            dir += right;
        }
        dir.normalize_or_zero()
    }
}
