//! Fixed-tick walk/jump/gravity integrator that owns the camera.

use glam::{DVec2, DVec3};
use tracing::trace;
use vista_raster::CameraState;
use vista_terrain::HeightQuery;

use crate::input::InputSnapshot;

/// Movement tuning. Velocities are in world units per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSettings {
    pub acceleration: f64,
    /// Fraction of horizontal velocity lost per grounded tick; halved
    /// while airborne.
    pub friction: f64,
    pub max_speed: f64,
    /// Vertical velocity change per tick (negative is down).
    pub gravity: f64,
    pub jump_strength: f64,
    /// Camera height above the ground.
    pub eye_height: f64,
    /// Radians of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            acceleration: 0.2,
            friction: 0.15,
            max_speed: 2.5,
            gravity: -0.3,
            jump_strength: 2.5,
            eye_height: 20.0,
            mouse_sensitivity: 0.002,
        }
    }
}

/// The camera plus the velocity and ground state that move it.
#[derive(Clone, Debug)]
pub struct PlayerController {
    camera: CameraState,
    velocity: DVec3,
    grounded: bool,
    settings: ControllerSettings,
}

impl PlayerController {
    pub fn new(camera: CameraState, settings: ControllerSettings) -> Self {
        Self {
            camera,
            velocity: DVec3::ZERO,
            grounded: false,
            settings,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Update the camera aspect ratio after a surface resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    /// Apply a mouse delta to yaw and pitch. Moving right turns right;
    /// moving down looks down.
    pub fn look(&mut self, delta: DVec2) {
        let s = self.settings.mouse_sensitivity;
        self.camera.yaw += delta.x * s;
        self.camera.set_pitch(self.camera.pitch - delta.y * s);
    }

    /// Integrate one fixed tick of input and resolve ground contact
    /// against `ground`.
    pub fn step<H: HeightQuery + ?Sized>(&mut self, input: &InputSnapshot, ground: &H) {
        let s = self.settings;
        self.look(input.look_delta);

        if input.jump && self.grounded {
            self.velocity.y = s.jump_strength;
        }

        let dir = input.move_direction(self.camera.yaw);
        let mut horizontal = DVec2::new(self.velocity.x, self.velocity.z) + dir * s.acceleration;
        let friction = if self.grounded { s.friction } else { s.friction * 0.5 };
        horizontal *= 1.0 - friction;
        let speed = horizontal.length();
        if speed > s.max_speed {
            horizontal *= s.max_speed / speed;
        }
        self.velocity.x = horizontal.x;
        self.velocity.z = horizontal.y;

        self.camera.position.x += self.velocity.x;
        self.camera.position.z += self.velocity.z;
        self.velocity.y += s.gravity;
        self.camera.position.y += self.velocity.y;

        let ground_y = ground.height_at(self.camera.position.x, self.camera.position.z) + s.eye_height;
        if self.camera.position.y <= ground_y {
            self.camera.position.y = ground_y;
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        trace!(
            position = ?self.camera.position,
            grounded = self.grounded,
            "player step"
        );
    }
}
