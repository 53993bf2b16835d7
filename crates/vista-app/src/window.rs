//! Window creation and input handling via minifb.
//!
//! Presents the driver's canvas once per displayed frame. Keyboard and mouse
//! state is sampled into an [`InputSnapshot`] that the fixed-rate update
//! consumes; mouse look only accumulates while the left button is held.

use glam::DVec2;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use tracing::info;
use vista_config::Config;
use vista_player::InputSnapshot;

use crate::AppError;
use crate::frame::FrameDriver;
use crate::game_loop::GameLoop;

/// Target presentation rate.
pub const TARGET_FPS: usize = 60;

/// Cursor movement to apply as look input.
///
/// Returns zero unless the button is held and a previous position is known.
pub fn mouse_delta(previous: Option<(f32, f32)>, current: Option<(f32, f32)>, held: bool) -> DVec2 {
    match (previous, current) {
        (Some((px, py)), Some((cx, cy))) if held => {
            DVec2::new(f64::from(cx - px), f64::from(cy - py))
        }
        _ => DVec2::ZERO,
    }
}

/// Size to hand to [`FrameDriver::resize`] when the window reports
/// `(width, height)`, or `None` if nothing needs to change.
pub fn resize_target(current: (u32, u32), window: (usize, usize)) -> Option<(u32, u32)> {
    let (w, h) = window;
    if w == 0 || h == 0 {
        return None;
    }
    let next = (
        u32::try_from(w).unwrap_or(u32::MAX),
        u32::try_from(h).unwrap_or(u32::MAX),
    );
    (next != current).then_some(next)
}

fn sample_keys(window: &Window, input: &mut InputSnapshot) {
    input.forward = window.is_key_down(Key::W);
    input.back = window.is_key_down(Key::S);
    input.left = window.is_key_down(Key::A);
    input.right = window.is_key_down(Key::D);
    input.jump = window.is_key_down(Key::Space);
}

/// Open the window and run until it is closed or Escape is pressed.
pub fn run_windowed(config: &Config, driver: &mut FrameDriver) -> Result<(), AppError> {
    let mut window = Window::new(
        &config.window.title,
        config.window.width as usize,
        config.window.height as usize,
        WindowOptions {
            resize: config.window.resizable,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(TARGET_FPS);
    info!(
        width = config.window.width,
        height = config.window.height,
        title = %config.window.title,
        "window opened"
    );

    let mut game_loop = GameLoop::new();
    let mut input = InputSnapshot::default();
    let mut last_mouse: Option<(f32, f32)> = None;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if let Some((w, h)) = resize_target(driver.canvas().dimensions(), window.get_size()) {
            driver.resize(w, h);
        }

        sample_keys(&window, &mut input);
        let mouse = window.get_mouse_pos(MouseMode::Pass);
        input.look_delta += mouse_delta(
            last_mouse,
            mouse,
            window.get_mouse_down(MouseButton::Left),
        );
        last_mouse = mouse;

        game_loop.tick(
            driver,
            |d, _dt, _t| {
                d.update(&input);
                input.look_delta = DVec2::ZERO;
            },
            |d, t| {
                d.render(t);
            },
        );

        let (w, h) = driver.canvas().dimensions();
        window.update_with_buffer(driver.canvas().pixels(), w as usize, h as usize)?;
    }

    info!(
        frames = game_loop.frame_count(),
        updates = game_loop.update_count(),
        sim_time = game_loop.total_sim_time(),
        "window closed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_delta_requires_button() {
        let d = mouse_delta(Some((10.0, 10.0)), Some((15.0, 7.0)), false);
        assert_eq!(d, DVec2::ZERO);
    }

    #[test]
    fn test_mouse_delta_while_held() {
        let d = mouse_delta(Some((10.0, 10.0)), Some((15.0, 7.0)), true);
        assert_eq!(d, DVec2::new(5.0, -3.0));
    }

    #[test]
    fn test_mouse_delta_without_history() {
        assert_eq!(mouse_delta(None, Some((1.0, 1.0)), true), DVec2::ZERO);
        assert_eq!(mouse_delta(Some((1.0, 1.0)), None, true), DVec2::ZERO);
    }

    #[test]
    fn test_resize_target() {
        assert_eq!(resize_target((640, 480), (640, 480)), None);
        assert_eq!(resize_target((640, 480), (800, 600)), Some((800, 600)));
        assert_eq!(resize_target((640, 480), (0, 600)), None, "minimized");
        assert_eq!(resize_target((0, 0), (320, 200)), Some((320, 200)));
    }
}
