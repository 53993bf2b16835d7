//! Headless capture: render a fixed number of frames to PNG files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vista_player::InputSnapshot;

use crate::AppError;
use crate::frame::FrameDriver;
use crate::game_loop::FIXED_DT;

/// Simulation ticks between two captured frames `interval` seconds apart.
pub fn ticks_per_frame(interval: f64) -> u32 {
    (interval / FIXED_DT).round().max(0.0) as u32
}

/// File name of captured frame `index`.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:04}.png")
}

/// Render `frames` frames into `output_dir`, stepping an idle controller
/// between them, and return the written paths in order.
pub fn run_headless(
    driver: &mut FrameDriver,
    frames: u32,
    interval: f64,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(output_dir).map_err(|source| AppError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let ticks = ticks_per_frame(interval);
    let idle = InputSnapshot::default();
    let mut sim_ticks: u64 = 0;
    let mut written = Vec::with_capacity(frames as usize);

    for index in 0..frames {
        for _ in 0..ticks {
            driver.update(&idle);
        }
        sim_ticks += u64::from(ticks);
        let time = sim_ticks as f64 * FIXED_DT;
        let stats = driver.render(time);

        let path = output_dir.join(frame_file_name(index));
        driver
            .canvas()
            .save_png(&path)
            .map_err(|source| AppError::Capture {
                path: path.clone(),
                source,
            })?;
        debug!(
            frame = index,
            time,
            terrain_pixels = stats.terrain.pixels,
            cloud_pixels = stats.sky.cloud_pixels,
            "frame captured"
        );
        written.push(path);
    }

    info!(
        frames,
        ticks_per_frame = ticks,
        dir = %output_dir.display(),
        "capture finished"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_config::Config;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn tiny_driver(width: u32, height: u32) -> FrameDriver {
        let mut config = Config::default();
        config.window.width = width;
        config.window.height = height;
        config.world.star_count = 10;
        config.world.height_cache_capacity = 1 << 12;
        FrameDriver::from_config(&config)
    }

    #[test]
    fn test_ticks_per_frame() {
        assert_eq!(ticks_per_frame(0.25), 15);
        assert_eq!(ticks_per_frame(1.0 / 60.0), 1);
        assert_eq!(ticks_per_frame(0.0), 0);
        assert_eq!(ticks_per_frame(-1.0), 0);
    }

    #[test]
    fn test_frame_file_name_is_zero_padded() {
        assert_eq!(frame_file_name(0), "frame_0000.png");
        assert_eq!(frame_file_name(42), "frame_0042.png");
        assert_eq!(frame_file_name(12345), "frame_12345.png");
    }

    #[test]
    fn test_headless_writes_png_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("shots").join("run");
        let mut driver = tiny_driver(32, 24);

        let paths = run_headless(&mut driver, 3, 0.1, &out).unwrap();
        assert_eq!(paths.len(), 3);
        for (i, path) in paths.iter().enumerate() {
            assert_eq!(path, &out.join(frame_file_name(i as u32)));
            let bytes = std::fs::read(path).unwrap();
            assert!(
                bytes.starts_with(&PNG_SIGNATURE),
                "{} is not a PNG",
                path.display()
            );
        }
    }

    #[test]
    fn test_idle_capture_lets_player_settle() {
        let tmp = tempfile::tempdir().unwrap();
        let mut driver = tiny_driver(16, 12);
        let start_y = driver.camera().position.y;
        run_headless(&mut driver, 4, 0.5, tmp.path()).unwrap();
        assert!(driver.camera().position.y < start_y, "player should fall");
        assert_eq!(driver.camera().position.x, 256.0);
        assert_eq!(driver.camera().position.z, 0.0);
    }

    #[test]
    fn test_zero_frames_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut driver = tiny_driver(16, 12);
        let paths = run_headless(&mut driver, 0, 0.25, tmp.path()).unwrap();
        assert!(paths.is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_canvas_fails_to_capture() {
        let tmp = tempfile::tempdir().unwrap();
        let mut driver = tiny_driver(16, 12);
        driver.resize(0, 0);
        let err = run_headless(&mut driver, 1, 0.25, tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::Capture { .. }), "got {err:?}");
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("taken");
        std::fs::write(&blocker, b"x").unwrap();
        let mut driver = tiny_driver(16, 12);
        let err = run_headless(&mut driver, 1, 0.25, &blocker.join("sub")).unwrap_err();
        assert!(matches!(err, AppError::OutputDir { .. }), "got {err:?}");
    }
}
