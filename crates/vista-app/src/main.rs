//! The binary entry point for the vista renderer.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use vista_app::platform::PlatformDirs;
use vista_app::{AppError, FrameDriver, capture, window};
use vista_config::{CliArgs, Config};

fn load_config(args: &CliArgs) -> Result<(PlatformDirs, Config), AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((dirs, config))
}

fn run(config: &Config) -> Result<(), AppError> {
    let mut driver = FrameDriver::from_config(config);
    if config.capture.frames > 0 {
        capture::run_headless(
            &mut driver,
            config.capture.frames,
            config.capture.frame_interval,
            &config.capture.output_dir,
        )?;
        Ok(())
    } else {
        window::run_windowed(config, &mut driver)
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (dirs, config) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("vista: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file =
        vista_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        config_dir = %dirs.config_dir.display(),
        log_file = ?log_file,
        "vista starting"
    );

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "vista stopped");
            ExitCode::FAILURE
        }
    }
}
