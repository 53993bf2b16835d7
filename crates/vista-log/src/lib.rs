//! Structured logging for the vista renderer.
//!
//! Console output with uptime timestamps, plus a JSON log file in debug
//! builds. `RUST_LOG` takes precedence over the configured level.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vista_config::Config;

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE_NAME: &str = "vista.log";

/// Filter directives from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

fn json_file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

/// Install the global tracing subscriber.
///
/// When `debug_build` is set and `log_dir` can be created, events are also
/// written as JSON lines to [`LOG_FILE_NAME`] there; the path of that file
/// is returned.
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
    {
        let path = log_dir.join(LOG_FILE_NAME);
        if let Ok(file) = File::create(&path) {
            subscriber.with(json_file_layer(file)).init();
            return Some(path);
        }
    }

    subscriber.init();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_to_info() {
        assert_eq!(filter_directives(None), "info");
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directives(Some(&config)), "info");
    }

    #[test]
    fn test_filter_uses_configured_level() {
        let mut config = Config::default();
        config.debug.log_level = "debug,vista_terrain=trace".to_string();
        let directives = filter_directives(Some(&config));
        assert_eq!(directives, "debug,vista_terrain=trace");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_json_layer_writes_parseable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = File::create(&path).unwrap();
        let subscriber = tracing_subscriber::registry().with(json_file_layer(file));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(frames = 3u32, "capture finished");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().expect("no log line written");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["fields"]["message"], "capture finished");
        assert_eq!(value["fields"]["frames"], 3);
    }
}
