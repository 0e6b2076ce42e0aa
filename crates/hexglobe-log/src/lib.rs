//! Tracing setup for hexglobe binaries.
//!
//! Console output always; JSON lines in `hexglobe.log` when a log directory is configured
//! and the build is a debug build. `RUST_LOG` wins over the configured filter.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use hexglobe_config::DebugConfig;
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Layer type returned by [`json_file_layer`].
pub type JsonFileLayer<S> = fmt::Layer<S, JsonFields, Format<Json, Uptime>, Mutex<File>>;

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log inside the configured log directory.
pub const LOG_FILE_NAME: &str = "hexglobe.log";

/// Install the global subscriber.
///
/// Call once per process. A second call panics inside `tracing-subscriber`.
pub fn init_logging(debug: &DebugConfig, debug_build: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(debug));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = debug.log_dir.as_deref()
        && let Some(file_layer) = json_file_layer(log_dir)
    {
        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter built from `log_level`, falling back to [`DEFAULT_FILTER`] when it is blank.
pub fn config_filter(debug: &DebugConfig) -> EnvFilter {
    let level = debug.log_level.trim();
    if level.is_empty() {
        EnvFilter::new(DEFAULT_FILTER)
    } else {
        EnvFilter::new(level)
    }
}

/// JSON-lines layer writing to `<log_dir>/hexglobe.log`, or `None` if the file can't be created.
pub fn json_file_layer<S>(log_dir: &Path) -> Option<JsonFileLayer<S>> {
    std::fs::create_dir_all(log_dir).ok()?;
    let file = File::create(log_dir.join(LOG_FILE_NAME)).ok()?;
    Some(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_filter_uses_level() {
        let debug = DebugConfig {
            log_level: "warn,hexglobe_mesh=debug".to_string(),
            log_dir: None,
        };
        let filter = config_filter(&debug).to_string();
        assert!(filter.contains("hexglobe_mesh=debug"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn test_blank_level_falls_back() {
        let debug = DebugConfig {
            log_level: "   ".to_string(),
            log_dir: None,
        };
        assert_eq!(config_filter(&debug).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn test_crate_directives_parse() {
        for filter_str in [
            "info",
            "debug,hexglobe_tiling=trace",
            "warn,hexglobe_terrain=debug,hexglobe_mesh=info",
        ] {
            assert!(EnvFilter::try_new(filter_str).is_ok(), "{filter_str}");
        }
    }

    #[test]
    fn test_json_file_layer_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let layer = json_file_layer(&log_dir).unwrap();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(tiles = 92, "globe built");
        });

        let contents = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
        let line = contents.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["fields"]["message"], "globe built");
        assert_eq!(value["fields"]["tiles"], 92);
    }

    #[test]
    fn test_json_file_layer_bad_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();
        assert!(json_file_layer::<tracing_subscriber::Registry>(&blocker).is_none());
    }
}
