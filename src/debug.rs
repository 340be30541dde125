//! Debug logging bridge for shortcut-relay.
//!
//! Routes every `log` record to `shortcut_relay_debug.log` in the system temp
//! directory, so diagnostic output never mixes with the CLI's stdout. When
//! `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the keymap's
//! `log_level` (applied once the keymap is loaded).

use parking_lot::Mutex;
use shortcut_relay_config::LogLevel;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Global debug logger
struct DebugLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
    /// Level came from the CLI or `RUST_LOG`; config must not override it
    explicit: bool,
}

impl DebugLogger {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            *file = open_log_file();
        }
        if let Some(f) = file.as_mut() {
            let _ = f.write_all(line.as_bytes());
            let _ = f.flush();
        }
    }
}

impl log::Log for DebugLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_line(&line);
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(f) = self.file.lock().as_mut() {
            let _ = f.flush();
        }
    }
}

static LOGGER: OnceLock<DebugLogger> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("shortcut_relay_debug.log")
}

fn open_log_file() -> Option<File> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(log_path())
        .ok()?;
    let _ = writeln!(
        file,
        "{}\nshortcut-relay debug session started at {}\n{}",
        "=".repeat(80),
        get_timestamp(),
        "=".repeat(80)
    );
    Some(file)
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Pick the startup level: CLI flag first, then `RUST_LOG`.
///
/// Returns `None` when neither is given.
pub fn explicit_level(
    cli_level: Option<LogLevel>,
    rust_log: Option<&str>,
) -> Option<log::LevelFilter> {
    cli_level
        .map(LogLevel::to_level_filter)
        .or_else(|| rust_log.and_then(|value| log::LevelFilter::from_str(value.trim()).ok()))
}

/// Install the logger. Safe to call more than once; later calls are ignored.
///
/// The log file is only created when the first record is written.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = explicit_level(cli_level, rust_log.as_deref());

    let logger = LOGGER.get_or_init(|| DebugLogger {
        file: Mutex::new(None),
        mirror_stderr: rust_log.is_some(),
        explicit: level.is_some(),
    });

    if log::set_logger(logger).is_ok() {
        log::set_max_level(level.unwrap_or(log::LevelFilter::Off));
    }
}

/// Apply the keymap's `log_level` unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LogLevel) {
    if let Some(logger) = LOGGER.get()
        && !logger.explicit
    {
        log::set_max_level(level.to_level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_wins() {
        assert_eq!(
            explicit_level(Some(LogLevel::Warn), Some("trace")),
            Some(log::LevelFilter::Warn)
        );
    }

    #[test]
    fn test_rust_log_fallback() {
        assert_eq!(
            explicit_level(None, Some(" debug ")),
            Some(log::LevelFilter::Debug)
        );
        assert_eq!(explicit_level(None, Some("my_crate=debug")), None);
        assert_eq!(explicit_level(None, None), None);
    }

    #[test]
    fn test_log_path_name() {
        assert!(log_path().ends_with("shortcut_relay_debug.log"));
    }
}
