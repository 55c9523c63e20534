//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs once per process.
//! - Capture panics as sanitized log records.
//!
//! # Invariants
//! - Initializing again with an identical config is a no-op.
//! - Initializing again with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, Level};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "projectboard";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGING: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

const DEFAULT_LEVEL: Level = if cfg!(debug_assertions) {
    Level::Debug
} else {
    Level::Info
};

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: Level,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Normalizes a level name and an absolute log directory.
    ///
    /// # Errors
    /// - Unknown level names.
    /// - Empty or relative directories.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: parse_level(level)?,
            log_dir: absolute_log_dir(log_dir)?,
        })
    }

    pub fn level(&self) -> &'static str {
        level_name(self.level)
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

struct ActiveLogging {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

/// Starts file logging with `level` under `log_dir`.
///
/// # Errors
/// - Invalid level or directory.
/// - The directory cannot be created or the backend fails to start.
/// - Logging is already active with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let config = LoggingConfig::new(level, log_dir)?;
    let active = ACTIVE_LOGGING.get_or_try_init(|| start_logger(&config))?;
    ensure_same_config(&active.config, &config)
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGING
        .get()
        .map(|active| (active.config.level(), active.config.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    level_name(DEFAULT_LEVEL)
}

fn start_logger(config: &LoggingConfig) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::with(config.level.to_level_filter())
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();
    info!(
        "event=board_start module=core status=ok platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        config.level(),
        config.log_dir.display()
    );

    Ok(ActiveLogging {
        config: config.clone(),
        _handle: handle,
    })
}

fn ensure_same_config(active: &LoggingConfig, requested: &LoggingConfig) -> Result<(), String> {
    if active.log_dir != requested.log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.log_dir.display(),
            requested.log_dir.display()
        ));
    }
    if active.level != requested.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level(),
            requested.level()
        ));
    }
    Ok(())
}

/// Accepts `warning` as an alias of `warn`; case and padding are ignored.
fn parse_level(raw: &str) -> Result<Level, String> {
    let name = raw.trim();
    let name = if name.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        name
    };
    name.parse::<Level>().map_err(|_| {
        format!("unsupported log level `{name}`; expected trace|debug|info|warn|error")
    })
}

const fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn absolute_log_dir(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory is empty".to_string());
    }
    if path.is_relative() {
        return Err(format!(
            "log directory `{}` is not an absolute path",
            path.display()
        ));
    }
    Ok(path)
}

fn install_panic_hook_once() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        // Payloads may carry user-entered project text.
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            single_line(panic_text(panic_info.payload()), MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn panic_text(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Folds line breaks into spaces and cuts at `max_chars`, marking the cut.
fn single_line(value: &str, max_chars: usize) -> String {
    let mut chars = value
        .chars()
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c });
    let mut line: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, init_logging, logging_status, single_line, LoggingConfig};

    #[test]
    fn config_normalizes_level() {
        let config = LoggingConfig::new(" Warning ", "/tmp/projectboard-logs")
            .expect("config should normalize");
        assert_eq!(config.level(), "warn");
    }

    #[test]
    fn config_rejects_relative_dir_and_unknown_level() {
        let error = LoggingConfig::new("info", "logs/dev").expect_err("relative path");
        assert!(error.contains("absolute"));

        let error = LoggingConfig::new("verbose", "/tmp").expect_err("unknown level");
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn single_line_folds_breaks_and_marks_truncation() {
        assert_eq!(single_line("title\nwith\rbreaks", 10), "title with...");
        assert_eq!(single_line("short", 5), "short");
    }

    #[test]
    fn default_level_is_a_valid_config_level() {
        let config = LoggingConfig::new(default_log_level(), "/tmp/projectboard-logs")
            .expect("default level should parse");
        assert_eq!(config.level(), default_log_level());
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        let first_dir = first.path().to_str().expect("utf-8 temp dir").to_string();
        let second_dir = second.path().to_str().expect("utf-8 temp dir").to_string();

        init_logging("info", &first_dir).expect("first init should succeed");
        init_logging("INFO", &first_dir).expect("same config should be idempotent");

        let level_error = init_logging("debug", &first_dir).expect_err("level conflict");
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging("info", &second_dir).expect_err("directory conflict");
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(dir, first.path());
    }
}
