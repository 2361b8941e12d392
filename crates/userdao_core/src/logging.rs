//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start one size-rotated file logger per process.
//! - Log panics as sanitized single-line events.
//!
//! # Invariants
//! - Repeating `init_logging` with the same settings is a no-op.
//! - A second call with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "userdao";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Parses a level name and an absolute directory.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: parse_level(level)?,
            log_dir: parse_log_dir(log_dir)?,
        })
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Starts file logging at `log_dir` with `level`.
///
/// # Errors
/// - Unsupported level, empty or relative directory.
/// - Directory creation or logger start failure.
/// - Conflict with an already active configuration.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(requested.clone()))?;
    ensure_same_settings(&active.settings, &requested)
}

/// Active `(level, log_dir)` or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.settings.level, active.settings.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(settings.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
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

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} log_dir={} version={}",
        settings.level,
        settings.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn ensure_same_settings(active: &LogSettings, requested: &LogSettings) -> Result<(), String> {
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
            active.level, requested.level
        ));
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    let mut truncated: String = single_line.chars().take(max_chars).collect();
    if single_line.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, init_logging, logging_status, sanitize_message, LogSettings};
    use std::path::PathBuf;

    #[test]
    fn default_level_is_a_valid_setting() {
        let dir = std::env::temp_dir();
        let dir_str = dir.to_str().expect("temp dir should be valid UTF-8");

        let settings = LogSettings::parse(default_log_level(), dir_str).expect("default parses");
        let expected = if cfg!(debug_assertions) { "debug" } else { "info" };
        assert_eq!(settings.level, expected);
    }

    #[test]
    fn settings_normalize_level_names() {
        let dir = std::env::temp_dir();
        let dir_str = dir.to_str().expect("temp dir should be valid UTF-8");

        let settings = LogSettings::parse(" WARNING ", dir_str).expect("warning should parse");
        assert_eq!(settings.level, "warn");
        assert_eq!(settings.log_dir, PathBuf::from(dir_str));

        let err = LogSettings::parse("verbose", dir_str).expect_err("unknown level must fail");
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn settings_reject_relative_and_empty_dirs() {
        let err = LogSettings::parse("info", "logs/dev").expect_err("relative dir must fail");
        assert!(err.contains("absolute"));

        let err = LogSettings::parse("info", "   ").expect_err("empty dir must fail");
        assert!(err.contains("empty"));
    }

    #[test]
    fn sanitize_message_flattens_and_truncates() {
        let sanitized = sanitize_message("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(sanitized.ends_with("..."));
        assert_eq!(sanitize_message("short", 8), "short");
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let root = tempfile::tempdir().expect("temp dir");
        let log_dir = root.path().join("logs");
        let log_dir_str = log_dir.to_str().expect("utf-8 path").to_string();
        let other_dir_str = root
            .path()
            .join("other")
            .to_str()
            .expect("utf-8 path")
            .to_string();

        init_logging("info", &log_dir_str).expect("first init should succeed");
        init_logging("INFO", &log_dir_str).expect("same config should be idempotent");

        let level_err = init_logging("debug", &log_dir_str).expect_err("level conflict");
        assert!(level_err.contains("refusing to switch"));
        let dir_err = init_logging("info", &other_dir_str).expect_err("directory conflict");
        assert!(dir_err.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(dir, log_dir);
    }
}
