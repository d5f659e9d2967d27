//! Core logging bootstrap.
//!
//! # Responsibility
//! - Start the rolling file logger once per process from `LogSettings`.
//! - Keep log lines metadata-only: `event=... module=... status=...`.
//!
//! # Invariants
//! - Initializing twice with equal settings is a no-op.
//! - Initializing with different settings after startup is rejected.
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "chemdex";
const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_FILES: usize = 5;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Logging section of the core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `trace|debug|info|warn|error` (`warning` is accepted for `warn`).
    #[serde(default = "default_level_string")]
    pub level: String,
    /// Absolute directory for rolling log files.
    pub directory: PathBuf,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl LogSettings {
    /// Settings with the build-mode default level and default rotation.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            level: default_level_string(),
            directory: directory.into(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    fn normalized(&self) -> Result<Self, LoggingError> {
        let level = normalize_level(&self.level)?;
        if self.directory.as_os_str().is_empty() {
            return Err(LoggingError::InvalidDirectory(
                "log directory cannot be empty".to_string(),
            ));
        }
        if !self.directory.is_absolute() {
            return Err(LoggingError::InvalidDirectory(format!(
                "log directory must be absolute, got `{}`",
                self.directory.display()
            )));
        }
        Ok(Self {
            level: level.to_string(),
            directory: self.directory.clone(),
            max_file_bytes: self.max_file_bytes.max(1),
            max_files: self.max_files.max(1),
        })
    }
}

/// Logging bootstrap failure.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidDirectory(String),
    CreateDirectory {
        directory: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    AlreadyInitialized {
        active: String,
        requested: String,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDirectory(message) => write!(f, "{message}"),
            Self::CreateDirectory { directory, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                directory.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already initialized with {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts file logging for the process.
///
/// # Errors
/// - Unsupported level, empty or relative directory.
/// - Directory creation or logger backend failure.
/// - A logger is already running with different settings.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let requested = settings.normalized()?;
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(requested.clone()))?;
    if active.settings != requested {
        return Err(LoggingError::AlreadyInitialized {
            active: describe(&active.settings),
            requested: describe(&requested),
        });
    }
    Ok(())
}

/// Active `(level, directory)`, or `None` before `init_logging` succeeds.
pub fn logging_status() -> Option<(String, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.settings.level.clone(), active.settings.directory.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.directory).map_err(|source| {
        LoggingError::CreateDirectory {
            directory: settings.directory.clone(),
            source,
        }
    })?;

    let handle = Logger::try_with_str(settings.level.as_str())
        .map_err(LoggingError::Backend)?
        .log_to_file(
            FileSpec::default()
                .directory(settings.directory.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(settings.max_file_bytes),
            Naming::Numbers,
            Cleanup::KeepLogFiles(settings.max_files),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    info!(
        "event=core_init module=core status=ok level={} log_dir={} version={}",
        settings.level,
        settings.directory.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn describe(settings: &LogSettings) -> String {
    format!(
        "level `{}` at `{}`",
        settings.level,
        settings.directory.display()
    )
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn default_level_string() -> String {
    default_log_level().to_string()
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level, LogSettings, LoggingError};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "chemdex-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level(" WARNING ").expect("warning"), "warn");
        assert!(matches!(
            normalize_level("verbose"),
            Err(LoggingError::UnsupportedLevel(_))
        ));
    }

    #[test]
    fn relative_directory_is_rejected_before_start() {
        let err = init_logging(&LogSettings::new("logs/dev")).expect_err("relative dir");
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let first_dir = unique_temp_dir("first");
        let first = LogSettings::new(&first_dir).with_level("info");
        let second = LogSettings::new(unique_temp_dir("second")).with_level("info");

        init_logging(&first).expect("first init");
        init_logging(&first.clone().with_level("INFO")).expect("same settings after normalizing");

        let level_err = init_logging(&first.clone().with_level("debug")).expect_err("level");
        assert!(level_err.to_string().contains("refusing to switch"));
        let dir_err = init_logging(&second).expect_err("directory");
        assert!(matches!(dir_err, LoggingError::AlreadyInitialized { .. }));

        let (level, directory) = logging_status().expect("active logger");
        assert_eq!(level, "info");
        assert_eq!(directory, first_dir);
    }
}
