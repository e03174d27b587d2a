//! Process-wide logger for the board editor and its CLI.
//! Feature flags: `log-info`, `log-debug`, `verbose`, `file-logging`.
//!
//! Errors and warnings go to stderr, info and debug to stdout. Once a log file
//! is attached every prefixed line is appended there instead.

use std::fmt::Arguments;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::{LazyLock, Mutex},
};

/// Logging levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime enablement).
    Debug = 4,
}

impl Level {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn compiled_in(self) -> bool {
        match self {
            Self::Info => cfg!(feature = "log-info"),
            Self::Debug => cfg!(feature = "log-debug"),
            Self::Error | Self::Warn => true,
        }
    }

    /// Parse a level name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

const fn default_level() -> u8 {
    if cfg!(feature = "log-debug") {
        Level::Debug as u8
    } else if cfg!(feature = "log-info") {
        Level::Info as u8
    } else {
        Level::Warn as u8
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(default_level());
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "log-debug"));
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Parse level from string (case-insensitive) and set it. Returns `true` on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    Level::parse(level).map(set_level).is_some()
}

/// Enable debug logging at runtime (no effect without the `log-debug` feature).
pub fn enable_debug() {
    DEBUG_ENABLED.store(cfg!(feature = "log-debug"), Ordering::SeqCst);
}

/// Disable debug logging at runtime.
pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns whether debug logging is enabled.
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Enable verbose output at runtime (no effect without the `verbose` feature).
pub fn enable_verbose() {
    VERBOSE_ENABLED.store(cfg!(feature = "verbose"), Ordering::SeqCst);
}

/// Disable verbose output at runtime.
pub fn disable_verbose() {
    VERBOSE_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns whether verbose output is enabled.
pub fn is_verbose_enabled() -> bool {
    VERBOSE_ENABLED.load(Ordering::SeqCst)
}

/// Attach a log file at `path` (appending). Returns `true` on success.
#[cfg(feature = "file-logging")]
#[must_use]
pub fn init_file_logging(path: &std::path::Path) -> bool {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .is_ok_and(|file| {
            LOG_FILE.lock().is_ok_and(|mut slot| {
                *slot = Some(file);
                true
            })
        })
}

/// Attach a log file (always fails without the `file-logging` feature).
#[cfg(not(feature = "file-logging"))]
#[must_use]
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Append a line to the attached log file. Returns `false` when no file is attached.
#[cfg(feature = "file-logging")]
fn write_to_file(line: &str) -> bool {
    let Ok(mut slot) = LOG_FILE.lock() else {
        return false;
    };
    match slot.as_mut() {
        Some(file) => {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
            true
        }
        None => false,
    }
}

#[cfg(not(feature = "file-logging"))]
const fn write_to_file(_line: &str) -> bool {
    false
}

fn should_log(level: Level) -> bool {
    if !level.compiled_in() {
        return false;
    }
    (level as u8) <= LOG_LEVEL.load(Ordering::SeqCst)
        && (level != Level::Debug || is_debug_enabled())
}

/// Internal logging dispatcher used by public macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.prefix());
    if write_to_file(&line) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints a verbose message to stdout when verbose output is enabled. Never written to log files.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}
