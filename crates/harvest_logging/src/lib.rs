#![deny(missing_docs)]
//! Logging facade for the link harvester crates.
//!
//! Every crate logs through the `harvest_*` macros. They expand to the `log`
//! crate re-exported from here, so callers need no direct `log` dependency.

#[doc(hidden)]
pub use log;

use log::LevelFilter;

/// Environment variable read by [`initialize_for_tests`].
pub const TEST_LEVEL_VAR: &str = "LINKHARVEST_TEST_LOG";

/// Logs at an explicit [`log::Level`].
#[macro_export]
macro_rules! harvest_log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log::log!($level, $($arg)+)
    };
}

/// Logs a trace-level message.
#[macro_export]
macro_rules! harvest_trace {
    ($($arg:tt)+) => { $crate::harvest_log!($crate::log::Level::Trace, $($arg)+) };
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! harvest_debug {
    ($($arg:tt)+) => { $crate::harvest_log!($crate::log::Level::Debug, $($arg)+) };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! harvest_info {
    ($($arg:tt)+) => { $crate::harvest_log!($crate::log::Level::Info, $($arg)+) };
}

/// Logs a warning.
#[macro_export]
macro_rules! harvest_warn {
    ($($arg:tt)+) => { $crate::harvest_log!($crate::log::Level::Warn, $($arg)+) };
}

/// Logs an error.
#[macro_export]
macro_rules! harvest_error {
    ($($arg:tt)+) => { $crate::harvest_log!($crate::log::Level::Error, $($arg)+) };
}

/// Parses a level name as written in configuration files.
///
/// Accepts `off`, `error`, `warn` (or `warning`), `info`, `debug` and `trace`
/// in any case. Returns `None` for anything else so callers can fall back to
/// a default.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Installs a terminal logger for tests, once per process.
///
/// The level comes from `LINKHARVEST_TEST_LOG` when it names a level, else
/// debug in debug builds and info in release builds. Later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let level = std::env::var(TEST_LEVEL_VAR)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(fallback);

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
