//! Logger installation for hosted apps.

use r3bl_simple_logger::{ConfigBuilder, LevelFilter, SetLoggerError, SimpleLogger};

/// Environment variable holding the level filter (`off`, `error` .. `trace`).
pub const LOG_ENV: &str = "MEASURE_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Install the global logger at the level named by `MEASURE_LOG`.
///
/// Fails if a logger is already installed.
pub fn init_from_env() -> Result<LevelFilter, SetLoggerError> {
    let level = level_from(std::env::var(LOG_ENV).ok().as_deref());
    SimpleLogger::init(level, ConfigBuilder::new().build())?;
    Ok(level)
}

/// Parse a level filter; unknown or missing values fall back to `warn`.
pub fn level_from(raw: Option<&str>) -> LevelFilter {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => DEFAULT_LEVEL,
        Some(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("{LOG_ENV}: unsupported level '{value}'; using {DEFAULT_LEVEL}");
            DEFAULT_LEVEL
        }),
    }
}
