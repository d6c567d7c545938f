//! Construction options for a measurement input.

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::unit::{DisplayUnit, ParseUnitError};
use std::fmt;
use std::time::Duration;

/// What committing an empty whole field means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Store "no value" and skip `on_change`; the host gets `on_clear`.
    #[default]
    Clear,
    /// Commit `0` as an ordinary value.
    CommitZero,
}

/// Options recognized when constructing a
/// [`MeasurementInput`](crate::MeasurementInput).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasurementConfig {
    /// Starting value in millimeters; `None` starts with empty fields.
    pub initial_value: Option<i64>,
    pub unit: DisplayUnit,
    /// Opaque styling tag passed through to the presentation layer.
    pub fit_range: Option<String>,
    pub debounce: Duration,
    pub empty_policy: EmptyPolicy,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            initial_value: None,
            unit: DisplayUnit::default(),
            fit_range: None,
            debounce: DEFAULT_DEBOUNCE,
            empty_policy: EmptyPolicy::default(),
        }
    }
}

impl MeasurementConfig {
    pub fn new(unit: DisplayUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn with_initial_value(mut self, mm: i64) -> Self {
        self.initial_value = Some(mm);
        self
    }

    pub fn with_fit_range(mut self, tag: impl Into<String>) -> Self {
        self.fit_range = Some(tag.into());
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_empty_policy(mut self, policy: EmptyPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    /// Build a configuration from `MEASURE_*` environment variables.
    ///
    /// See [`MeasurementConfig::from_lookup`] for the recognized keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from a key lookup.
    ///
    /// Recognized keys: `MEASURE_UNIT` (`cm`/`in`), `MEASURE_INITIAL_MM`
    /// (integer), `MEASURE_FIT_RANGE`, `MEASURE_DEBOUNCE_MS` (integer) and
    /// `MEASURE_EMPTY` (`clear`/`zero`). Missing or blank keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        };

        let mut config = Self::default();

        if let Some((_, raw)) = get("MEASURE_UNIT") {
            config.unit = raw.parse().map_err(ConfigError::Unit)?;
        }
        if let Some((key, raw)) = get("MEASURE_INITIAL_MM") {
            let mm = raw
                .parse::<i64>()
                .map_err(|_| ConfigError::invalid(key, &raw, "an integer millimeter value"))?;
            config.initial_value = Some(mm);
        }
        if let Some((_, raw)) = get("MEASURE_FIT_RANGE") {
            config.fit_range = Some(raw);
        }
        if let Some((key, raw)) = get("MEASURE_DEBOUNCE_MS") {
            let ms = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::invalid(key, &raw, "milliseconds"))?;
            config.debounce = Duration::from_millis(ms);
        }
        if let Some((key, raw)) = get("MEASURE_EMPTY") {
            config.empty_policy = match raw.to_ascii_lowercase().as_str() {
                "clear" => EmptyPolicy::Clear,
                "zero" => EmptyPolicy::CommitZero,
                _ => return Err(ConfigError::invalid(key, &raw, "clear or zero")),
            };
        }

        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Unit(ParseUnitError),
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, expected: &'static str) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unit(err) => write!(f, "MEASURE_UNIT: {err}"),
            ConfigError::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "{key}: unsupported value '{value}'; expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Unit(err) => Some(err),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}
