//! # measure_core
//!
//! UI-agnostic core of the measurement input widget.
//!
//! A measurement input lets a user type a length in centimeters or in inches
//! plus eighths, and reports one canonical integer value in millimeters to
//! the host application:
//! - [`to_display`] / [`to_model`]: pure conversion between millimeters and
//!   field text
//! - [`MeasurementInput`]: the edit/validate/debounce/commit state machine
//! - [`MeasurementHost`]: callbacks the host receives on commit and focus
//!
//! ## Design Principles
//!
//! This crate does not depend on any graphics framework, event loop or
//! timer service. The debounce deadline is polled with [`MeasurementInput::tick`]
//! from the host's frame loop, and the host is passed into each event
//! handler, which keeps every transition synchronous and testable with
//! synthetic [`Instant`](std::time::Instant)s.

mod config;
mod convert;
mod debounce;
mod machine;
mod state;
mod text;
mod traits;
mod unit;

pub use config::{ConfigError, EmptyPolicy, MeasurementConfig};
pub use convert::{
    CanonicalValue, DisplayText, MAX_EXACT_MILLIMETERS, ModelError, to_display, to_model,
};
pub use debounce::{DEFAULT_DEBOUNCE, DebounceTimer};
pub use machine::{EditOutcome, Field, MeasurementInput};
pub use state::{Phase, Status};
pub use text::{is_valid_fraction_text, is_valid_whole_text, normalize_decimal_separator};
pub use traits::MeasurementHost;
pub use unit::{DisplayUnit, ParseUnitError};
