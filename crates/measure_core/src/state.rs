//! Per-widget edit state and the status derived from it.

use crate::convert::{CanonicalValue, DisplayText};

/// Internal state for a single measurement input.
///
/// Managed exclusively by [`MeasurementInput`](crate::MeasurementInput).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditState {
    /// Last accepted field text. Always satisfies the field format rules.
    pub text: DisplayText,

    /// The last keystroke was accepted but could not be resolved to a value.
    pub error: bool,

    /// A commit is outstanding (timer armed) or blocked by `error`.
    pub pending: bool,

    /// Canonical value for `text`.
    pub value: CanonicalValue,
}

/// Styling-facing summary of an input's state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub error: bool,
    pub has_value: bool,
    pub pending: bool,
}

impl Status {
    pub(crate) fn of(state: &EditState) -> Self {
        Self {
            error: state.error,
            has_value: state.value.is_some(),
            pending: state.pending,
        }
    }
}

/// Where the edit state machine currently is.
///
/// Committing is transient and never observable between events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing outstanding.
    Idle,
    /// Valid text held, debounce timer armed.
    Editing,
    /// Last keystroke could not be resolved; dispatch is suppressed.
    Error,
}
