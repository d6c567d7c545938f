//! Edit/validate/debounce/commit state machine.
//!
//! Every event handler runs synchronously: validate the raw field text,
//! resolve it through the conversion engine, update the edit state, then
//! either commit on the spot (blur, Enter) or arm the debounce timer.

use crate::config::{EmptyPolicy, MeasurementConfig};
use crate::convert::{CanonicalValue, DisplayText, to_display, to_model};
use crate::debounce::DebounceTimer;
use crate::state::{EditState, Phase, Status};
use crate::text::{is_valid_fraction_text, is_valid_whole_text};
use crate::traits::MeasurementHost;
use crate::unit::DisplayUnit;
use std::time::{Duration, Instant};

/// Which text field an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Integer/decimal part, present for every unit.
    Whole,
    /// Eighths of an inch; only exists for [`DisplayUnit::Inches`].
    Fraction,
}

/// What an event did to the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The raw text broke the field format and was discarded.
    Rejected,
    /// The text was well-formed but did not resolve to a value; the previous
    /// text stays on display and dispatch is suppressed.
    Unresolved,
    /// The value was stored and will be committed at `deadline`.
    Scheduled { deadline: Instant },
    /// The value was committed immediately.
    Committed { value: CanonicalValue },
}

#[derive(Clone, Copy, Debug)]
enum Trigger {
    Keystroke(Instant),
    Blur,
}

/// A single measurement input widget, minus rendering.
///
/// # Example
///
/// ```
/// use measure_core::{DisplayUnit, EditOutcome, MeasurementConfig, MeasurementInput};
/// use std::time::{Duration, Instant};
///
/// let mut changes = Vec::new();
/// let mut input = MeasurementInput::new(
///     MeasurementConfig::new(DisplayUnit::Centimeters).with_initial_value(120),
/// );
/// assert_eq!(input.text().whole, "12.0");
///
/// let t0 = Instant::now();
/// let outcome = input.on_whole_change("15.5", t0, &mut |mm: i64| changes.push(mm));
/// assert!(matches!(outcome, EditOutcome::Scheduled { .. }));
///
/// input.tick(t0 + Duration::from_millis(1000), &mut |mm: i64| changes.push(mm));
/// assert_eq!(changes, vec![155]);
/// ```
#[derive(Debug)]
pub struct MeasurementInput {
    unit: DisplayUnit,
    fit_range: Option<String>,
    empty_policy: EmptyPolicy,
    state: EditState,
    timer: DebounceTimer,
}

impl MeasurementInput {
    pub fn new(config: MeasurementConfig) -> Self {
        let MeasurementConfig {
            initial_value,
            unit,
            fit_range,
            debounce,
            empty_policy,
        } = config;

        Self {
            unit,
            fit_range,
            empty_policy,
            state: EditState {
                text: to_display(initial_value, unit),
                error: false,
                pending: false,
                value: initial_value,
            },
            timer: DebounceTimer::new(debounce),
        }
    }

    // =========================================================================
    // Read-Only Getters
    // =========================================================================

    #[inline]
    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    #[inline]
    pub fn fit_range(&self) -> Option<&str> {
        self.fit_range.as_deref()
    }

    /// Current canonical value in millimeters.
    #[inline]
    pub fn value(&self) -> CanonicalValue {
        self.state.value
    }

    /// Text the fields should display: always the last accepted text.
    #[inline]
    pub fn text(&self) -> &DisplayText {
        &self.state.text
    }

    #[inline]
    pub fn status(&self) -> Status {
        Status::of(&self.state)
    }

    pub fn phase(&self) -> Phase {
        if self.state.error {
            Phase::Error
        } else if self.timer.is_armed() {
            Phase::Editing
        } else {
            Phase::Idle
        }
    }

    /// When the armed debounce will fire, if any.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Time until the armed debounce fires; hosts use it to schedule the
    /// next [`tick`](Self::tick).
    #[inline]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Raw text of `field` changed to `raw`.
    pub fn on_text_change<H: MeasurementHost + ?Sized>(
        &mut self,
        field: Field,
        raw: &str,
        now: Instant,
        host: &mut H,
    ) -> EditOutcome {
        let mut text = self.state.text.clone();
        match field {
            Field::Whole => {
                if !is_valid_whole_text(raw) {
                    return self.reject(field, raw);
                }
                text.whole = raw.to_string();
            }
            Field::Fraction => {
                if !self.unit.has_fraction() || !is_valid_fraction_text(raw) {
                    return self.reject(field, raw);
                }
                text.fraction = raw.to_string();
            }
        }
        self.apply_edit(text, Trigger::Keystroke(now), host)
    }

    pub fn on_whole_change<H: MeasurementHost + ?Sized>(
        &mut self,
        raw: &str,
        now: Instant,
        host: &mut H,
    ) -> EditOutcome {
        self.on_text_change(Field::Whole, raw, now, host)
    }

    pub fn on_fraction_change<H: MeasurementHost + ?Sized>(
        &mut self,
        raw: &str,
        now: Instant,
        host: &mut H,
    ) -> EditOutcome {
        self.on_text_change(Field::Fraction, raw, now, host)
    }

    /// The field lost focus: re-evaluate the displayed text and commit
    /// immediately, normalizing the display.
    pub fn on_blur<H: MeasurementHost + ?Sized>(&mut self, host: &mut H) -> EditOutcome {
        let text = self.state.text.clone();
        self.apply_edit(text, Trigger::Blur, host)
    }

    /// Enter forces the whole field to give up focus, which commits through
    /// the blur path regardless of the debounce timer.
    pub fn on_enter<H: MeasurementHost + ?Sized>(&mut self, host: &mut H) -> EditOutcome {
        log::trace!(target: "measure.input", "enter pressed; committing via blur");
        self.on_blur(host)
    }

    /// The field gained focus. No state change.
    pub fn on_focus<H: MeasurementHost + ?Sized>(&mut self, host: &mut H) {
        host.on_focus();
    }

    /// Fire the debounce timer if it is due. Returns `true` if a value was
    /// dispatched to the host.
    pub fn tick<H: MeasurementHost + ?Sized>(&mut self, now: Instant, host: &mut H) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        log::trace!(target: "measure.input", "debounce fired");
        self.commit(false, host)
    }

    /// Tear the widget down, cancelling any outstanding debounce.
    ///
    /// Returns `true` if a scheduled commit was discarded.
    pub fn unmount(mut self) -> bool {
        let discarded = self.timer.cancel();
        if discarded {
            log::warn!(
                target: "measure.input",
                "unmounted with a pending commit of {:?}; dropping it",
                self.state.value
            );
        }
        discarded
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn reject(&self, field: Field, raw: &str) -> EditOutcome {
        log::trace!(target: "measure.input", "rejected {field:?} keystroke {raw:?}");
        EditOutcome::Rejected
    }

    fn apply_edit<H: MeasurementHost + ?Sized>(
        &mut self,
        text: DisplayText,
        trigger: Trigger,
        host: &mut H,
    ) -> EditOutcome {
        self.timer.cancel();

        match to_model(&text.whole, &text.fraction, self.unit) {
            Ok(value) => {
                self.state.error = false;
                self.state.pending = true;
                self.state.value = self.resolve_empty(value);
                self.state.text = text;
            }
            Err(err) => {
                log::debug!(target: "measure.input", "unresolved value {text:?}: {err}");
                self.state.error = true;
                self.state.pending = true;
                return EditOutcome::Unresolved;
            }
        }

        match trigger {
            Trigger::Blur => {
                self.commit(true, host);
                EditOutcome::Committed {
                    value: self.state.value,
                }
            }
            Trigger::Keystroke(now) => {
                let deadline = self.timer.arm(now);
                log::debug!(
                    target: "measure.input",
                    "scheduled {:?} in {:?}",
                    self.state.value,
                    self.timer.delay()
                );
                EditOutcome::Scheduled { deadline }
            }
        }
    }

    fn resolve_empty(&self, value: CanonicalValue) -> CanonicalValue {
        match (value, self.empty_policy) {
            (None, EmptyPolicy::CommitZero) => Some(0),
            (value, _) => value,
        }
    }

    fn commit<H: MeasurementHost + ?Sized>(&mut self, refresh_display: bool, host: &mut H) -> bool {
        if self.state.error {
            log::debug!(target: "measure.input", "commit suppressed while in error");
            return false;
        }

        self.state.pending = false;
        if refresh_display {
            self.state.text = to_display(self.state.value, self.unit);
        }

        match self.state.value {
            Some(mm) => {
                log::debug!(target: "measure.input", "commit {mm} mm");
                host.on_change(mm);
            }
            None => {
                log::debug!(target: "measure.input", "commit cleared value");
                host.on_clear();
            }
        }
        true
    }
}
