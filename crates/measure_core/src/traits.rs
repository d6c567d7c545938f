//! Host-side callbacks for a measurement input.
//!
//! The host is passed into every event handler rather than stored in the
//! widget, so a widget that has been unmounted has no way left to call back.

/// Receiver of committed values and focus notifications.
///
/// Any `FnMut(i64)` closure is a host that only listens to `on_change`:
///
/// ```
/// use measure_core::{MeasurementConfig, MeasurementInput};
///
/// let mut seen = Vec::new();
/// let mut input = MeasurementInput::new(MeasurementConfig::default());
/// input.on_whole_change("15.5", std::time::Instant::now(), &mut |mm: i64| seen.push(mm));
/// input.on_blur(&mut |mm: i64| seen.push(mm));
/// assert_eq!(seen, vec![155]);
/// ```
pub trait MeasurementHost {
    /// A value was committed. Called exactly once per successful commit and
    /// never while the widget is in error.
    fn on_change(&mut self, value_mm: i64);

    /// The field received focus.
    fn on_focus(&mut self) {}

    /// An empty field was committed under
    /// [`EmptyPolicy::Clear`](crate::EmptyPolicy::Clear).
    fn on_clear(&mut self) {}
}

impl<F: FnMut(i64)> MeasurementHost for F {
    #[inline]
    fn on_change(&mut self, value_mm: i64) {
        self(value_mm)
    }
}
