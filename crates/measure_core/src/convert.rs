//! Conversion between the canonical millimeter value and display text.
//!
//! Everything here is pure: no state, no side effects beyond trace logging.
//! Rounding is half away from zero in both directions (`f64::round`).

use crate::text::{is_valid_fraction_text, is_valid_whole_text, normalize_decimal_separator};
use crate::unit::DisplayUnit;
use std::fmt;

/// Canonical value exchanged with the host: integer millimeters, or `None`
/// when nothing has been entered.
pub type CanonicalValue = Option<i64>;

/// Largest magnitude (in millimeters) that survives the `f64` round trip
/// exactly. Anything beyond it is reported as [`ModelError::OutOfRange`].
pub const MAX_EXACT_MILLIMETERS: f64 = 9_007_199_254_740_992.0;

const EIGHTHS: f64 = 8.0;

/// Text shown in the two fields of a measurement input.
///
/// `fraction` is only used by [`DisplayUnit::Inches`] and holds a single
/// eighths digit `0`..=`7`; it is empty for centimeters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayText {
    pub whole: String,
    pub fraction: String,
}

impl DisplayText {
    pub fn new(whole: impl Into<String>, fraction: impl Into<String>) -> Self {
        Self {
            whole: whole.into(),
            fraction: fraction.into(),
        }
    }

    /// Returns `true` if both fields are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.whole.is_empty() && self.fraction.is_empty()
    }
}

/// Why a piece of field text could not be turned into a canonical value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// Whole-field text is not digits with at most one separator.
    InvalidNumber { text: String },
    /// Fraction-field text is not a single digit `0`..=`7`.
    InvalidFraction { text: String },
    /// The value is not finite or exceeds [`MAX_EXACT_MILLIMETERS`].
    OutOfRange,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidNumber { text } => write!(f, "invalid number: {text:?}"),
            ModelError::InvalidFraction { text } => {
                write!(f, "invalid eighths fraction: {text:?}")
            }
            ModelError::OutOfRange => f.write_str("value out of range"),
        }
    }
}

impl std::error::Error for ModelError {}

/// Render a canonical value as field text for `unit`.
///
/// Centimeters keep exactly one decimal. Inches floor the whole part and
/// round the remainder to eighths separately; a remainder that rounds up to
/// 8/8 carries into the whole inches.
///
/// # Examples
///
/// ```
/// use measure_core::{DisplayText, DisplayUnit, to_display};
///
/// assert_eq!(to_display(Some(120), DisplayUnit::Centimeters), DisplayText::new("12.0", ""));
/// assert_eq!(to_display(Some(120), DisplayUnit::Inches), DisplayText::new("4", "6"));
/// assert_eq!(to_display(None, DisplayUnit::Inches), DisplayText::default());
/// ```
pub fn to_display(value: CanonicalValue, unit: DisplayUnit) -> DisplayText {
    let Some(mm) = value else {
        return DisplayText::default();
    };

    match unit {
        DisplayUnit::Centimeters => DisplayText {
            whole: centimeters_text(mm),
            fraction: String::new(),
        },
        DisplayUnit::Inches => {
            let (whole, eighths) = split_inches(mm);
            DisplayText {
                whole: whole.to_string(),
                fraction: eighths.to_string(),
            }
        }
    }
}

/// Parse field text back into a canonical value.
///
/// A comma counts as the decimal point and a lone separator reads as zero.
/// Empty whole text yields `Ok(None)`; deciding what an empty field means
/// for the host is left to the caller (see
/// [`EmptyPolicy`](crate::EmptyPolicy)).
///
/// For inches, a non-empty fraction adds `fraction / 8` **millimeters** to
/// the base before rounding.
///
/// # Examples
///
/// ```
/// use measure_core::{DisplayUnit, to_model};
///
/// assert_eq!(to_model("15,5", "", DisplayUnit::Centimeters), Ok(Some(155)));
/// assert_eq!(to_model("4", "6", DisplayUnit::Inches), Ok(Some(102)));
/// assert_eq!(to_model("", "", DisplayUnit::Centimeters), Ok(None));
/// ```
pub fn to_model(
    whole: &str,
    fraction: &str,
    unit: DisplayUnit,
) -> Result<CanonicalValue, ModelError> {
    if !is_valid_whole_text(whole) {
        return Err(invalid_number(whole));
    }
    if !is_valid_fraction_text(fraction) {
        log::trace!(target: "measure.convert", "invalid fraction {fraction:?}");
        return Err(ModelError::InvalidFraction {
            text: fraction.to_string(),
        });
    }

    let normalized = normalize_decimal_separator(whole);
    let mut base = if normalized == "." {
        0.0
    } else if !normalized.is_empty() {
        let parsed: f64 = normalized.parse().map_err(|_| invalid_number(whole))?;
        parsed * unit.factor()
    } else {
        return Ok(None);
    };

    if unit.has_fraction()
        && let Some(&digit) = fraction.as_bytes().first()
    {
        base += f64::from(digit - b'0') / EIGHTHS;
    }

    let rounded = base.round();
    if !rounded.is_finite() || rounded.abs() > MAX_EXACT_MILLIMETERS {
        log::trace!(target: "measure.convert", "{whole:?} {unit} is out of range");
        return Err(ModelError::OutOfRange);
    }

    let mm = rounded as i64;
    log::trace!(target: "measure.convert", "{whole:?}+{fraction:?} {unit} -> {mm} mm");
    Ok(Some(mm))
}

fn invalid_number(text: &str) -> ModelError {
    log::trace!(target: "measure.convert", "invalid number {text:?}");
    ModelError::InvalidNumber {
        text: text.to_string(),
    }
}

fn centimeters_text(mm: i64) -> String {
    let sign = if mm < 0 { "-" } else { "" };
    let abs = mm.unsigned_abs();
    format!("{sign}{}.{}", abs / 10, abs % 10)
}

/// Whole inches (floored) and the rounded eighths remainder, with the
/// 8/8 case carried into the whole part.
fn split_inches(mm: i64) -> (i64, u8) {
    let inches = mm as f64 / DisplayUnit::Inches.factor();
    let floor = inches.floor();
    let eighths = (EIGHTHS * (inches - floor)).round();

    let whole = floor as i64;
    if eighths >= EIGHTHS {
        (whole + 1, 0)
    } else {
        (whole, eighths as u8)
    }
}
