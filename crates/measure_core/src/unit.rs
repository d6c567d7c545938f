//! Display units a measurement can be edited in.

use std::fmt;
use std::str::FromStr;

/// The unit a widget renders its value in.
///
/// Fixed for the lifetime of one [`MeasurementInput`](crate::MeasurementInput);
/// the canonical value exchanged with the host is always millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayUnit {
    /// Centimeters with one decimal place.
    #[default]
    Centimeters,
    /// Whole inches plus an eighths-of-an-inch fraction field.
    Inches,
}

impl DisplayUnit {
    /// Millimeters per display unit.
    #[inline]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Centimeters => 10.0,
            Self::Inches => 25.4,
        }
    }

    /// Short label rendered next to the field.
    #[inline]
    pub const fn mark(self) -> &'static str {
        match self {
            Self::Centimeters => "cm",
            Self::Inches => "in",
        }
    }

    /// Returns `true` if this unit has a separate eighths field.
    #[inline]
    pub const fn has_fraction(self) -> bool {
        matches!(self, Self::Inches)
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mark())
    }
}

/// Error returned when a unit name is neither `cm` nor `in`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseUnitError {
    pub input: String,
}

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown display unit '{}' (expected cm or in)", self.input)
    }
}

impl std::error::Error for ParseUnitError {}

impl FromStr for DisplayUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("cm") {
            Ok(Self::Centimeters)
        } else if trimmed.eq_ignore_ascii_case("in") {
            Ok(Self::Inches)
        } else {
            Err(ParseUnitError {
                input: s.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_unit_is_centimeters() {
        assert_eq!(DisplayUnit::default(), DisplayUnit::Centimeters);
    }

    #[test]
    fn parses_unit_marks_case_insensitively() {
        assert_eq!("cm".parse(), Ok(DisplayUnit::Centimeters));
        assert_eq!(" IN ".parse(), Ok(DisplayUnit::Inches));
    }

    #[test]
    fn rejects_unknown_units() {
        let err = "mm".parse::<DisplayUnit>().unwrap_err();
        assert_eq!(err.input, "mm");
        assert_eq!(err.to_string(), "unknown display unit 'mm' (expected cm or in)");
    }

    #[test]
    fn only_inches_have_a_fraction_field() {
        assert!(!DisplayUnit::Centimeters.has_fraction());
        assert!(DisplayUnit::Inches.has_fraction());
        assert_eq!(DisplayUnit::Inches.to_string(), "in");
    }
}
