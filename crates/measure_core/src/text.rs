//! Raw-text format rules for the measurement fields.
//!
//! These checks run on every keystroke before any numeric conversion, so
//! they are plain byte scans rather than a general number parser.

use std::borrow::Cow;

/// Returns `true` if `s` is acceptable whole-field text.
///
/// Accepted: ASCII digits with at most one decimal separator (`.` or `,`)
/// anywhere, including the empty string and a lone separator.
///
/// # Examples
///
/// ```
/// use measure_core::is_valid_whole_text;
///
/// assert!(is_valid_whole_text(""));
/// assert!(is_valid_whole_text("12.5"));
/// assert!(is_valid_whole_text(",5"));
/// assert!(is_valid_whole_text("7."));
/// assert!(!is_valid_whole_text("1.2.3"));
/// assert!(!is_valid_whole_text("-4"));
/// assert!(!is_valid_whole_text("1e3"));
/// ```
pub fn is_valid_whole_text(s: &str) -> bool {
    let mut seen_separator = false;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => {}
            b'.' | b',' if !seen_separator => seen_separator = true,
            _ => return false,
        }
    }
    true
}

/// Returns `true` if `s` is acceptable eighths-field text: empty or a single
/// digit `0`..=`7`.
///
/// # Examples
///
/// ```
/// use measure_core::is_valid_fraction_text;
///
/// assert!(is_valid_fraction_text(""));
/// assert!(is_valid_fraction_text("7"));
/// assert!(!is_valid_fraction_text("8"));
/// assert!(!is_valid_fraction_text("12"));
/// ```
pub fn is_valid_fraction_text(s: &str) -> bool {
    match s.as_bytes() {
        [] => true,
        [b'0'..=b'7'] => true,
        _ => false,
    }
}

/// Treat a comma as the decimal point.
///
/// Returns `Cow::Borrowed` when there is nothing to replace.
pub fn normalize_decimal_separator(s: &str) -> Cow<'_, str> {
    if s.contains(',') {
        Cow::Owned(s.replacen(',', ".", 1))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_text_allows_separator_in_any_position() {
        for ok in ["", ".", ",", "0", "15.5", ".5", "5.", "1,25", "000"] {
            assert!(is_valid_whole_text(ok), "{ok:?} should be accepted");
        }
    }

    #[test]
    fn whole_text_rejects_second_separator_and_non_digits() {
        for bad in ["1.2,3", "..", ",,", " 1", "1 ", "+1", "abc", "١٢", "inf", "NaN"] {
            assert!(!is_valid_whole_text(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn fraction_text_is_single_eighth_digit() {
        for d in '0'..='7' {
            assert!(is_valid_fraction_text(&d.to_string()));
        }
        for bad in ["8", "9", "00", "a", " ", "-1"] {
            assert!(!is_valid_fraction_text(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn normalize_borrows_when_no_comma() {
        assert!(matches!(normalize_decimal_separator("1.5"), Cow::Borrowed("1.5")));
        assert_eq!(normalize_decimal_separator("1,5"), "1.5");
    }
}
