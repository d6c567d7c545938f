use egui::{Color32, Stroke, Visuals};
use measure_core::{DisplayUnit, Status};

const ERROR_COLOR: Color32 = Color32::from_rgb(0xd9, 0x3f, 0x3f);
const OK_COLOR: Color32 = Color32::from_rgb(0x3c, 0xa5, 0x5c);
const PENDING_COLOR: Color32 = Color32::from_rgb(0xe0, 0xa8, 0x2e);

/// Frame colors for a measurement field, derived from its [`Status`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPalette {
    pub border: Stroke,
    /// Inner ring painted while a commit is outstanding.
    pub pending: Option<Stroke>,
    pub text: Color32,
}

impl FieldPalette {
    /// Error wins over ok; pending is layered on top of either.
    pub fn for_status(status: Status, visuals: &Visuals) -> Self {
        let base = visuals.widgets.inactive.bg_stroke;
        let border = if status.error {
            Stroke::new(1.5, ERROR_COLOR)
        } else if status.has_value {
            Stroke::new(1.5, OK_COLOR)
        } else {
            base
        };
        let text = if status.error {
            ERROR_COLOR
        } else {
            visuals.text_color()
        };
        Self {
            border,
            pending: status.pending.then(|| Stroke::new(1.0, PENDING_COLOR)),
            text,
        }
    }
}

/// Styling tags for a field, in the order a stylesheet would see them.
///
/// `fit_range` is appended verbatim.
pub fn class_names(status: Status, unit: DisplayUnit, fit_range: Option<&str>) -> Vec<String> {
    let mut names = vec![
        "measurement-input".to_string(),
        format!("measurement-units-{}", unit.mark()),
    ];
    if status.error {
        names.push("measurement-input-error".to_string());
    } else if status.has_value {
        names.push("measurement-input-ok".to_string());
    }
    if status.pending {
        names.push("measurement-input-pending".to_string());
    }
    if let Some(tag) = fit_range {
        names.push(tag.to_string());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: bool, has_value: bool, pending: bool) -> Status {
        Status {
            error,
            has_value,
            pending,
        }
    }

    #[test]
    fn error_border_overrides_ok() {
        let visuals = Visuals::dark();
        let palette = FieldPalette::for_status(status(true, true, true), &visuals);
        assert_eq!(palette.border.color, ERROR_COLOR);
        assert_eq!(palette.text, ERROR_COLOR);
        assert!(palette.pending.is_some());
    }

    #[test]
    fn settled_value_is_ok_without_pending_ring() {
        let visuals = Visuals::light();
        let palette = FieldPalette::for_status(status(false, true, false), &visuals);
        assert_eq!(palette.border.color, OK_COLOR);
        assert_eq!(palette.text, visuals.text_color());
        assert_eq!(palette.pending, None);
    }

    #[test]
    fn empty_field_uses_theme_stroke() {
        let visuals = Visuals::dark();
        let palette = FieldPalette::for_status(Status::default(), &visuals);
        assert_eq!(palette.border, visuals.widgets.inactive.bg_stroke);
    }

    #[test]
    fn class_names_follow_status() {
        assert_eq!(
            class_names(status(false, true, true), DisplayUnit::Centimeters, Some("fit-tight")),
            vec![
                "measurement-input",
                "measurement-units-cm",
                "measurement-input-ok",
                "measurement-input-pending",
                "fit-tight",
            ]
        );
        assert_eq!(
            class_names(status(true, true, false), DisplayUnit::Inches, None),
            vec![
                "measurement-input",
                "measurement-units-in",
                "measurement-input-error",
            ]
        );
        assert_eq!(
            class_names(Status::default(), DisplayUnit::Inches, None),
            vec!["measurement-input", "measurement-units-in"]
        );
    }
}
