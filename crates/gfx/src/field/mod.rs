//! egui front end for [`measure_core::MeasurementInput`].
//!
//! The widget keeps no text of its own between frames: every frame the
//! edit buffers are refilled from the state machine, so a rejected
//! keystroke simply disappears on the next paint.
//!
//! Focus is tracked for the widget as a whole. Moving between the whole and
//! eighths fields of an inches input is neither a blur nor a new focus; the
//! blur commit happens once focus leaves both fields.

mod style;

pub use style::{FieldPalette, class_names};

use egui::{CornerRadius, Id, Key, Response, StrokeKind, TextEdit, Ui};
use measure_core::{EditOutcome, Field, MeasurementConfig, MeasurementHost, MeasurementInput};
use std::time::Instant;

const WHOLE_WIDTH: f32 = 72.0;
const FRACTION_WIDTH: f32 = 22.0;

/// What happened to a field during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldFrame {
    /// A value (or a clear) reached the host this frame.
    pub committed: bool,
    pub focused: bool,
}

pub struct MeasurementField {
    input: MeasurementInput,
    id: Id,
    whole_buf: String,
    fraction_buf: String,
    /// Either text field held focus at the end of the previous frame.
    had_focus: bool,
}

impl MeasurementField {
    pub fn new(id_salt: impl std::hash::Hash, config: MeasurementConfig) -> Self {
        Self {
            input: MeasurementInput::new(config),
            id: Id::new(id_salt),
            whole_buf: String::new(),
            fraction_buf: String::new(),
            had_focus: false,
        }
    }

    #[inline]
    pub fn input(&self) -> &MeasurementInput {
        &self.input
    }

    #[inline]
    pub fn whole_id(&self) -> Id {
        self.id.with("whole")
    }

    #[inline]
    pub fn fraction_id(&self) -> Id {
        self.id.with("fraction")
    }

    /// Tear down the widget. Returns `true` if a pending commit was dropped.
    pub fn unmount(self) -> bool {
        self.input.unmount()
    }

    pub fn show<H: MeasurementHost + ?Sized>(&mut self, ui: &mut Ui, host: &mut H) -> FieldFrame {
        self.show_at(ui, Instant::now(), host)
    }

    /// Run one frame of the widget with an explicit clock.
    pub fn show_at<H: MeasurementHost + ?Sized>(
        &mut self,
        ui: &mut Ui,
        now: Instant,
        host: &mut H,
    ) -> FieldFrame {
        let mut frame = FieldFrame {
            committed: self.input.tick(now, host),
            focused: false,
        };

        let palette = FieldPalette::for_status(self.input.status(), ui.visuals());
        let unit = self.input.unit();

        let inner = ui.horizontal(|ui| {
            ui.label(unit.mark());
            let whole = self.edit(ui, Field::Whole, palette, now, host);
            if unit.has_fraction() {
                let fraction = self.edit(ui, Field::Fraction, palette, now, host);
                ui.label("/8");
                whole.union(fraction)
            } else {
                whole
            }
        });

        let (whole_id, fraction_id) = (self.whole_id(), self.fraction_id());
        frame.focused = ui.memory(|m| m.has_focus(whole_id) || m.has_focus(fraction_id));
        match (self.had_focus, frame.focused) {
            (false, true) => self.input.on_focus(host),
            (true, false) => {
                let enter = ui.input(|i| i.key_pressed(Key::Enter));
                let outcome = if enter {
                    self.input.on_enter(host)
                } else {
                    self.input.on_blur(host)
                };
                frame.committed |= matches!(outcome, EditOutcome::Committed { .. });
            }
            _ => {}
        }
        self.had_focus = frame.focused;

        let rect = inner.inner.rect.expand(2.0);
        let painter = ui.painter();
        painter.rect_stroke(rect, CornerRadius::same(4), palette.border, StrokeKind::Outside);
        if let Some(pending) = palette.pending {
            painter.rect_stroke(rect.shrink(1.0), CornerRadius::same(3), pending, StrokeKind::Inside);
        }

        let tags = class_names(
            self.input.status(),
            unit,
            self.input.fit_range(),
        );
        inner.response.on_hover_text(tags.join(" "));

        if let Some(remaining) = self.input.remaining(now) {
            ui.ctx().request_repaint_after(remaining);
        }

        frame
    }

    fn edit<H: MeasurementHost + ?Sized>(
        &mut self,
        ui: &mut Ui,
        field: Field,
        palette: FieldPalette,
        now: Instant,
        host: &mut H,
    ) -> Response {
        let (id, width, buf) = match field {
            Field::Whole => (self.whole_id(), WHOLE_WIDTH, &mut self.whole_buf),
            Field::Fraction => (self.fraction_id(), FRACTION_WIDTH, &mut self.fraction_buf),
        };
        buf.clear();
        buf.push_str(match field {
            Field::Whole => &self.input.text().whole,
            Field::Fraction => &self.input.text().fraction,
        });

        let resp = ui.add(
            TextEdit::singleline(&mut *buf)
                .id(id)
                .desired_width(width)
                .text_color(palette.text)
                .frame(false),
        );

        if resp.changed() {
            let outcome = self.input.on_text_change(field, buf.as_str(), now, host);
            if outcome == EditOutcome::Rejected {
                log::trace!(target: "measure.input", "field {id:?} reverted");
            }
        }
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{CentralPanel, Context, Event, Modifiers, Pos2, RawInput, Rect, Vec2};
    use measure_core::DisplayUnit;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        changes: Vec<i64>,
        focus: usize,
    }

    impl MeasurementHost for Recorder {
        fn on_change(&mut self, value_mm: i64) {
            self.changes.push(value_mm);
        }

        fn on_focus(&mut self) {
            self.focus += 1;
        }
    }

    fn enter() -> Event {
        Event::Key {
            key: Key::Enter,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn raw_input(events: Vec<Event>) -> RawInput {
        RawInput {
            events,
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            ..Default::default()
        }
    }

    fn run_frame(
        ctx: &Context,
        field: &mut MeasurementField,
        events: Vec<Event>,
        now: Instant,
        host: &mut Recorder,
    ) -> FieldFrame {
        let mut frame = FieldFrame::default();
        let _ = ctx.run(raw_input(events), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                frame = field.show_at(ui, now, host);
            });
        });
        frame
    }

    #[test]
    fn typed_text_is_committed_after_debounce() {
        let ctx = Context::default();
        let mut host = Recorder::default();
        let mut field = MeasurementField::new(
            "len",
            MeasurementConfig::new(DisplayUnit::Centimeters),
        );
        let t0 = Instant::now();

        run_frame(&ctx, &mut field, Vec::new(), t0, &mut host);
        ctx.memory_mut(|m| m.request_focus(field.whole_id()));

        let frame = run_frame(
            &ctx,
            &mut field,
            vec![Event::Text("5".to_string())],
            t0 + Duration::from_millis(10),
            &mut host,
        );
        assert!(frame.focused);
        assert_eq!(host.focus, 1);
        assert_eq!(field.input().text().whole, "5");
        assert!(field.input().status().pending);
        assert!(host.changes.is_empty());

        let frame = run_frame(
            &ctx,
            &mut field,
            Vec::new(),
            t0 + Duration::from_millis(1_010),
            &mut host,
        );
        assert!(frame.committed);
        assert_eq!(host.changes, vec![50]);
    }

    #[test]
    fn enter_commits_immediately_and_normalizes() {
        let ctx = Context::default();
        let mut host = Recorder::default();
        let mut field = MeasurementField::new(
            "len-enter",
            MeasurementConfig::new(DisplayUnit::Centimeters),
        );
        let t0 = Instant::now();

        run_frame(&ctx, &mut field, Vec::new(), t0, &mut host);
        ctx.memory_mut(|m| m.request_focus(field.whole_id()));
        run_frame(
            &ctx,
            &mut field,
            vec![Event::Text("5".to_string())],
            t0 + ms(10),
            &mut host,
        );
        assert!(host.changes.is_empty());

        let frame = run_frame(&ctx, &mut field, vec![enter()], t0 + ms(20), &mut host);
        assert!(frame.committed);
        assert!(!frame.focused);
        assert_eq!(host.changes, vec![50]);
        assert_eq!(field.input().text().whole, "5.0");
        assert_eq!(field.input().next_deadline(), None);

        run_frame(&ctx, &mut field, Vec::new(), t0 + ms(5_000), &mut host);
        assert_eq!(host.changes, vec![50]);
    }

    #[test]
    fn moving_between_inch_fields_is_not_a_blur() {
        let ctx = Context::default();
        let mut host = Recorder::default();
        let mut field = MeasurementField::new(
            "len-in-edit",
            MeasurementConfig::new(DisplayUnit::Inches),
        );
        let t0 = Instant::now();

        run_frame(&ctx, &mut field, Vec::new(), t0, &mut host);
        ctx.memory_mut(|m| m.request_focus(field.whole_id()));
        run_frame(
            &ctx,
            &mut field,
            vec![Event::Text("4".to_string())],
            t0 + ms(10),
            &mut host,
        );

        ctx.memory_mut(|m| m.request_focus(field.fraction_id()));
        let frame = run_frame(
            &ctx,
            &mut field,
            vec![Event::Text("6".to_string())],
            t0 + ms(20),
            &mut host,
        );
        assert!(frame.focused);
        assert!(!frame.committed);
        assert!(host.changes.is_empty());
        assert_eq!(host.focus, 1);
        assert_eq!(field.input().text(), &measure_core::DisplayText::new("4", "6"));

        let frame = run_frame(&ctx, &mut field, vec![enter()], t0 + ms(30), &mut host);
        assert!(frame.committed);
        assert_eq!(host.changes, vec![102]);

        run_frame(&ctx, &mut field, Vec::new(), t0 + ms(5_000), &mut host);
        assert_eq!(host.changes, vec![102]);
    }

    #[test]
    fn inches_render_both_fields_without_dispatch() {
        let ctx = Context::default();
        let mut host = Recorder::default();
        let mut field = MeasurementField::new(
            "len-in",
            MeasurementConfig::new(DisplayUnit::Inches).with_initial_value(120),
        );

        let frame = run_frame(&ctx, &mut field, Vec::new(), Instant::now(), &mut host);
        assert_eq!(frame, FieldFrame::default());
        assert_eq!(field.input().text().whole, "4");
        assert_eq!(field.input().text().fraction, "6");
        assert!(host.changes.is_empty());
        assert!(!field.unmount());
    }
}
