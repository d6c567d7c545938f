use app_api::UiApp;
use egui::{CentralPanel, Context, ScrollArea};
use gfx::MeasurementField;
use measure_core::{DisplayUnit, MeasurementConfig, MeasurementHost};
use mimalloc::MiMalloc;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Collects what the fields report, newest last.
struct MessageLog<'a> {
    messages: &'a mut Vec<String>,
}

impl MeasurementHost for MessageLog<'_> {
    fn on_change(&mut self, value_mm: i64) {
        self.messages.push(format!("Value changed to: {value_mm}"));
    }

    fn on_focus(&mut self) {
        log::debug!(target: "measure.demo", "field focused");
    }

    fn on_clear(&mut self) {
        self.messages.push("Value cleared".to_string());
    }
}

struct DemoApp {
    fields: Vec<MeasurementField>,
    messages: Vec<String>,
}

impl DemoApp {
    /// One field in the configured unit and one in the other unit, both
    /// starting from the same value.
    fn new(config: MeasurementConfig) -> Self {
        let other = match config.unit {
            DisplayUnit::Centimeters => DisplayUnit::Inches,
            DisplayUnit::Inches => DisplayUnit::Centimeters,
        };
        let mut second = config.clone();
        second.unit = other;

        Self {
            fields: vec![
                MeasurementField::new("primary", config),
                MeasurementField::new("secondary", second),
            ],
            messages: Vec::new(),
        }
    }
}

impl UiApp for DemoApp {
    fn ui(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Measurement input");
            ui.add_space(8.0);

            let mut host = MessageLog {
                messages: &mut self.messages,
            };
            for field in &mut self.fields {
                field.show(ui, &mut host);
                ui.add_space(4.0);
            }

            ui.separator();
            ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in &self.messages {
                        ui.label(message);
                    }
                });
        });
    }

    fn on_exit(&mut self) {
        for field in self.fields.drain(..) {
            field.unmount();
        }
    }
}

fn main() -> ExitCode {
    match platform::logging::init_from_env() {
        Ok(level) => log::debug!(target: "measure.demo", "logging at {level}"),
        Err(err) => eprintln!("logger: {err}"),
    }

    let config = match MeasurementConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(target: "measure.demo", "starting with {config:?}");

    match platform::run("Measurement input", DemoApp::new(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
