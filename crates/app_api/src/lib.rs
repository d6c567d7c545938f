use egui::Context;

/// An application hosted by the platform event loop.
pub trait UiApp {
    fn ui(&mut self, ctx: &Context);

    /// The window is closing. Runs once, before the event loop exits.
    fn on_exit(&mut self) {}
}
