pub mod field;
mod renderer;

pub use field::{FieldFrame, FieldPalette, MeasurementField, class_names};
pub use renderer::{Renderer, RendererError};
