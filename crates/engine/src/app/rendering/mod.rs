mod grading;
mod raster;
mod renderer;

pub use grading::ColorGrade;
pub use renderer::{Renderer, RendererError};
