mod geometry;
mod projection;
mod renderer;

pub use geometry::{draw_circle_outline, draw_line, draw_marker, draw_polygon};
pub use projection::{CanvasProjection, Viewport};
pub use renderer::{DisplaySettings, MapLayers, MapRenderer, Ring};
