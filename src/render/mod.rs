mod frame;
mod null_renderer;
mod primitives;

pub use frame::{CurveFrame, RenderFrame, TimeAxisRange};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, ColorScheme};

use crate::error::ChartResult;

/// Contract implemented by any view layer.
///
/// Views receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from buffering, aggregation and unit handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
