mod frame;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use frame::RenderFrame;
pub use null_renderer::{NullRenderer, RenderStats};
pub use primitives::{
    AreaPrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_backend::{SvgRenderer, escape_xml};

use crate::error::StreamGraphResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from normalization and layout, and return
/// the drawable element they produced.
pub trait Renderer {
    type Element;

    fn render(&mut self, frame: &RenderFrame) -> StreamGraphResult<Self::Element>;
}
