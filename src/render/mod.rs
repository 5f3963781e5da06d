mod bitmap_backend;
mod frame;
mod glyphs;
mod null_renderer;
mod primitives;

pub use bitmap_backend::{BitmapRenderStats, BitmapRenderer};
pub use frame::{CanvasLayerKind, LayerPrimitives, RenderFrame};
pub use glyphs::{GLYPH_HEIGHT, glyph_scale, text_height_px, text_width_px};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextOrientation,
    TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart semantics.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

/// Backends that can hand back the last rendered frame as PNG bytes.
pub trait PngEncode {
    fn encode_png(&self) -> ChartResult<Vec<u8>>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
