//! Chart pipeline: reply text to chart spec to render frame to PNG.

mod frame_builder;
mod payload;
mod spec;
mod style;

use std::sync::Arc;

use tracing::debug;

use crate::error::ChartResult;
use crate::render::{PngEncode, BitmapRenderer, RenderFrame, Renderer};

pub use frame_builder::build_render_frame;
pub use payload::{ChartImage, ChartPayload};
pub use spec::{
    COARSE_BAR_THRESHOLD, COARSE_BAR_WIDTH, ChartKind, ChartLayout, ChartSpec, FINE_BAR_WIDTH,
    MAX_STACKED_COMPARTMENTS, SeriesSpec,
};
pub use style::{ChartStyle, CompartmentPalette, CompartmentStyle, SeriesStyle};

/// Turns simulation replies into charts on a single backend.
///
/// The style is shared read-only, so one `Arc<ChartStyle>` can back any
/// number of renderers on different threads.
pub struct ChartRenderer<R: Renderer> {
    renderer: R,
    style: Arc<ChartStyle>,
}

impl ChartRenderer<BitmapRenderer> {
    /// Bitmap renderer sized to the style's viewport.
    pub fn bitmap(style: Arc<ChartStyle>) -> ChartResult<Self> {
        style.validate()?;
        let renderer = BitmapRenderer::new(style.viewport.width, style.viewport.height)?;
        Ok(Self { renderer, style })
    }
}

impl<R: Renderer> ChartRenderer<R> {
    pub fn new(renderer: R, style: Arc<ChartStyle>) -> ChartResult<Self> {
        style.validate()?;
        Ok(Self { renderer, style })
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn spec(&self, text: &str, kind: ChartKind) -> ChartSpec {
        ChartSpec::from_reply(text, kind, &self.style)
    }

    pub fn frame(&self, text: &str, kind: ChartKind) -> ChartResult<RenderFrame> {
        build_render_frame(&self.spec(text, kind), &self.style)
    }

    /// Draws the chart on the backend and returns the spec that was drawn.
    pub fn draw(&mut self, text: &str, kind: ChartKind) -> ChartResult<ChartSpec> {
        let spec = self.spec(text, kind);
        let frame = build_render_frame(&spec, &self.style)?;
        self.renderer.render(&frame)?;
        Ok(spec)
    }
}

impl<R: Renderer + PngEncode> ChartRenderer<R> {
    /// Draws the chart and encodes it as PNG.
    pub fn render(&mut self, text: &str, kind: ChartKind) -> ChartResult<ChartImage> {
        let spec = self.draw(text, kind)?;
        let png = self.renderer.encode_png()?;
        debug!(
            bytes = png.len(),
            fallback = spec.used_fallback,
            "encoded chart png"
        );
        Ok(ChartImage::from_spec(spec, png))
    }
}

/// Renders `text` with the default style and returns PNG bytes.
///
/// `chart_type` is `"line"` or `"bar"`; anything else draws lines. A reply
/// without a simulation table still yields the illustrative fallback chart.
pub fn render_chart(text: &str, chart_type: &str) -> ChartResult<Vec<u8>> {
    render_chart_with_style(text, ChartKind::parse(chart_type), ChartStyle::shared_default())
        .map(ChartImage::into_png)
}

/// Renders `text` on a fresh bitmap backend using `style`.
pub fn render_chart_with_style(
    text: &str,
    kind: ChartKind,
    style: &ChartStyle,
) -> ChartResult<ChartImage> {
    style.validate()?;
    let spec = ChartSpec::from_reply(text, kind, style);
    let frame = build_render_frame(&spec, style)?;

    let mut renderer = BitmapRenderer::new(style.viewport.width, style.viewport.height)?;
    renderer.render(&frame)?;
    let png = renderer.encode_png()?;
    Ok(ChartImage::from_spec(spec, png))
}
