use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::BitMapBackend;
use plotters_backend::{BackendColor, BackendCoord, BackendStyle, DrawingBackend, DrawingErrorKind};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::glyphs;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PngEncode, RectPrimitive, RenderFrame, Renderer,
    TextPrimitive,
};

const RGB_CHANNELS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Draws frames through the `plotters` bitmap backend into an in-memory RGB
/// buffer and encodes it with `image`.
///
/// Labels use the built-in 5x7 bitmap font, so no system fonts are needed.
#[derive(Debug)]
pub struct BitmapRenderer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    last_stats: BitmapRenderStats,
}

impl BitmapRenderer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport { width, height });
        }

        Ok(Self {
            width,
            height,
            buffer: vec![u8::MAX; buffer_len(width, height)],
            last_stats: BitmapRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "plotters-bitmap+png"
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGB value at `(x, y)` of the last rendered frame.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * RGB_CHANNELS;
        let rgb = self.buffer.get(offset..offset + RGB_CHANNELS)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }

    #[must_use]
    pub fn last_stats(&self) -> BitmapRenderStats {
        self.last_stats
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * RGB_CHANNELS
}

/// Solid paint handed to the plotters backend.
#[derive(Clone, Copy)]
struct Paint {
    color: BackendColor,
    width: u32,
}

impl Paint {
    fn fill(color: Color) -> Self {
        Self {
            color: backend_color(color),
            width: 1,
        }
    }

    fn stroke(color: Color, width: f64) -> Self {
        Self {
            color: backend_color(color),
            width: width.round().max(1.0) as u32,
        }
    }
}

impl BackendStyle for Paint {
    fn color(&self) -> BackendColor {
        self.color
    }

    fn stroke_width(&self) -> u32 {
        self.width
    }
}

fn backend_color(color: Color) -> BackendColor {
    let [red, green, blue, _] = color.to_rgba8();
    BackendColor {
        alpha: color.alpha,
        rgb: (red, green, blue),
    }
}

fn coord(x: f64, y: f64) -> BackendCoord {
    (x.round() as i32, y.round() as i32)
}

type PaintResult<DB> = Result<(), DrawingErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn paint_frame<DB: DrawingBackend>(
    backend: &mut DB,
    frame: &RenderFrame,
) -> Result<BitmapRenderStats, DrawingErrorKind<DB::ErrorType>> {
    backend.ensure_prepared()?;
    let (width, height) = backend.get_size();
    backend.draw_rect(
        (0, 0),
        (width as i32 - 1, height as i32 - 1),
        &Paint::fill(frame.background),
        true,
    )?;

    let mut stats = BitmapRenderStats::default();
    for layer in &frame.layers {
        for rect in &layer.rects {
            paint_rect(backend, *rect)?;
            stats.rects_drawn += 1;
        }
        for line in &layer.lines {
            paint_line(backend, *line)?;
            stats.lines_drawn += 1;
        }
        for circle in &layer.circles {
            paint_circle(backend, *circle)?;
            stats.circles_drawn += 1;
        }
        for text in &layer.texts {
            paint_text(backend, text)?;
            stats.texts_drawn += 1;
        }
    }

    backend.present()?;
    Ok(stats)
}

fn paint_rect<DB: DrawingBackend>(backend: &mut DB, rect: RectPrimitive) -> PaintResult<DB> {
    let (left, top) = coord(rect.x, rect.y);
    let (right, bottom) = coord(rect.x + rect.width, rect.y + rect.height);

    // Fill corners are inclusive in plotters.
    if rect.fill_color.alpha > 0.0 && right > left && bottom > top {
        backend.draw_rect(
            (left, top),
            (right - 1, bottom - 1),
            &Paint::fill(rect.fill_color),
            true,
        )?;
    }
    if rect.border_width > 0.0 && rect.border_color.alpha > 0.0 {
        backend.draw_rect(
            (left, top),
            (right, bottom),
            &Paint::stroke(rect.border_color, rect.border_width),
            false,
        )?;
    }
    Ok(())
}

fn paint_line<DB: DrawingBackend>(backend: &mut DB, line: LinePrimitive) -> PaintResult<DB> {
    backend.draw_line(
        coord(line.x1, line.y1),
        coord(line.x2, line.y2),
        &Paint::stroke(line.color, line.stroke_width),
    )
}

fn paint_circle<DB: DrawingBackend>(backend: &mut DB, circle: CirclePrimitive) -> PaintResult<DB> {
    backend.draw_circle(
        coord(circle.center_x, circle.center_y),
        circle.radius.round().max(1.0) as u32,
        &Paint::fill(circle.fill_color),
        true,
    )
}

fn paint_text<DB: DrawingBackend>(backend: &mut DB, text: &TextPrimitive) -> PaintResult<DB> {
    let paint = Paint::fill(text.color);
    for (left, top, side) in glyphs::text_blocks(text) {
        backend.draw_rect(
            (left, top),
            (left + side - 1, top + side - 1),
            &paint,
            true,
        )?;
    }
    Ok(())
}

impl Renderer for BitmapRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.buffer.resize(buffer_len(width, height), u8::MAX);
        }

        // Translucent backgrounds composite over white.
        self.buffer.fill(u8::MAX);
        let stats = {
            let mut backend = BitMapBackend::with_buffer(self.buffer.as_mut_slice(), (width, height));
            paint_frame(&mut backend, frame)
                .map_err(|err| ChartError::InvalidData(format!("bitmap backend failed: {err}")))?
        };

        debug!(
            width,
            height,
            lines = stats.lines_drawn,
            rects = stats.rects_drawn,
            circles = stats.circles_drawn,
            texts = stats.texts_drawn,
            "painted frame"
        );
        self.last_stats = stats;
        Ok(())
    }
}

impl PngEncode for BitmapRenderer {
    fn encode_png(&self) -> ChartResult<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(&self.buffer, self.width, self.height, ExtendedColorType::Rgb8)
            .map_err(|err| ChartError::Encode(err.to_string()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::BitmapRenderer;
    use crate::core::Viewport;
    use crate::render::{
        CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame,
        Renderer, TextHAlign, TextPrimitive,
    };

    #[test]
    fn opaque_rect_fills_its_pixels_only() {
        let mut renderer = BitmapRenderer::new(10, 10).expect("renderer");
        let red = Color::rgb(1.0, 0.0, 0.0);
        let frame = RenderFrame::new(Viewport::new(10, 10)).with_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(2.0, 2.0, 3.0, 3.0, red),
        );
        renderer.render(&frame).expect("render");

        assert_eq!(renderer.pixel(2, 2), Some([255, 0, 0]));
        assert_eq!(renderer.pixel(4, 4), Some([255, 0, 0]));
        assert_eq!(renderer.pixel(5, 5), Some([255, 255, 255]));
        assert_eq!(renderer.pixel(10, 0), None);
    }

    #[test]
    fn half_alpha_blends_with_background() {
        let mut renderer = BitmapRenderer::new(4, 4).expect("renderer");
        let frame = RenderFrame::new(Viewport::new(4, 4)).with_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(0.0, 0.0, 4.0, 4.0, Color::BLACK.with_alpha(0.5)),
        );
        renderer.render(&frame).expect("render");

        let [red, green, blue] = renderer.pixel(1, 1).expect("pixel");
        assert!((i32::from(red) - 128).abs() <= 2);
        assert_eq!(red, green);
        assert_eq!(green, blue);
    }

    #[test]
    fn marker_center_takes_fill_color() {
        let mut renderer = BitmapRenderer::new(20, 20).expect("renderer");
        let blue = Color::rgb8(0x1f, 0x77, 0xb4);
        let frame = RenderFrame::new(Viewport::new(20, 20)).with_circle(
            CanvasLayerKind::Series,
            CirclePrimitive::new(10.0, 10.0, 4.0, blue),
        );
        renderer.render(&frame).expect("render");

        assert_eq!(renderer.pixel(10, 10), Some([0x1f, 0x77, 0xb4]));
        assert_eq!(renderer.pixel(1, 1), Some([255, 255, 255]));
        assert_eq!(renderer.last_stats().circles_drawn, 1);
    }

    #[test]
    fn labels_paint_glyph_blocks() {
        let mut renderer = BitmapRenderer::new(40, 20).expect("renderer");
        let frame = RenderFrame::new(Viewport::new(40, 20)).with_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new("-", 10.0, 5.0, 7.0, Color::BLACK, TextHAlign::Left),
        );
        renderer.render(&frame).expect("render");

        assert_eq!(renderer.pixel(12, 8), Some([0, 0, 0]));
        assert_eq!(renderer.pixel(12, 5), Some([255, 255, 255]));
        assert_eq!(renderer.last_stats().texts_drawn, 1);
    }

    #[test]
    fn render_resizes_to_frame_viewport() {
        let mut renderer = BitmapRenderer::new(4, 4).expect("renderer");
        let frame = RenderFrame::new(Viewport::new(20, 8)).with_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(0.0, 4.0, 19.0, 4.0, 2.0, Color::BLACK),
        );
        renderer.render(&frame).expect("render");

        assert_eq!(renderer.dimensions(), (20, 8));
        assert_eq!(renderer.last_stats().lines_drawn, 1);
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let err = BitmapRenderer::new(0, 10).expect_err("zero width must fail");
        assert!(format!("{err}").contains("invalid viewport"));
    }
}
