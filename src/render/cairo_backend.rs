use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, PngEncode, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextOrientation,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango renderer drawing into an offscreen image surface.
///
/// Produces the same scene as `BitmapRenderer` with system fonts.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        Ok(Self {
            surface: create_surface(width, height)?,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        context.set_line_cap(cairo::LineCap::Round);
        for layer in &frame.layers {
            for rect in &layer.rects {
                draw_rect(context, *rect)?;
                stats.rects_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }

            for circle in &layer.circles {
                apply_color(context, circle.fill_color);
                context.new_sub_path();
                context.arc(circle.center_x, circle.center_y, circle.radius, 0.0, 2.0 * PI);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill circle", err))?;
                stats.circles_drawn += 1;
            }

            for text in &layer.texts {
                draw_text(context, text)?;
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let width = i32::try_from(frame.viewport.width).unwrap_or(i32::MAX);
        let height = i32::try_from(frame.viewport.height).unwrap_or(i32::MAX);
        if self.surface.width() != width || self.surface.height() != height {
            self.surface = create_surface(frame.viewport.width, frame.viewport.height)?;
        }

        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl PngEncode for CairoRenderer {
    fn encode_png(&self) -> ChartResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|err| ChartError::Encode(err.to_string()))?;
        Ok(bytes)
    }
}

fn create_surface(width: u32, height: u32) -> ChartResult<ImageSurface> {
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(ChartError::InvalidViewport { width, height });
    };
    if w <= 0 || h <= 0 {
        return Err(ChartError::InvalidViewport { width, height });
    }
    ImageSurface::create(Format::ARgb32, w, h)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let lead = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => f64::from(text_width) / 2.0,
        TextHAlign::Right => f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    apply_color(context, text.color);
    context.translate(text.x, text.y);
    if text.orientation == TextOrientation::Vertical {
        context.rotate(-FRAC_PI_2);
    }
    context.move_to(-lead, 0.0);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
