use crate::chart::{ChartLayout, ChartSpec, ChartStyle, SeriesSpec};
use crate::core::ticks::{
    VALUE_AXIS_TARGET_SPACING_PX, axis_tick_target_count, format_tick, nice_ticks, time_ticks,
};
use crate::core::{
    AxisFitTuning, DataPoint, LinearScale, PlotArea, StackedValue, fit_domain,
    project_line_segments, project_points, project_stacked_bars, stack_layers,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, text_height_px, text_width_px,
};

const TICK_LENGTH_PX: f64 = 4.0;
const TICK_LABEL_GAP_PX: f64 = 6.0;
const AXIS_LABEL_GAP_PX: f64 = 8.0;
const LEGEND_INSET_PX: f64 = 8.0;
const LEGEND_PADDING_PX: f64 = 8.0;
const LEGEND_SWATCH_WIDTH_PX: f64 = 22.0;
const LEGEND_ROW_GAP_PX: f64 = 6.0;

/// Pixel-space scales shared by every layer of one chart.
struct ChartGeometry {
    plot: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
    stacked: Vec<Vec<StackedValue>>,
}

impl ChartGeometry {
    fn fit(spec: &ChartSpec, style: &ChartStyle) -> ChartResult<Self> {
        if spec.time_points.is_empty() || spec.series.is_empty() {
            return Err(ChartError::InvalidData(
                "chart spec has nothing to plot".to_owned(),
            ));
        }
        let plot = style.plot_area()?;

        let stacked = match spec.layout {
            ChartLayout::StackedBar => {
                let layers: Vec<Vec<f64>> =
                    spec.series.iter().map(|series| series.values.clone()).collect();
                stack_layers(&layers)?
            }
            ChartLayout::Line => Vec::new(),
        };

        let half_bar = match spec.layout {
            ChartLayout::StackedBar => spec.bar_width * 0.5,
            ChartLayout::Line => 0.0,
        };
        let x_domain = fit_domain(
            spec.time_points
                .iter()
                .flat_map(|time| [time - half_bar, time + half_bar]),
            AxisFitTuning::time_axis(),
        )?;

        let y_domain = match spec.layout {
            ChartLayout::StackedBar => fit_domain(
                stacked
                    .iter()
                    .flatten()
                    .flat_map(|value| [value.base, value.top]),
                AxisFitTuning::value_axis(),
            )?,
            ChartLayout::Line => fit_domain(
                spec.series.iter().flat_map(|series| series.values.iter().copied()),
                AxisFitTuning::value_axis(),
            )?,
        };

        Ok(Self {
            plot,
            x_scale: LinearScale::new(x_domain, plot.x_span())?,
            y_scale: LinearScale::new(y_domain, plot.y_span())?,
            stacked,
        })
    }
}

/// Centers a 1px stroke on a pixel row or column.
fn crisp(pixel: f64) -> f64 {
    pixel.floor() + 0.5
}

/// Lays out the full chart scene: grid, series, axes with labels, title and
/// legend.
pub fn build_render_frame(spec: &ChartSpec, style: &ChartStyle) -> ChartResult<RenderFrame> {
    let geometry = ChartGeometry::fit(spec, style)?;
    let mut frame = RenderFrame::new(style.viewport).with_background(style.background_color);

    push_value_axis(&mut frame, &geometry, style)?;
    push_time_axis(&mut frame, spec, &geometry, style)?;
    match spec.layout {
        ChartLayout::Line => push_line_series(&mut frame, spec, &geometry, style)?,
        ChartLayout::StackedBar => push_stacked_bars(&mut frame, spec, &geometry, style)?,
    }
    push_titles(&mut frame, spec, &geometry, style);
    push_legend(&mut frame, spec, &geometry, style);

    Ok(frame)
}

fn push_value_axis(
    frame: &mut RenderFrame,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) -> ChartResult<()> {
    let plot = geometry.plot;
    let (start, end) = geometry.y_scale.domain();
    let target = axis_tick_target_count(plot.height, VALUE_AXIS_TARGET_SPACING_PX, 2, 10);
    let label_height = text_height_px(style.tick_font_size_px);

    for tick in nice_ticks(start, end, target) {
        let y = crisp(geometry.y_scale.domain_to_pixel(tick)?);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(plot.left, y, plot.right(), y, 1.0, style.grid_color),
        );
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.left - TICK_LENGTH_PX, y, plot.left, y, 1.0, style.axis_color),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_tick(tick),
                plot.left - TICK_LENGTH_PX - TICK_LABEL_GAP_PX,
                y - label_height / 2.0,
                style.tick_font_size_px,
                style.text_color,
                TextHAlign::Right,
            ),
        );
    }
    Ok(())
}

fn push_time_axis(
    frame: &mut RenderFrame,
    spec: &ChartSpec,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) -> ChartResult<()> {
    let plot = geometry.plot;
    let (start, end) = geometry.x_scale.domain();

    for tick in time_ticks(&spec.time_points, plot.width)
        .into_iter()
        .filter(|tick| (start..=end).contains(tick))
    {
        let x = crisp(geometry.x_scale.domain_to_pixel(tick)?);
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(x, plot.bottom(), x, plot.bottom() + TICK_LENGTH_PX, 1.0, style.axis_color),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_tick(tick),
                x,
                plot.bottom() + TICK_LENGTH_PX + TICK_LABEL_GAP_PX,
                style.tick_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ),
        );
    }

    frame.push_rect(
        CanvasLayerKind::Axis,
        RectPrimitive::new(
            crisp(plot.left),
            crisp(plot.top),
            plot.width.floor(),
            plot.height.floor(),
            Color::WHITE.with_alpha(0.0),
        )
        .with_border(1.0, style.axis_color),
    );
    Ok(())
}

fn push_line_series(
    frame: &mut RenderFrame,
    spec: &ChartSpec,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) -> ChartResult<()> {
    for series in &spec.series {
        let points = series_points(&spec.time_points, series);
        for segment in project_line_segments(&points, geometry.x_scale, geometry.y_scale)? {
            frame.push_line(
                CanvasLayerKind::Series,
                LinePrimitive::new(
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    style.line_width_px,
                    series.color,
                ),
            );
        }
        for (x, y) in project_points(&points, geometry.x_scale, geometry.y_scale)? {
            frame.push_circle(
                CanvasLayerKind::Series,
                CirclePrimitive::new(x, y, style.marker_radius_px, series.color),
            );
        }
    }
    Ok(())
}

fn series_points(time_points: &[f64], series: &SeriesSpec) -> Vec<DataPoint> {
    time_points
        .iter()
        .zip(&series.values)
        .map(|(time, value)| DataPoint::new(*time, *value))
        .collect()
}

fn push_stacked_bars(
    frame: &mut RenderFrame,
    spec: &ChartSpec,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) -> ChartResult<()> {
    let bars = project_stacked_bars(
        &spec.time_points,
        &geometry.stacked,
        geometry.x_scale,
        geometry.y_scale,
        spec.bar_width,
    )?;

    for bar in bars {
        let Some(series) = spec.series.get(bar.layer) else {
            continue;
        };
        frame.push_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(
                bar.x_left,
                bar.y_top,
                bar.width(),
                bar.height(),
                series.color.with_alpha(style.bar_alpha),
            ),
        );
    }
    Ok(())
}

fn push_titles(
    frame: &mut RenderFrame,
    spec: &ChartSpec,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) {
    let plot = geometry.plot;
    let title_height = text_height_px(style.title_font_size_px);
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            spec.title.clone(),
            f64::from(style.viewport.width) / 2.0,
            ((plot.top - title_height) / 2.0).max(2.0),
            style.title_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );

    let x_label_top = plot.bottom()
        + TICK_LENGTH_PX
        + TICK_LABEL_GAP_PX
        + text_height_px(style.tick_font_size_px)
        + AXIS_LABEL_GAP_PX;
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            spec.x_label.clone(),
            plot.left + plot.width / 2.0,
            x_label_top,
            style.axis_label_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );

    if !spec.y_label.is_empty() {
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                spec.y_label.clone(),
                AXIS_LABEL_GAP_PX,
                plot.top + plot.height / 2.0,
                style.axis_label_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .vertical(),
        );
    }
}

fn push_legend(
    frame: &mut RenderFrame,
    spec: &ChartSpec,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) {
    let font_size = style.legend_font_size_px;
    let text_height = text_height_px(font_size);
    let row_height = text_height + LEGEND_ROW_GAP_PX;
    let widest_label = spec
        .series
        .iter()
        .map(|series| text_width_px(&series.label, font_size))
        .fold(0.0, f64::max);

    let rows = spec.series.len() as f64;
    let box_width = LEGEND_PADDING_PX * 2.0 + LEGEND_SWATCH_WIDTH_PX + 6.0 + widest_label;
    let box_height = LEGEND_PADDING_PX * 2.0 + rows * row_height - LEGEND_ROW_GAP_PX;
    let left = geometry.plot.right() - LEGEND_INSET_PX - box_width;
    let top = geometry.plot.top + LEGEND_INSET_PX;

    frame.push_rect(
        CanvasLayerKind::Legend,
        RectPrimitive::new(left, top, box_width, box_height, style.legend_background_color)
            .with_border(1.0, style.legend_border_color),
    );

    for (index, series) in spec.series.iter().enumerate() {
        let row_top = top + LEGEND_PADDING_PX + index as f64 * row_height;
        let swatch_left = left + LEGEND_PADDING_PX;
        let center_y = row_top + text_height / 2.0;
        match spec.layout {
            ChartLayout::Line => {
                frame.push_line(
                    CanvasLayerKind::Legend,
                    LinePrimitive::new(
                        swatch_left,
                        center_y,
                        swatch_left + LEGEND_SWATCH_WIDTH_PX,
                        center_y,
                        style.line_width_px,
                        series.color,
                    ),
                );
                frame.push_circle(
                    CanvasLayerKind::Legend,
                    CirclePrimitive::new(
                        swatch_left + LEGEND_SWATCH_WIDTH_PX / 2.0,
                        center_y,
                        style.marker_radius_px,
                        series.color,
                    ),
                );
            }
            ChartLayout::StackedBar => frame.push_rect(
                CanvasLayerKind::Legend,
                RectPrimitive::new(
                    swatch_left,
                    row_top,
                    LEGEND_SWATCH_WIDTH_PX,
                    text_height,
                    series.color.with_alpha(style.bar_alpha),
                ),
            ),
        }
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                series.label.clone(),
                swatch_left + LEGEND_SWATCH_WIDTH_PX + 6.0,
                row_top,
                font_size,
                style.text_color,
                TextHAlign::Left,
            ),
        );
    }
}
