use epi_chart::chart::{ChartKind, ChartLayout, ChartRenderer, ChartSpec, ChartStyle, build_render_frame};
use epi_chart::core::Viewport;
use epi_chart::render::{CanvasLayerKind, NullRenderer, TextOrientation};
use std::sync::Arc;

fn fallback_frame(kind: ChartKind) -> epi_chart::render::RenderFrame {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("", kind, &style);
    build_render_frame(&spec, &style).expect("frame")
}

#[test]
fn line_chart_has_segments_and_markers_per_series() {
    let frame = fallback_frame(ChartKind::Line);
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");

    assert_eq!(series.lines.len(), 3 * 10);
    assert_eq!(series.circles.len(), 3 * 11);
    assert!(series.rects.is_empty());
}

#[test]
fn stacked_bar_chart_has_one_rect_per_value() {
    let frame = fallback_frame(ChartKind::Bar);
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");

    assert_eq!(series.rects.len(), 3 * 11);
    assert!(series.lines.is_empty());
    assert!(series.circles.is_empty());
    assert!(
        series
            .rects
            .iter()
            .all(|rect| (rect.fill_color.alpha - 0.6).abs() <= 1e-9)
    );
}

#[test]
fn stacked_segments_sit_on_top_of_each_other() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("", ChartKind::Bar, &style);
    assert_eq!(spec.layout, ChartLayout::StackedBar);

    let frame = build_render_frame(&spec, &style).expect("frame");
    let rects = &frame.layer(CanvasLayerKind::Series).expect("series").rects;
    let points = spec.time_points.len();

    for index in 0..points {
        let susceptible = rects[index];
        let infected = rects[points + index];
        let removed = rects[2 * points + index];
        assert!((infected.y + infected.height - susceptible.y).abs() <= 1e-6);
        assert!((removed.y + removed.height - infected.y).abs() <= 1e-6);
        assert!((susceptible.x - infected.x).abs() <= 1e-9);
    }
}

#[test]
fn legend_lists_every_series_and_paints_last() {
    let frame = fallback_frame(ChartKind::Line);
    let legend = frame.layer(CanvasLayerKind::Legend).expect("legend layer");

    let labels: Vec<&str> = legend.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(labels, vec!["Susceptible", "Infected", "Removed"]);
    assert_eq!(legend.rects.len(), 1);
    assert_eq!(
        frame.layers.last().map(|layer| layer.kind),
        Some(CanvasLayerKind::Legend)
    );
}

#[test]
fn axis_layer_carries_title_and_axis_labels() {
    let frame = fallback_frame(ChartKind::Line);
    let axis = frame.layer(CanvasLayerKind::Axis).expect("axis layer");

    let find = |needle: &str| axis.texts.iter().find(|text| text.text == needle);
    assert!(find("SIR Simulation").is_some());
    assert!(find("Month").is_some());
    let y_label = find("Number of People").expect("value axis label");
    assert_eq!(y_label.orientation, TextOrientation::Vertical);

    assert!(find("0").is_some());
    assert!(find("120").is_some());
}

#[test]
fn gridlines_stay_inside_the_plot() {
    let style = ChartStyle::default();
    let plot = style.plot_area().expect("plot area");
    let frame = fallback_frame(ChartKind::Line);
    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid layer");

    assert!(grid.lines.len() >= 2);
    for line in &grid.lines {
        assert!(line.y1 >= plot.top - 1.0 && line.y1 <= plot.bottom() + 1.0);
        assert_eq!(line.x1, plot.left);
        assert_eq!(line.x2, plot.right());
    }
}

#[test]
fn null_renderer_counts_match_frame() {
    let style = Arc::new(ChartStyle::default());
    let mut renderer =
        ChartRenderer::new(NullRenderer::default(), Arc::clone(&style)).expect("renderer");

    let spec = renderer.draw("", ChartKind::Line).expect("draw");
    let frame = build_render_frame(&spec, &style).expect("frame");
    let null = renderer.renderer();

    assert_eq!(null.last_line_count, frame.line_count());
    assert_eq!(null.last_circle_count, 3 * 11 + 3);
    assert_eq!(null.last_text_count, frame.text_count());
    assert!(null.last_rect_count >= 2);
}

#[test]
fn frame_uses_style_viewport() {
    let style = ChartStyle {
        viewport: Viewport::new(640, 360),
        ..ChartStyle::default()
    };
    let spec = ChartSpec::from_reply("", ChartKind::Line, &style);
    let frame = build_render_frame(&spec, &style).expect("frame");

    assert_eq!(frame.viewport, Viewport::new(640, 360));
    frame.validate().expect("valid frame");
}

#[test]
fn flat_zero_series_still_lays_out() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Month S I R\n0 0 0 0\n1 0 0 0\n", ChartKind::Bar, &style);
    let frame = build_render_frame(&spec, &style).expect("frame");

    frame.validate().expect("valid frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series");
    assert!(series.rects.iter().all(|rect| rect.height.abs() <= 1e-9));
}

#[test]
fn single_time_point_renders_markers_without_segments() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Month S I R\n0 10 1 0\n", ChartKind::Line, &style);
    let frame = build_render_frame(&spec, &style).expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series");

    assert!(series.lines.is_empty());
    assert_eq!(series.circles.len(), 3);
}
