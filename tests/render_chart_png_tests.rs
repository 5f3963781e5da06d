use epi_chart::chart::{ChartKind, ChartRenderer, ChartStyle, render_chart, render_chart_with_style};
use epi_chart::core::Viewport;
use epi_chart::render::BitmapRenderer;
use epi_chart::simulation::ModelType;
use image::RgbaImage;
use std::sync::Arc;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png)
        .expect("decodable png")
        .to_rgba8()
}

fn contains_color(image: &RgbaImage, rgb: [u8; 3]) -> bool {
    image
        .pixels()
        .any(|pixel| pixel.0 == [rgb[0], rgb[1], rgb[2], 255])
}

fn contains_color_near(image: &RgbaImage, rgb: [u8; 3], tolerance: u8) -> bool {
    image.pixels().any(|pixel| {
        pixel.0[..3]
            .iter()
            .zip(rgb)
            .all(|(channel, expected)| channel.abs_diff(expected) <= tolerance)
    })
}

#[test]
fn reply_without_table_renders_fallback_png() {
    let png = render_chart("I could not run the simulation.", "line").expect("render");

    assert!(png.starts_with(&PNG_SIGNATURE));
    let image = decode(&png);
    assert_eq!(image.dimensions(), (800, 500));
    assert!(contains_color(&image, [0x19, 0x76, 0xd2]));
    assert!(contains_color(&image, [0xd3, 0x2f, 0x2f]));
    assert!(contains_color(&image, [0x38, 0x8e, 0x3c]));
}

#[test]
fn unknown_chart_type_renders_like_line() {
    let text = "Month S I R\n0 990 10 0\n1 950 40 10\n2 900 60 40\n";
    let line = render_chart(text, "line").expect("line");
    let other = render_chart(text, "donut").expect("donut");
    assert_eq!(line, other);
}

#[test]
fn rendering_is_deterministic() {
    let text = "Month S E I R\n0 990 5 5 0\n1 950 20 20 10\n";
    let first = render_chart(text, "bar").expect("first");
    let second = render_chart(text, "bar").expect("second");
    assert_eq!(first, second);
}

#[test]
fn stacked_bar_png_decodes() {
    let text = "Month S I R\n0 990 10 0\n1 950 40 10\n2 900 60 40\n3 850 70 80\n";
    let png = render_chart(text, "bar").expect("render");
    let image = decode(&png);

    assert_eq!(image.dimensions(), (800, 500));
    // Susceptible blue at 0.6 alpha over white.
    assert!(contains_color_near(&image, [117, 173, 228], 2));
    assert!(!contains_color(&image, [0x19, 0x76, 0xd2]));
}

#[test]
fn chart_image_reports_what_was_drawn() {
    let style = ChartStyle::default();
    let text = "Month S E I R V\n0 100 0 1 0 0\n1 90 5 3 1 1\n";
    let chart = render_chart_with_style(text, ChartKind::Bar, &style).expect("render");

    assert_eq!(chart.kind, ChartKind::Bar);
    assert_eq!(chart.model_type, ModelType::Seirv);
    assert_eq!(chart.title, "SEIRV Simulation");
    assert_eq!(chart.series_labels.len(), 5);
    assert!(chart.png.starts_with(&PNG_SIGNATURE));
}

#[test]
fn custom_viewport_sets_png_size() {
    let style = ChartStyle {
        viewport: Viewport::new(400, 300),
        ..ChartStyle::default()
    };
    let chart = render_chart_with_style("", ChartKind::Line, &style).expect("render");
    assert_eq!(decode(&chart.png).dimensions(), (400, 300));
}

#[test]
fn viewport_too_small_for_margins_is_rejected() {
    let style = ChartStyle {
        viewport: Viewport::new(50, 50),
        ..ChartStyle::default()
    };
    let err = render_chart_with_style("", ChartKind::Line, &style).expect_err("must fail");
    assert!(format!("{err}").contains("invalid viewport size"));
}

#[test]
fn shared_style_renderer_reuses_its_buffer() {
    let style = Arc::new(ChartStyle::default());
    let mut renderer = ChartRenderer::bitmap(Arc::clone(&style)).expect("renderer");

    let first = renderer.render("", ChartKind::Line).expect("first");
    let second = renderer.render("", ChartKind::Line).expect("second");
    assert_eq!(first, second);

    let stats = renderer.renderer().last_stats();
    assert_eq!(stats.circles_drawn, 3 * 11 + 3);
    assert_eq!(stats.rects_drawn, 2);
}

#[test]
fn bitmap_renderer_rejects_zero_size() {
    let err = BitmapRenderer::new(0, 480).expect_err("zero width must fail");
    assert!(format!("{err}").contains("width=0"));
}

#[test]
fn single_row_with_huge_time_still_renders() {
    let png = render_chart("Month S I R\n100000000000000000 1 2 3\n", "line").expect("render");
    assert_eq!(decode(&png).dimensions(), (800, 500));
}
