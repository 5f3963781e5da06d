use approx::assert_relative_eq;
use epi_chart::core::{AxisFitTuning, LinearScale, Margins, PlotArea, Viewport, fit_domain};
use epi_chart::core::ticks::{nice_ticks, time_ticks};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((0.0, 2046.45), (444.0, 44.0)).expect("valid scale");

    let original = 796.0;
    let px = scale.domain_to_pixel(original).expect("to pixel");
    let recovered = scale.pixel_to_domain(px).expect("from pixel");

    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn value_axis_grows_upwards() {
    let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0)).expect("valid scale");
    assert_relative_eq!(scale.domain_to_pixel(0.0).expect("zero"), 400.0);
    assert_relative_eq!(scale.domain_to_pixel(100.0).expect("top"), 0.0);
    assert_relative_eq!(scale.span_to_pixels(25.0).expect("span"), 100.0);
}

#[test]
fn degenerate_domain_is_rejected() {
    let err = LinearScale::new((5.0, 5.0), (0.0, 100.0)).expect_err("must fail");
    assert!(format!("{err}").contains("non-zero"));
}

#[test]
fn fallback_domains_are_padded() {
    let times = [0.0, 12.0, 24.0, 36.0, 48.0, 60.0, 72.0, 84.0, 96.0, 108.0, 120.0];
    let (start, end) = fit_domain(times, AxisFitTuning::time_axis()).expect("time domain");
    assert_relative_eq!(start, -6.0, max_relative = 1e-12);
    assert_relative_eq!(end, 126.0, max_relative = 1e-12);

    let (low, high) = fit_domain([1949.0, 50.0, 0.0], AxisFitTuning::value_axis()).expect("value");
    assert_eq!(low, 0.0);
    assert_relative_eq!(high, 2046.45, max_relative = 1e-12);
}

#[test]
fn fitting_empty_or_non_finite_data_fails() {
    assert!(fit_domain(Vec::<f64>::new(), AxisFitTuning::value_axis()).is_err());
    assert!(fit_domain([1.0, f64::NAN], AxisFitTuning::value_axis()).is_err());
}

#[test]
fn plot_area_respects_margins() {
    let plot = PlotArea::inside(Viewport::default(), Margins::default()).expect("plot");
    assert_eq!((plot.left, plot.top), (80.0, 44.0));
    assert_eq!((plot.right(), plot.bottom()), (776.0, 444.0));
    assert!(PlotArea::inside(Viewport::new(90, 90), Margins::default()).is_none());
}

#[test]
fn fallback_months_get_round_ticks() {
    let times = [0.0, 12.0, 24.0, 36.0, 48.0, 60.0, 72.0, 84.0, 96.0, 108.0, 120.0];
    let ticks = time_ticks(&times, 696.0);
    assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]);

    let few = time_ticks(&[0.0, 1.0, 2.0], 696.0);
    assert_eq!(few, vec![0.0, 1.0, 2.0]);
}

#[test]
fn value_ticks_cover_the_outbreak_peak() {
    let ticks = nice_ticks(0.0, 2046.45, 8);
    assert_eq!(ticks.first().copied(), Some(0.0));
    assert!(ticks.iter().any(|tick| *tick >= 1949.0));
}

#[test]
fn huge_single_time_point_still_builds_a_scale() {
    let domain = fit_domain([1e17], AxisFitTuning::time_axis()).expect("time domain");
    assert!(domain.0 < domain.1);

    let scale = LinearScale::new(domain, (0.0, 600.0)).expect("scale over huge times");
    let pixel = scale.domain_to_pixel(1e17).expect("map");
    assert!((0.0..=600.0).contains(&pixel));
}
