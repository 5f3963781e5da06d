use epi_chart::chart::{
    COARSE_BAR_WIDTH, ChartKind, ChartLayout, ChartSpec, ChartStyle, FINE_BAR_WIDTH,
};
use epi_chart::simulation::{FALLBACK_TIME_POINTS, ModelType};

const SEIRV_REPLY: &str = "\
Month S E I R V
0 49995 0 5 0 0
1 48000 900 600 300 200
2 45000 1800 1500 900 800
";

fn monthly_sir_reply(rows: u64) -> String {
    let mut text = String::from("Month S I R\n");
    for month in 0..rows {
        text.push_str(&format!("{month} {} {} {}\n", 1000 - month * 10, month * 5, month * 5));
    }
    text
}

#[test]
fn reply_without_table_uses_fallback_outbreak() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("No numbers here, sorry.", ChartKind::Line, &style);

    assert!(spec.used_fallback);
    assert_eq!(spec.model_type, ModelType::Sir);
    assert_eq!(spec.title, "SIR Simulation");
    assert_eq!(spec.x_label, "Month");
    assert_eq!(spec.y_label, "Number of People");
    assert_eq!(spec.series_labels(), vec!["Susceptible", "Infected", "Removed"]);

    let expected_times: Vec<f64> = FALLBACK_TIME_POINTS.iter().map(|t| *t as f64).collect();
    assert_eq!(spec.time_points, expected_times);
    assert_eq!(spec.series[0].values[0], 1949.0);
    assert_eq!(spec.series[2].values[10], 1904.0);
}

#[test]
fn fallback_title_still_follows_detected_keywords() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Vaccinated people are protected.", ChartKind::Line, &style);

    assert!(spec.used_fallback);
    assert_eq!(spec.title, "SIRV Simulation");
}

#[test]
fn bar_request_with_five_compartments_draws_lines() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply(SEIRV_REPLY, ChartKind::Bar, &style);

    assert_eq!(spec.requested_kind, ChartKind::Bar);
    assert_eq!(spec.layout, ChartLayout::Line);
    assert_eq!(spec.model_type, ModelType::Seirv);
    assert_eq!(
        spec.series_labels(),
        vec!["Susceptible", "Exposed", "Infected", "Removed", "Vaccinated"]
    );
}

#[test]
fn bar_request_with_four_compartments_draws_lines() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Month S E I R\n0 10 0 1 0\n", ChartKind::Bar, &style);
    assert_eq!(spec.layout, ChartLayout::Line);
}

#[test]
fn bar_request_with_three_compartments_stacks() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply(&monthly_sir_reply(4), ChartKind::Bar, &style);

    assert_eq!(spec.layout, ChartLayout::StackedBar);
    assert_eq!(spec.bar_width, FINE_BAR_WIDTH);
    assert!(!spec.used_fallback);
}

#[test]
fn bar_width_turns_coarse_above_ten_points() {
    let style = ChartStyle::default();

    let ten = ChartSpec::from_reply(&monthly_sir_reply(10), ChartKind::Bar, &style);
    assert_eq!(ten.bar_width, FINE_BAR_WIDTH);

    let eleven = ChartSpec::from_reply(&monthly_sir_reply(11), ChartKind::Bar, &style);
    assert_eq!(eleven.bar_width, COARSE_BAR_WIDTH);
}

#[test]
fn unknown_compartment_keeps_raw_code() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Month S I R D\n0 10 1 0 0\n", ChartKind::Line, &style);

    let labels = spec.series_labels();
    assert_eq!(labels, vec!["Susceptible", "Infected", "Removed", "D"]);

    let palette = style.palette();
    let dead = &spec.series[3];
    assert!(palette.codes().all(|code| {
        palette.get(code).map(|known| known.color) != Some(dead.color)
    }));
}

#[test]
fn first_unknown_code_takes_the_first_cycle_color() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Month S I R D\n0 10 1 0 0\n", ChartKind::Line, &style);

    assert_eq!(spec.series[3].color.to_hex(), "#1f77b4");
}

#[test]
fn known_codes_do_not_advance_the_cycle() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Month X S Y\n0 1 10 2\n", ChartKind::Line, &style);

    let colors: Vec<String> = spec.series.iter().map(|series| series.color.to_hex()).collect();
    assert_eq!(colors, vec!["#1f77b4", "#1976d2", "#ff7f0e"]);
}

#[test]
fn series_colors_follow_the_palette() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply(SEIRV_REPLY, ChartKind::Line, &style);

    let hex: Vec<String> = spec.series.iter().map(|series| series.color.to_hex()).collect();
    assert_eq!(hex, vec!["#1976d2", "#ffa000", "#d32f2f", "#388e3c", "#7b1fa2"]);
}

#[test]
fn day_tables_label_the_time_axis_day() {
    let style = ChartStyle::default();
    let spec = ChartSpec::from_reply("Day S I R\n0 10 1 0\n1 9 2 0\n", ChartKind::Line, &style);
    assert_eq!(spec.x_label, "Day");
}

#[test]
fn building_twice_gives_the_same_spec() {
    let style = ChartStyle::default();
    let first = ChartSpec::from_reply(SEIRV_REPLY, ChartKind::Line, &style);
    let second = ChartSpec::from_reply(SEIRV_REPLY, ChartKind::Line, &style);
    assert_eq!(first, second);
}

#[test]
fn chart_kind_parse_defaults_to_line() {
    assert_eq!(ChartKind::parse("bar"), ChartKind::Bar);
    assert_eq!(ChartKind::parse("Bar"), ChartKind::Line);
    assert_eq!(ChartKind::parse("scatter"), ChartKind::Line);
}
