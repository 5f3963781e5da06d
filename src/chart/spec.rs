use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::ChartStyle;
use crate::render::Color;
use crate::simulation::{
    ModelType, SimulationTable, detect_model_type, extract_table, fallback_table,
};

/// Stacked bars are only drawn for models with at most this many compartments.
pub const MAX_STACKED_COMPARTMENTS: usize = 3;
/// Above this many time points bars get the coarse width.
pub const COARSE_BAR_THRESHOLD: usize = 10;
/// Bar widths in time units.
pub const COARSE_BAR_WIDTH: f64 = 3.0;
pub const FINE_BAR_WIDTH: f64 = 0.5;

/// Chart kind requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    /// `"bar"` selects bars; every other string means a line chart.
    #[must_use]
    pub fn parse(kind: &str) -> Self {
        if kind == "bar" { Self::Bar } else { Self::Line }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout actually drawn after applying the rendering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartLayout {
    Line,
    StackedBar,
}

impl ChartLayout {
    /// Stacked bars only when bars were asked for and the stack stays small.
    #[must_use]
    pub fn choose(kind: ChartKind, compartment_count: usize) -> Self {
        if kind == ChartKind::Bar && compartment_count <= MAX_STACKED_COMPARTMENTS {
            Self::StackedBar
        } else {
            Self::Line
        }
    }
}

/// One plotted compartment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub code: String,
    pub label: String,
    pub color: Color,
    pub values: Vec<f64>,
}

/// Everything needed to draw a chart, independent of any backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub requested_kind: ChartKind,
    pub layout: ChartLayout,
    pub model_type: ModelType,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub time_points: Vec<f64>,
    pub series: Vec<SeriesSpec>,
    /// Bar width in time units; only meaningful for stacked bars.
    pub bar_width: f64,
    /// True when the reply had no usable table and the illustrative dataset
    /// was drawn instead.
    pub used_fallback: bool,
}

impl ChartSpec {
    /// Detects the model, extracts the table and applies the rendering policy.
    #[must_use]
    pub fn from_reply(text: &str, kind: ChartKind, style: &ChartStyle) -> Self {
        let model_type = detect_model_type(text);
        let table = extract_table(text);
        if table.is_unplottable() {
            debug!(
                rows = table.row_count(),
                columns = table.compartment_count(),
                "no plottable table in reply, drawing fallback dataset"
            );
            return Self::from_table(model_type, &fallback_table(), kind, style, true);
        }
        Self::from_table(model_type, &table, kind, style, false)
    }

    #[must_use]
    pub fn from_table(
        model_type: ModelType,
        table: &SimulationTable,
        kind: ChartKind,
        style: &ChartStyle,
        used_fallback: bool,
    ) -> Self {
        let palette = style.palette();
        // Only unknown codes advance the color cycle.
        let mut unknown_seen = 0;
        let series: Vec<SeriesSpec> = table
            .columns()
            .map(|(code, values)| {
                let resolved = palette.resolve(code, unknown_seen);
                if !resolved.known {
                    unknown_seen += 1;
                }
                SeriesSpec {
                    code: code.to_owned(),
                    label: resolved.label,
                    color: resolved.color,
                    values: values.iter().map(|value| value.as_f64()).collect(),
                }
            })
            .collect();

        let layout = ChartLayout::choose(kind, series.len());
        let bar_width = if table.row_count() > COARSE_BAR_THRESHOLD {
            COARSE_BAR_WIDTH
        } else {
            FINE_BAR_WIDTH
        };
        debug!(
            model = %model_type,
            requested = %kind,
            ?layout,
            series = series.len(),
            points = table.row_count(),
            "built chart spec"
        );

        Self {
            requested_kind: kind,
            layout,
            model_type,
            title: model_type.chart_title(),
            x_label: table.time_axis().label().to_owned(),
            y_label: style.value_axis_label.clone(),
            time_points: table.time_points().iter().map(|time| *time as f64).collect(),
            series,
            bar_width,
            used_fallback,
        }
    }

    /// Legend labels in plot order.
    #[must_use]
    pub fn series_labels(&self) -> Vec<&str> {
        self.series.iter().map(|series| series.label.as_str()).collect()
    }
}
