use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Margins, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Color and legend label of one compartment series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompartmentStyle {
    pub color: Color,
    pub label: String,
}

impl CompartmentStyle {
    fn new(color: Color, label: &str) -> Self {
        Self {
            color,
            label: label.to_owned(),
        }
    }
}

/// Resolved styling of one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub label: String,
    /// False when the code had no entry in the palette.
    pub known: bool,
}

/// Fixed compartment-code lookup for `S`, `E`, `I`, `R` and `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentPalette {
    entries: IndexMap<String, CompartmentStyle>,
    fallback_cycle: Vec<Color>,
}

static STANDARD_PALETTE: LazyLock<CompartmentPalette> = LazyLock::new(|| {
    let entries = [
        ("S", Color::rgb8(0x19, 0x76, 0xd2), "Susceptible"),
        ("E", Color::rgb8(0xff, 0xa0, 0x00), "Exposed"),
        ("I", Color::rgb8(0xd3, 0x2f, 0x2f), "Infected"),
        ("R", Color::rgb8(0x38, 0x8e, 0x3c), "Removed"),
        ("V", Color::rgb8(0x7b, 0x1f, 0xa2), "Vaccinated"),
    ]
    .into_iter()
    .map(|(code, color, label)| (code.to_owned(), CompartmentStyle::new(color, label)))
    .collect();

    // Neutral series cycle for codes outside the table.
    let fallback_cycle = vec![
        Color::rgb8(0x1f, 0x77, 0xb4),
        Color::rgb8(0xff, 0x7f, 0x0e),
        Color::rgb8(0x2c, 0xa0, 0x2c),
        Color::rgb8(0xd6, 0x27, 0x28),
        Color::rgb8(0x94, 0x67, 0xbd),
        Color::rgb8(0x8c, 0x56, 0x4b),
        Color::rgb8(0xe3, 0x77, 0xc2),
        Color::rgb8(0x7f, 0x7f, 0x7f),
    ];

    CompartmentPalette {
        entries,
        fallback_cycle,
    }
});

impl CompartmentPalette {
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_PALETTE
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CompartmentStyle> {
        self.entries.get(code)
    }

    /// Styling for `code`.
    ///
    /// Unknown codes keep their raw code as label and take the cycle color at
    /// `unknown_index`, the count of unknown codes plotted before this one.
    #[must_use]
    pub fn resolve(&self, code: &str, unknown_index: usize) -> SeriesStyle {
        match self.entries.get(code) {
            Some(style) => SeriesStyle {
                color: style.color,
                label: style.label.clone(),
                known: true,
            },
            None => SeriesStyle {
                color: self
                    .fallback_cycle
                    .get(unknown_index % self.fallback_cycle.len().max(1))
                    .copied()
                    .unwrap_or(Color::BLACK),
                label: code.to_owned(),
                known: false,
            },
        }
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Canvas and typography settings, built once and shared read-only.
///
/// The compartment palette is not part of the serialized form; it is always
/// the standard one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub viewport: Viewport,
    pub margins: Margins,
    pub background_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub legend_background_color: Color,
    pub legend_border_color: Color,
    pub title_font_size_px: f64,
    pub axis_label_font_size_px: f64,
    pub tick_font_size_px: f64,
    pub legend_font_size_px: f64,
    pub line_width_px: f64,
    pub marker_radius_px: f64,
    pub bar_alpha: f64,
    pub value_axis_label: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            margins: Margins::default(),
            background_color: Color::WHITE,
            axis_color: Color::rgb8(38, 38, 38),
            grid_color: Color::rgb8(224, 224, 224),
            text_color: Color::rgb8(26, 26, 26),
            legend_background_color: Color::WHITE.with_alpha(217.0 / 255.0),
            legend_border_color: Color::rgb8(204, 204, 204),
            title_font_size_px: 16.0,
            axis_label_font_size_px: 13.0,
            tick_font_size_px: 10.0,
            legend_font_size_px: 12.0,
            line_width_px: 2.0,
            marker_radius_px: 3.5,
            bar_alpha: 0.6,
            value_axis_label: "Number of People".to_owned(),
        }
    }
}

static DEFAULT_STYLE: LazyLock<ChartStyle> = LazyLock::new(ChartStyle::default);

impl ChartStyle {
    /// Process-wide default style.
    #[must_use]
    pub fn shared_default() -> &'static Self {
        &DEFAULT_STYLE
    }

    /// Parses a JSON style document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let style: Self =
            serde_json::from_str(json).map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    #[must_use]
    pub fn palette(&self) -> &'static CompartmentPalette {
        CompartmentPalette::standard()
    }

    /// Plot rectangle left after margins.
    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::inside(self.viewport, self.margins).ok_or(ChartError::InvalidViewport {
            width: self.viewport.width,
            height: self.viewport.height,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.plot_area()?;

        for (name, value) in [
            ("title_font_size_px", self.title_font_size_px),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("tick_font_size_px", self.tick_font_size_px),
            ("legend_font_size_px", self.legend_font_size_px),
            ("line_width_px", self.line_width_px),
            ("marker_radius_px", self.marker_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        if !self.bar_alpha.is_finite() || !(0.0..=1.0).contains(&self.bar_alpha) {
            return Err(ChartError::InvalidConfig(
                "`bar_alpha` must be in [0, 1]".to_owned(),
            ));
        }

        for color in [
            self.background_color,
            self.axis_color,
            self.grid_color,
            self.text_color,
            self.legend_background_color,
            self.legend_border_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }

        Ok(())
    }
}
