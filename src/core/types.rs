use serde::{Deserialize, Serialize};

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 500)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel margins reserved around the plot area for title and axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 80.0,
            right: 24.0,
            top: 44.0,
            bottom: 56.0,
        }
    }
}

/// Pixel rectangle the data is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Returns `None` when the margins leave no room for data.
    #[must_use]
    pub fn inside(viewport: Viewport, margins: Margins) -> Option<Self> {
        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height = f64::from(viewport.height) - margins.top - margins.bottom;
        if !viewport.is_valid() || !width.is_finite() || !height.is_finite() {
            return None;
        }
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Horizontal pixel span, left to right.
    #[must_use]
    pub fn x_span(self) -> (f64, f64) {
        (self.left, self.right())
    }

    /// Vertical pixel span, bottom to top so larger values sit higher.
    #[must_use]
    pub fn y_span(self) -> (f64, f64) {
        (self.bottom(), self.top)
    }
}
