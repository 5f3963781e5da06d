pub mod axis_range;
pub mod line_series;
pub mod scale;
pub mod stacked_bar_series;
pub mod ticks;
pub mod types;

pub use axis_range::{AxisFitTuning, fit_domain};
pub use line_series::{LineSegment, project_line_segments, project_points};
pub use scale::LinearScale;
pub use stacked_bar_series::{StackedBar, StackedValue, project_stacked_bars, stack_layers};
pub use types::{DataPoint, Margins, PlotArea, Viewport};
