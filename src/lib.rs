//! epi-chart: turns free-text epidemic simulation replies into PNG charts.
//!
//! The pipeline detects the compartmental model a reply describes, extracts
//! its whitespace-delimited table, lays the series out as a backend-agnostic
//! render frame and rasterizes it to PNG. Replies without a usable table get
//! an illustrative SIR chart instead.

pub mod chart;
pub mod core;
pub mod error;
pub mod intent;
pub mod render;
pub mod simulation;
pub mod telemetry;

pub use chart::{
    ChartImage, ChartKind, ChartPayload, ChartRenderer, ChartSpec, ChartStyle, render_chart,
    render_chart_with_style,
};
pub use error::{ChartError, ChartResult};
pub use intent::wants_visualization;
pub use simulation::{ModelType, SimulationTable, detect_model_type, extract_table};
