//! Keyword policy the chat layer uses to decide whether and how to chart.

use crate::chart::ChartKind;

/// Words in a user message that ask for a chart.
pub const VISUALIZATION_KEYWORDS: [&str; 6] = ["show", "plot", "graph", "chart", "visualize", "draw"];

/// Phrases that ask for bars instead of lines.
pub const BAR_CHART_PHRASES: [&str; 2] = ["bar chart", "bar graph"];

/// True when the message asks for a visualization.
///
/// Matching is a case-insensitive substring search, so "showing" or
/// "charts" also count.
#[must_use]
pub fn wants_visualization(message: &str) -> bool {
    let lowered = message.to_lowercase();
    VISUALIZATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

impl ChartKind {
    /// Bars only when the message names a bar chart or bar graph.
    #[must_use]
    pub fn from_user_message(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if BAR_CHART_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
            Self::Bar
        } else {
            Self::Line
        }
    }
}
