use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Compartmental model variant a reply describes.
///
/// Only used to title the chart; the plotted series always follow the
/// extracted column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelType {
    #[default]
    #[serde(rename = "SIR")]
    Sir,
    #[serde(rename = "SIRV")]
    Sirv,
    #[serde(rename = "SEIR")]
    Seir,
    #[serde(rename = "SEIRV")]
    Seirv,
}

impl ModelType {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sir => "SIR",
            Self::Sirv => "SIRV",
            Self::Seir => "SEIR",
            Self::Seirv => "SEIRV",
        }
    }

    /// Chart title for this model, e.g. `"SEIR Simulation"`.
    #[must_use]
    pub fn chart_title(self) -> String {
        format!("{} Simulation", self.code())
    }

    fn from_keywords(has_exposed: bool, has_vaccinated: bool) -> Self {
        match (has_exposed, has_vaccinated) {
            (true, true) => Self::Seirv,
            (true, false) => Self::Seir,
            (false, true) => Self::Sirv,
            (false, false) => Self::Sir,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Header patterns in priority order. Longer column sets come first so a
/// `Month S E I R V` line never resolves to one of its prefixes.
static HEADER_PATTERNS: LazyLock<Vec<(Regex, ModelType)>> = LazyLock::new(|| {
    [
        (r"^Month\s+S\s+E\s+I\s+R\s+V", ModelType::Seirv),
        (r"^Month\s+S\s+E\s+I\s+R", ModelType::Seir),
        (r"^Month\s+S\s+I\s+R\s+V", ModelType::Sirv),
        (r"^Month\s+S\s+I\s+R", ModelType::Sir),
    ]
    .into_iter()
    .filter_map(|(pattern, model)| Regex::new(pattern).ok().map(|re| (re, model)))
    .collect()
});

fn match_header_line(line: &str) -> Option<ModelType> {
    HEADER_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(line))
        .map(|(_, model)| *model)
}

/// Detects which compartmental model a reply describes.
///
/// The first line matching a known column header decides. Without one, the
/// words "exposed" and "vaccinated" anywhere in the text select the variant,
/// and plain SIR is the default. This never fails.
#[must_use]
pub fn detect_model_type(text: &str) -> ModelType {
    if let Some(model) = text.lines().find_map(|line| match_header_line(line.trim())) {
        debug!(model = %model, source = "header", "detected model type");
        return model;
    }

    let lowered = text.to_lowercase();
    let model = ModelType::from_keywords(lowered.contains("exposed"), lowered.contains("vaccinated"));
    debug!(model = %model, source = "keywords", "detected model type");
    model
}
