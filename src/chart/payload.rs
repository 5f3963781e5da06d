use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::chart::{ChartKind, ChartSpec};
use crate::simulation::ModelType;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encoded chart plus the facts a caller may want to log or display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub png: Vec<u8>,
    /// Kind the caller asked for, before the stacking policy applied.
    pub kind: ChartKind,
    pub model_type: ModelType,
    pub title: String,
    pub series_labels: Vec<String>,
}

impl ChartImage {
    pub(crate) fn from_spec(spec: ChartSpec, png: Vec<u8>) -> Self {
        Self {
            png,
            kind: spec.requested_kind,
            model_type: spec.model_type,
            series_labels: spec.series.into_iter().map(|series| series.label).collect(),
            title: spec.title,
        }
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.png)
    }

    /// `data:image/png;base64,...` form for direct embedding in markup.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("{PNG_DATA_URI_PREFIX}{}", self.to_base64())
    }

    #[must_use]
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }
}

/// JSON body returned to chat clients: `{"reply": ..., "image": base64|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub reply: String,
    pub image: Option<String>,
}

impl ChartPayload {
    #[must_use]
    pub fn text_only(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_chart(reply: impl Into<String>, chart: &ChartImage) -> Self {
        Self {
            reply: reply.into(),
            image: Some(chart.to_base64()),
        }
    }

    /// Decodes the attached image, if any.
    ///
    /// Returns `None` when there is no image or it is not valid base64.
    #[must_use]
    pub fn decode_image(&self) -> Option<Vec<u8>> {
        self.image
            .as_deref()
            .and_then(|encoded| BASE64.decode(encoded).ok())
    }
}
