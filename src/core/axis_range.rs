use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Tuning for fitting an axis domain around data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisFitTuning {
    pub lower_padding_ratio: f64,
    pub upper_padding_ratio: f64,
    pub min_span_absolute: f64,
    /// Forces the domain to contain zero, used for population counts.
    pub include_zero: bool,
}

impl AxisFitTuning {
    /// Time axis: symmetric 5% breathing room.
    #[must_use]
    pub const fn time_axis() -> Self {
        Self {
            lower_padding_ratio: 0.05,
            upper_padding_ratio: 0.05,
            min_span_absolute: 1.0,
            include_zero: false,
        }
    }

    /// Value axis: anchored at zero with headroom above the peak.
    #[must_use]
    pub const fn value_axis() -> Self {
        Self {
            lower_padding_ratio: 0.0,
            upper_padding_ratio: 0.05,
            min_span_absolute: 1.0,
            include_zero: true,
        }
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.lower_padding_ratio.is_finite()
            || !self.upper_padding_ratio.is_finite()
            || self.lower_padding_ratio < 0.0
            || self.upper_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "axis padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Fits a padded `(start, end)` domain around `values`.
pub fn fit_domain<I>(values: I, tuning: AxisFitTuning) -> ChartResult<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let tuning = tuning.validate()?;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "axis values must be finite".to_owned(),
            ));
        }
        min = min.min(value);
        max = max.max(value);
    }

    if min > max {
        return Err(ChartError::InvalidData(
            "axis domain cannot be fitted to empty data".to_owned(),
        ));
    }

    if tuning.include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let (start, end) = normalize_range(min, max, tuning.min_span_absolute)?;
    let span = end - start;
    Ok((
        start - span * tuning.lower_padding_ratio,
        end + span * tuning.upper_padding_ratio,
    ))
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        // A flat zero series still needs a span, and it must not dip below zero.
        if start == 0.0 {
            return Ok((0.0, min_span));
        }
        // Past about 1e16 the absolute pad rounds away, so it grows with magnitude.
        let half = (min_span / 2.0).max(start.abs() * f64::EPSILON * 8.0);
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
