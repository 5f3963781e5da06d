use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// One stacked value: `base` is the running sum of the layers below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedValue {
    pub base: f64,
    pub top: f64,
}

/// Pixel geometry of one bar segment inside a stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedBar {
    pub layer: usize,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl StackedBar {
    #[must_use]
    pub fn width(self) -> f64 {
        self.x_right - self.x_left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_bottom - self.y_top
    }
}

/// Stacks layers in order: each layer starts where the sum of the previous
/// layers ends at the same time index.
///
/// All layers must have the same length.
pub fn stack_layers(layers: &[Vec<f64>]) -> ChartResult<Vec<Vec<StackedValue>>> {
    let Some(len) = layers.first().map(Vec::len) else {
        return Ok(Vec::new());
    };
    if layers.iter().any(|layer| layer.len() != len) {
        return Err(ChartError::InvalidData(
            "stacked layers must have equal length".to_owned(),
        ));
    }

    let mut running = vec![0.0; len];
    let mut stacked = Vec::with_capacity(layers.len());
    for layer in layers {
        let mut values = Vec::with_capacity(len);
        for (sum, value) in running.iter_mut().zip(layer) {
            values.push(StackedValue {
                base: *sum,
                top: *sum + value,
            });
            *sum += value;
        }
        stacked.push(values);
    }
    Ok(stacked)
}

/// Projects stacked layers into bar rectangles centered on each time.
///
/// `bar_width` is in time units, so coarse widths stay proportional to the
/// time axis.
pub fn project_stacked_bars(
    times: &[f64],
    stacked: &[Vec<StackedValue>],
    x_scale: LinearScale,
    y_scale: LinearScale,
    bar_width: f64,
) -> ChartResult<Vec<StackedBar>> {
    if !bar_width.is_finite() || bar_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "stacked bar width must be finite and > 0".to_owned(),
        ));
    }

    let half_width_px = x_scale.span_to_pixels(bar_width)? * 0.5;
    let mut bars = Vec::with_capacity(times.len() * stacked.len());
    for (layer, values) in stacked.iter().enumerate() {
        if values.len() != times.len() {
            return Err(ChartError::InvalidData(
                "stacked layer length must match time points".to_owned(),
            ));
        }
        for (time, value) in times.iter().zip(values) {
            let x_center = x_scale.domain_to_pixel(*time)?;
            let y_base = y_scale.domain_to_pixel(value.base)?;
            let y_value = y_scale.domain_to_pixel(value.top)?;
            bars.push(StackedBar {
                layer,
                x_left: x_center - half_width_px,
                x_right: x_center + half_width_px,
                y_top: y_value.min(y_base),
                y_bottom: y_value.max(y_base),
            });
        }
    }
    Ok(bars)
}
