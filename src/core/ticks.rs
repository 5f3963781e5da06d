/// Spacing the value axis aims for between gridlines.
pub const VALUE_AXIS_TARGET_SPACING_PX: f64 = 56.0;
/// Spacing the time axis aims for between tick labels.
pub const TIME_AXIS_TARGET_SPACING_PX: f64 = 80.0;

/// Number of ticks that fit an axis span at the target spacing.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Rounds a raw step up to 1, 2, 2.5 or 5 times a power of ten.
#[must_use]
pub fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }

    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Evenly stepped tick values inside `[start, end]`.
#[must_use]
pub fn nice_ticks(start: f64, end: f64, target_count: usize) -> Vec<f64> {
    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    if !low.is_finite() || !high.is_finite() || low == high || target_count < 2 {
        return Vec::new();
    }

    let step = nice_step((high - low) / (target_count - 1) as f64);
    let first = (low / step).ceil();
    let last = (high / step).floor();
    if last < first {
        return Vec::new();
    }

    let count = (last - first) as usize + 1;
    (0..count)
        .map(|index| {
            let value = (first + index as f64) * step;
            // Snap floating noise such as 0.30000000000000004.
            (value / step).round() * step
        })
        .collect()
}

/// Integer time ticks: every time point when they fit, otherwise nice steps.
#[must_use]
pub fn time_ticks(time_points: &[f64], axis_span_px: f64) -> Vec<f64> {
    let max_ticks = axis_tick_target_count(axis_span_px, TIME_AXIS_TARGET_SPACING_PX, 2, 16);
    if !time_points.is_empty() && time_points.len() <= max_ticks {
        let mut ticks = time_points.to_vec();
        ticks.dedup();
        return ticks;
    }

    let low = time_points.iter().copied().fold(f64::INFINITY, f64::min);
    let high = time_points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    nice_ticks(low, high, max_ticks)
        .into_iter()
        .filter(|value| value.fract() == 0.0)
        .collect()
}

/// Formats a tick value without trailing zeros.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}
