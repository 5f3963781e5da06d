use crate::core::{DataPoint, LinearScale};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Maps each data point to its pixel position.
pub fn project_points(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<(f64, f64)>> {
    points
        .iter()
        .map(|point| Ok((x_scale.domain_to_pixel(point.x)?, y_scale.domain_to_pixel(point.y)?)))
        .collect()
}

/// Projects line-series points into adjacent line segments.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// same geometry.
pub fn project_line_segments(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<LineSegment>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mapped = project_points(points, x_scale, y_scale)?;
    Ok(mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect())
}
