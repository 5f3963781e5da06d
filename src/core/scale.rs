use crate::error::{ChartError, ChartResult};

/// Affine map from a data domain onto a pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), pixels: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        let (pixel_start, pixel_end) = pixels;
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Pixel length of a domain-unit distance, always non-negative.
    pub fn span_to_pixels(self, span: f64) -> ChartResult<f64> {
        if !span.is_finite() {
            return Err(ChartError::InvalidData("span must be finite".to_owned()));
        }
        let ratio = (self.pixel_end - self.pixel_start) / (self.domain_end - self.domain_start);
        Ok((span * ratio).abs())
    }
}
