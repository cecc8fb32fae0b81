use crate::error::{StreamGraphError, StreamGraphResult};

/// Affine mapping from a data domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// vertical axis maps larger values upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> StreamGraphResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(StreamGraphError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(StreamGraphError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Builds a scale over `[min, max]`, widening a degenerate extent by `min_span`.
    pub fn from_extent(
        min: f64,
        max: f64,
        min_span: f64,
        range_start: f64,
        range_end: f64,
    ) -> StreamGraphResult<Self> {
        let (start, end) = normalize_extent(min, max, min_span)?;
        Self::new(start, end, range_start, range_end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn to_pixel(self, value: f64) -> StreamGraphResult<f64> {
        if !value.is_finite() {
            return Err(StreamGraphError::InvalidData(
                "value must be finite".to_owned(),
            ));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }
}

pub(crate) fn normalize_extent(min: f64, max: f64, min_span: f64) -> StreamGraphResult<(f64, f64)> {
    if !min.is_finite() || !max.is_finite() {
        return Err(StreamGraphError::InvalidData(
            "scale extent must be finite".to_owned(),
        ));
    }
    if !min_span.is_finite() || min_span <= 0.0 {
        return Err(StreamGraphError::InvalidData(
            "scale min span must be finite and > 0".to_owned(),
        ));
    }

    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if high - low >= min_span {
        return Ok((low, high));
    }
    let center = (low + high) / 2.0;
    Ok((center - min_span / 2.0, center + min_span / 2.0))
}
