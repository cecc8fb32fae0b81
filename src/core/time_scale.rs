use chrono::NaiveDate;

use crate::core::LinearScale;
use crate::core::primitives::{SECONDS_PER_DAY, date_to_unix_seconds};
use crate::error::{StreamGraphError, StreamGraphResult};

/// Horizontal time axis over calendar dates.
///
/// A single-date extent is widened to one day so that the scale stays
/// invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, range_start: f64, range_end: f64) -> StreamGraphResult<Self> {
        let inner = LinearScale::from_extent(
            date_to_unix_seconds(start),
            date_to_unix_seconds(end),
            SECONDS_PER_DAY,
            range_start,
            range_end,
        )?;
        Ok(Self { inner })
    }

    /// Fits the scale to the extent of `dates`.
    pub fn from_dates<I>(dates: I, range_start: f64, range_end: f64) -> StreamGraphResult<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut extent: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            extent = Some(match extent {
                None => (date, date),
                Some((low, high)) => (low.min(date), high.max(date)),
            });
        }
        let (start, end) = extent.ok_or_else(|| {
            StreamGraphError::InvalidData("time scale requires at least one date".to_owned())
        })?;
        Self::new(start, end, range_start, range_end)
    }

    /// Domain in unix seconds.
    #[must_use]
    pub fn domain_seconds(self) -> (f64, f64) {
        self.inner.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn date_to_pixel(self, date: NaiveDate) -> StreamGraphResult<f64> {
        self.inner.to_pixel(date_to_unix_seconds(date))
    }
}
