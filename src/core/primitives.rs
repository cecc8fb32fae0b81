use chrono::{DateTime, NaiveDate};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0.0, |midnight| midnight.and_utc().timestamp() as f64)
}

#[must_use]
pub fn unix_seconds_to_date(seconds: f64) -> Option<NaiveDate> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp(seconds.floor() as i64, 0).map(|time| time.date_naive())
}
