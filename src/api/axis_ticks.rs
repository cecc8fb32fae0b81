use chrono::{Datelike, Days, Months, NaiveDate};

pub(super) const AXIS_TIME_TARGET_SPACING_PX: f64 = 80.0;
pub(super) const AXIS_VALUE_TARGET_SPACING_PX: f64 = 40.0;

pub(super) fn axis_tick_target_count(
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

/// Step of roughly `count` ticks over `[start, stop]`, snapped to 1, 2 or 5 times a power of ten.
pub(super) fn nice_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let span = (stop - start).abs();
    if !span.is_finite() || span == 0.0 || count == 0 {
        return None;
    }

    let raw_step = span / count as f64;
    let power = raw_step.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw_step / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * magnitude)
}

/// Nice tick values inside `[start, stop]`.
pub(super) fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let Some(step) = nice_step(start, stop, count) else {
        return if start.is_finite() { vec![start] } else { Vec::new() };
    };
    let (low, high) = if start <= stop { (start, stop) } else { (stop, start) };
    let first = (low / step).ceil() as i64;
    let last = (high / step).floor() as i64;
    (first..=last)
        .map(|index| {
            let value = index as f64 * step;
            // Snap float noise such as 0.30000000000000004.
            (value / step).round() * step
        })
        .collect()
}

/// Label for a value tick; integers without decimals, otherwise trimmed to the step precision.
pub(super) fn format_value_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 || !step.is_finite() {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    let text = format!("{value:.decimals$}");
    if text.starts_with('-') && text.trim_start_matches(['-', '0', '.']).is_empty() {
        text.trim_start_matches('-').to_owned()
    } else {
        text
    }
}

/// Calendar interval between two time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TimeInterval {
    Days(u64),
    Months(u32),
    Years(i32),
}

const TIME_INTERVALS: &[TimeInterval] = &[
    TimeInterval::Days(1),
    TimeInterval::Days(2),
    TimeInterval::Days(7),
    TimeInterval::Days(14),
    TimeInterval::Months(1),
    TimeInterval::Months(3),
    TimeInterval::Months(6),
    TimeInterval::Years(1),
    TimeInterval::Years(2),
    TimeInterval::Years(5),
    TimeInterval::Years(10),
    TimeInterval::Years(20),
    TimeInterval::Years(25),
    TimeInterval::Years(50),
    TimeInterval::Years(100),
    TimeInterval::Years(200),
    TimeInterval::Years(500),
    TimeInterval::Years(1000),
];

impl TimeInterval {
    fn first_on_or_after(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(_) => Some(date),
            Self::Months(step) => {
                let mut candidate = date.with_day(1)?;
                if candidate < date {
                    candidate = candidate.checked_add_months(Months::new(1))?;
                }
                while candidate.month0() % step != 0 {
                    candidate = candidate.checked_add_months(Months::new(1))?;
                }
                Some(candidate)
            }
            Self::Years(step) => {
                let mut year = date.year();
                if NaiveDate::from_ymd_opt(year, 1, 1)? < date {
                    year += 1;
                }
                let year = year + (step - year.rem_euclid(step)) % step;
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        }
    }

    fn next(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(step) => date.checked_add_days(Days::new(step)),
            Self::Months(step) => date.checked_add_months(Months::new(step)),
            Self::Years(step) => NaiveDate::from_ymd_opt(date.year() + step, 1, 1),
        }
    }

    pub(super) fn format(self, date: NaiveDate) -> String {
        match self {
            Self::Days(_) => date.format("%b %-d").to_string(),
            Self::Months(_) => date.format("%b %Y").to_string(),
            Self::Years(_) => date.format("%Y").to_string(),
        }
    }

    fn ticks(self, start: NaiveDate, end: NaiveDate, limit: usize) -> Option<Vec<NaiveDate>> {
        let mut ticks = Vec::new();
        let mut current = self.first_on_or_after(start)?;
        while current <= end {
            if ticks.len() == limit {
                return None;
            }
            ticks.push(current);
            current = match self.next(current) {
                Some(next) => next,
                None => break,
            };
        }
        Some(ticks)
    }
}

/// Calendar-aligned ticks over `[start, end]`, at most `max_ticks` of them.
///
/// Picks the finest interval that fits the budget.
pub(super) fn time_ticks(
    start: NaiveDate,
    end: NaiveDate,
    max_ticks: usize,
) -> (TimeInterval, Vec<NaiveDate>) {
    let limit = max_ticks.max(1);
    for &interval in TIME_INTERVALS {
        if let Some(ticks) = interval.ticks(start, end, limit) {
            return (interval, ticks);
        }
    }
    (TimeInterval::Years(1000), vec![start])
}
