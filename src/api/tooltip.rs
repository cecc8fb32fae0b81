use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const TOOLTIP_PANEL_WIDTH: f64 = 275.0;
/// Horizontal room kept free for the panel at the right edge of the chart.
pub const TOOLTIP_RIGHT_CLEARANCE: f64 = 280.0;
const TOOLTIP_MIN_HEIGHT: f64 = 120.0;
const TOOLTIP_ROW_HEIGHT: f64 = 16.0;
const TOOLTIP_CHROME_HEIGHT: f64 = 40.0;

pub(super) const TOOLTIP_INNER_TOP: f64 = 18.0;
pub(super) const TOOLTIP_INNER_BOTTOM: f64 = 8.0;
pub(super) const TOOLTIP_INNER_SIDE: f64 = 10.0;

/// One category row of the grouped tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub category: String,
    pub value: f64,
    pub color: String,
}

impl TooltipEntry {
    #[must_use]
    pub fn value_label(&self) -> String {
        format_thousands(self.value)
    }
}

/// Grouped tooltip panel for one hovered date.
///
/// Geometry is in chart pixels; the panel hangs from the top of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPanel {
    pub date: NaiveDate,
    pub entries: Vec<TooltipEntry>,
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Pointer x where the vertical rule is drawn.
    pub rule_x: f64,
    pub rule_top: f64,
    pub rule_bottom: f64,
}

impl TooltipPanel {
    /// Lays out a panel for `entries` hovered at `pointer_x`.
    ///
    /// Charts narrower than the panel shrink it to the chart width.
    #[must_use]
    pub fn layout(
        date: NaiveDate,
        entries: Vec<TooltipEntry>,
        pointer_x: f64,
        chart_width: f64,
        margin_right: f64,
        rule_top: f64,
        rule_bottom: f64,
    ) -> Self {
        let width = TOOLTIP_PANEL_WIDTH.min(chart_width.max(0.0));
        let x = pointer_x
            .min(chart_width - margin_right - TOOLTIP_RIGHT_CLEARANCE)
            .min(chart_width - width)
            .max(0.0);
        Self {
            date,
            height: panel_height(entries.len()),
            entries,
            x,
            width,
            rule_x: pointer_x,
            rule_top,
            rule_bottom,
        }
    }

    #[must_use]
    pub fn header(&self) -> String {
        format_tooltip_date(self.date)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Single-point tip: the layer under the pointer at the nearest date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointTip {
    pub category: String,
    pub date: NaiveDate,
    pub value: f64,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

impl PointTip {
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.category,
            format_tooltip_date(self.date),
            format_thousands(self.value)
        )
    }
}

#[must_use]
pub fn panel_height(entries: usize) -> f64 {
    (entries as f64 * TOOLTIP_ROW_HEIGHT + TOOLTIP_CHROME_HEIGHT).max(TOOLTIP_MIN_HEIGHT)
}

/// `M/D/YYYY`, without zero padding.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Number with comma thousands separators and at most three decimals.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_owned()
        } else if value > 0.0 {
            "∞".to_owned()
        } else {
            "-∞".to_owned()
        };
    }

    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (integer != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.891), "1,234,567.891");
        assert_eq!(format_thousands(-98765.4321), "-98,765.432");
        assert_eq!(format_thousands(-0.0001), "0");
    }

    #[test]
    fn date_header_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2001, 3, 7).expect("valid date");
        assert_eq!(format_tooltip_date(date), "3/7/2001");
    }

    #[test]
    fn panel_height_has_floor() {
        assert_eq!(panel_height(0), 120.0);
        assert_eq!(panel_height(5), 120.0);
        assert_eq!(panel_height(10), 200.0);
    }
}
