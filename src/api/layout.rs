use serde::{Deserialize, Serialize};

use crate::api::Margins;

/// Floor and dimension fraction of one responsive margin.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MarginRule {
    floor: f64,
    fraction: f64,
}

const TOP_RULE: MarginRule = MarginRule {
    floor: 10.0,
    fraction: 0.10,
};
const RIGHT_RULE: MarginRule = MarginRule {
    floor: 10.0,
    fraction: 0.05,
};
const BOTTOM_RULE: MarginRule = MarginRule {
    floor: 30.0,
    fraction: 0.15,
};
const LEFT_RULE: MarginRule = MarginRule {
    floor: 40.0,
    fraction: 0.10,
};

impl MarginRule {
    fn apply(self, requested: f64, dimension: f64) -> f64 {
        let requested = if requested.is_finite() { requested } else { self.floor };
        requested.min(dimension * self.fraction).max(self.floor)
    }
}

/// Clamps requested margins between a pixel floor and a fraction of the chart size.
///
/// Vertical margins scale with `height`, horizontal ones with `width`. The
/// floor wins when the fraction is smaller than it.
#[must_use]
pub fn resolve_responsive_margins(requested: Margins, width: f64, height: f64) -> Margins {
    Margins {
        top: TOP_RULE.apply(requested.top, height),
        right: RIGHT_RULE.apply(requested.right, width),
        bottom: BOTTOM_RULE.apply(requested.bottom, height),
        left: LEFT_RULE.apply(requested.left, width),
    }
}

const WIDE_LEGEND_THRESHOLD: f64 = 600.0;
const WIDE_LEGEND_COLUMNS: usize = 6;
const NARROW_LEGEND_COLUMNS: usize = 3;
const NARROW_LEGEND_MAX_WIDTH: f64 = 200.0;
const NARROW_LEGEND_WIDTH_FRACTION: f64 = 0.8;

pub const LEGEND_ROW_HEIGHT: f64 = 20.0;
pub const LEGEND_SWATCH_SIZE: f64 = 12.0;
const LEGEND_PADDING: f64 = 6.0;

/// Legend geometry: a two-bucket rule on chart width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub columns: usize,
    /// Constrained legend width; `None` means the legend may span the chart.
    pub max_width: Option<f64>,
}

/// One legend entry's swatch origin, relative to the legend band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendSlot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl LegendLayout {
    #[must_use]
    pub fn for_width(width: f64) -> Self {
        if width > WIDE_LEGEND_THRESHOLD {
            Self {
                columns: WIDE_LEGEND_COLUMNS,
                max_width: None,
            }
        } else {
            Self {
                columns: NARROW_LEGEND_COLUMNS,
                max_width: Some(NARROW_LEGEND_MAX_WIDTH.min(width * NARROW_LEGEND_WIDTH_FRACTION)),
            }
        }
    }

    #[must_use]
    pub fn rows(self, entries: usize) -> usize {
        entries.div_ceil(self.columns.max(1))
    }

    /// Height of the band reserved above the plot for `entries` swatches.
    #[must_use]
    pub fn band_height(self, entries: usize) -> f64 {
        match self.rows(entries) {
            0 => 0.0,
            rows => rows as f64 * LEGEND_ROW_HEIGHT + LEGEND_PADDING,
        }
    }

    /// Row-major slots for `entries` swatches inside a chart of `chart_width`.
    #[must_use]
    pub fn slots(self, entries: usize, chart_width: f64, left: f64) -> Vec<LegendSlot> {
        let columns = self.columns.max(1);
        let available = (chart_width - left).max(0.0);
        let legend_width = self.max_width.map_or(available, |max| max.min(available));
        let column_width = legend_width / columns as f64;
        (0..entries)
            .map(|index| LegendSlot {
                x: left + (index % columns) as f64 * column_width,
                y: LEGEND_PADDING + (index / columns) as f64 * LEGEND_ROW_HEIGHT,
                width: column_width,
            })
            .collect()
    }
}
