use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::CanonicalRecord;

/// Baseline algorithm applied to stacked layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamOffset {
    /// Minimizes weighted slope changes of the layers.
    Wiggle,
    /// Centers each column around zero.
    Silhouette,
    /// Normalizes each column to `[0, 1]`.
    Expand,
    /// Zero baseline.
    None,
}

impl StreamOffset {
    pub const ALL: [Self; 4] = [Self::Wiggle, Self::Silhouette, Self::Expand, Self::None];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wiggle => "wiggle",
            Self::Silhouette => "silhouette",
            Self::Expand => "expand",
            Self::None => "none",
        }
    }
}

impl fmt::Display for StreamOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamOffset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|offset| offset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown stream offset `{s}`"))
    }
}

/// One column of one layer after stacking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackPoint {
    pub date: NaiveDate,
    /// Aggregated (un-normalized) value of the layer at this date.
    pub value: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayer {
    pub category: String,
    pub points: Vec<StackPoint>,
}

/// Stacked layers over the union of dates, in category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayout {
    pub offset: StreamOffset,
    pub dates: Vec<NaiveDate>,
    pub layers: Vec<StackLayer>,
}

impl StackLayout {
    /// Aggregates records by `(date, category)` and stacks them.
    ///
    /// Dates are sorted ascending and categories lexicographically; a
    /// category absent at some date contributes zero there.
    #[must_use]
    pub fn from_records(records: &[CanonicalRecord], offset: StreamOffset) -> Self {
        let dates: Vec<NaiveDate> = records
            .iter()
            .map(|record| record.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let categories: Vec<String> = records
            .iter()
            .map(|record| record.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let date_index: BTreeMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(j, &date)| (date, j)).collect();
        let category_index: BTreeMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| (category.as_str(), i))
            .collect();

        let mut values = vec![vec![0.0; dates.len()]; categories.len()];
        for record in records {
            let i = category_index[record.category.as_str()];
            let j = date_index[&record.date];
            values[i][j] += record.value;
        }

        let bounds = stack_columns(&values, offset);
        let layers = categories
            .into_iter()
            .zip(values.iter().zip(bounds))
            .map(|(category, (row, row_bounds))| StackLayer {
                category,
                points: dates
                    .iter()
                    .zip(row.iter().zip(row_bounds))
                    .map(|(&date, (&value, (y0, y1)))| StackPoint {
                        date,
                        value,
                        y0,
                        y1,
                    })
                    .collect(),
            })
            .collect();

        Self {
            offset,
            dates,
            layers,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() || self.dates.is_empty()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.layers
            .iter()
            .map(|layer| layer.category.as_str())
            .collect()
    }

    /// Vertical extent over every `y0`/`y1`.
    #[must_use]
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for point in self.layers.iter().flat_map(|layer| &layer.points) {
            let (low, high) = (point.y0.min(point.y1), point.y0.max(point.y1));
            extent = Some(match extent {
                None => (low, high),
                Some((min, max)) => (min.min(low), max.max(high)),
            });
        }
        extent
    }
}

/// Stacks `values[layer][column]` and returns `(y0, y1)` per cell.
#[must_use]
pub fn stack_columns(values: &[Vec<f64>], offset: StreamOffset) -> Vec<Vec<(f64, f64)>> {
    let columns = values.first().map_or(0, Vec::len);
    let cell = |i: usize, j: usize| -> f64 {
        let value = values[i].get(j).copied().unwrap_or(0.0);
        if value.is_finite() { value } else { 0.0 }
    };

    let mut heights: Vec<Vec<f64>> = (0..values.len())
        .map(|i| (0..columns).map(|j| cell(i, j)).collect())
        .collect();
    let totals: Vec<f64> = (0..columns)
        .map(|j| heights.iter().map(|row| row[j]).sum())
        .collect();

    let baseline = match offset {
        StreamOffset::None => vec![0.0; columns],
        StreamOffset::Expand => {
            for row in &mut heights {
                for (height, &total) in row.iter_mut().zip(&totals) {
                    if total != 0.0 {
                        *height /= total;
                    }
                }
            }
            vec![0.0; columns]
        }
        StreamOffset::Silhouette => totals.iter().map(|total| -total / 2.0).collect(),
        StreamOffset::Wiggle => wiggle_baseline(&heights, columns),
    };

    let mut bounds = vec![Vec::with_capacity(columns); heights.len()];
    for j in 0..columns {
        let mut y = baseline[j];
        for (i, row) in heights.iter().enumerate() {
            let y1 = y + row[j];
            bounds[i].push((y, y1));
            y = y1;
        }
    }
    bounds
}

fn wiggle_baseline(heights: &[Vec<f64>], columns: usize) -> Vec<f64> {
    let mut baseline = vec![0.0; columns];
    if columns == 0 || heights.is_empty() {
        return baseline;
    }

    let mut y = 0.0;
    for j in 1..columns {
        let mut total = 0.0;
        let mut weighted_slope = 0.0;
        let mut below_delta = 0.0;
        for row in heights {
            let delta = row[j] - row[j - 1];
            let slope = below_delta + delta / 2.0;
            total += row[j];
            weighted_slope += slope * row[j];
            below_delta += delta;
        }
        baseline[j - 1] = y;
        if total != 0.0 {
            y -= weighted_slope / total;
        }
    }
    baseline[columns - 1] = y;
    baseline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiggle_keeps_flat_streams_flat() {
        let values = vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]];
        let bounds = stack_columns(&values, StreamOffset::Wiggle);
        for column in 0..3 {
            assert_eq!(bounds[0][column], (0.0, 1.0));
            assert_eq!(bounds[1][column], (1.0, 3.0));
        }
    }

    #[test]
    fn wiggle_shifts_baseline_against_growth() {
        let values = vec![vec![1.0, 3.0]];
        let bounds = stack_columns(&values, StreamOffset::Wiggle);
        // slope = 1, weighted by 3 over a total of 3.
        assert_eq!(bounds[0][0], (0.0, 1.0));
        assert_eq!(bounds[0][1], (-1.0, 2.0));
    }
}
