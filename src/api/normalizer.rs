//! Input normalization: host payloads and tabular rows into partial records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::column_roles::{ColumnRole, resolve_column_mapping, role_for_name};
use crate::api::{HostPayload, TabularRow};
use crate::core::{DateCell, RawValue, parse_date_cell};
use crate::error::{StreamGraphError, StreamGraphResult};

/// What to do with value cells that do not parse as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Replace the value with `0` and keep rendering.
    #[default]
    CoerceToZero,
    /// Fail the render pass with [`StreamGraphError::InvalidValue`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizeOptions {
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
}

impl NormalizeOptions {
    #[must_use]
    pub fn with_numeric_policy(mut self, numeric_policy: NumericPolicy) -> Self {
        self.numeric_policy = numeric_policy;
        self
    }
}

/// Normalized row before validation; any field may still be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialRecord {
    pub date: Option<DateCell>,
    pub category: Option<String>,
    pub value: Option<f64>,
    pub other: Option<String>,
}

impl PartialRecord {
    /// Canonical field names present on this record, in schema order.
    #[must_use]
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(4);
        if self.date.is_some() {
            fields.push("date");
        }
        if self.category.is_some() {
            fields.push("category");
        }
        if self.value.is_some() {
            fields.push("value");
        }
        if self.other.is_some() {
            fields.push("other");
        }
        fields
    }

    fn assign(
        &mut self,
        role: ColumnRole,
        raw: &RawValue,
        options: NormalizeOptions,
        row: usize,
    ) -> StreamGraphResult<()> {
        match role {
            ColumnRole::Date => self.date = Some(parse_date_cell(raw)),
            ColumnRole::Category => self.category = raw.to_label(),
            ColumnRole::Secondary => self.other = raw.to_label(),
            ColumnRole::Value => self.value = Some(coerce_value(raw, options.numeric_policy, row)?),
        }
        Ok(())
    }
}

/// Normalizes array-valued host rows, one partial record per row in order.
///
/// Shorthand keys (`date`, `category`, `other`, `value`) are taken as is.
/// Any other key is interpreted through its declared field metadata: the
/// value at index `i` gets the role inferred from the `i`-th field name,
/// unless a shorthand key already filled that role.
pub fn normalize_host_payload(
    payload: &HostPayload,
    options: NormalizeOptions,
) -> StreamGraphResult<Vec<PartialRecord>> {
    debug!(
        rows = payload.rows().len(),
        fields = payload.fields.len(),
        "normalizing host payload"
    );

    let mut records = Vec::with_capacity(payload.rows().len());
    for (row_index, row) in payload.rows().iter().enumerate() {
        let mut record = PartialRecord::default();
        let mut filled: Vec<ColumnRole> = Vec::with_capacity(4);

        for (key, values) in row {
            let Some(role) = ColumnRole::from_shorthand(key) else {
                continue;
            };
            if let Some(first) = values.first() {
                record.assign(role, first, options, row_index)?;
                filled.push(role);
            }
        }

        for (key, values) in row {
            if ColumnRole::from_shorthand(key).is_some() {
                continue;
            }
            for (index, value) in values.iter().enumerate() {
                let Some(role) = payload.field_name(key, index).and_then(role_for_name) else {
                    continue;
                };
                if filled.contains(&role) {
                    continue;
                }
                record.assign(role, value, options, row_index)?;
            }
        }

        records.push(record);
    }
    Ok(records)
}

/// Normalizes free-form tabular rows.
///
/// The column mapping is resolved once, from the first row's columns.
pub fn normalize_tabular_rows(
    rows: &[TabularRow],
    options: NormalizeOptions,
) -> StreamGraphResult<Vec<PartialRecord>> {
    let first = rows.first().ok_or(StreamGraphError::EmptyData)?;
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let mapping = resolve_column_mapping(&columns).into_result()?;
    debug!(?mapping, "resolved tabular column mapping");

    let mut records = Vec::with_capacity(rows.len());
    for (row_index, row) in rows.iter().enumerate() {
        let mut record = PartialRecord::default();
        for role in ColumnRole::PRIORITY {
            let Some(column) = mapping.column(role) else {
                continue;
            };
            let raw = row.get(column).unwrap_or(&RawValue::Null);
            record.assign(role, raw, options, row_index)?;
        }
        records.push(record);
    }
    Ok(records)
}

/// Converts a value cell into a number according to `policy`.
pub fn coerce_value(raw: &RawValue, policy: NumericPolicy, row: usize) -> StreamGraphResult<f64> {
    let parsed = match raw {
        RawValue::Number(number) => Some(*number).filter(|number| number.is_finite()),
        RawValue::Text(text) => parse_float_prefix(text),
        RawValue::Bool(_) | RawValue::Null => None,
    };

    match (parsed, policy) {
        (Some(number), _) => Ok(number),
        (None, NumericPolicy::CoerceToZero) => {
            debug!(row, raw = %raw, "coercing unparseable value to zero");
            Ok(0.0)
        }
        (None, NumericPolicy::Reject) => Err(StreamGraphError::InvalidValue {
            row,
            raw: raw.to_string(),
        }),
    }
}

/// Parses the longest leading decimal number of `text`, ignoring leading whitespace.
fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digits_from(end);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    trimmed[..end].parse::<f64>().ok().filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_prefix_mirrors_lenient_parsing() {
        assert_eq!(parse_float_prefix("12.5"), Some(12.5));
        assert_eq!(parse_float_prefix("  -3e2kg"), Some(-300.0));
        assert_eq!(parse_float_prefix("1,234"), Some(1.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn reject_policy_names_the_row() {
        let err = coerce_value(&RawValue::text("n/a"), NumericPolicy::Reject, 4)
            .expect_err("must reject");
        assert!(matches!(err, StreamGraphError::InvalidValue { row: 4, .. }));
    }
}
