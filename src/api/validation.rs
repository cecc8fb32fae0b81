use tracing::debug;

use crate::api::PartialRecord;
use crate::core::{CanonicalRecord, DateCell};
use crate::error::{StreamGraphError, StreamGraphResult};

const REQUIRED_FIELDS: [&str; 3] = ["date", "category", "value"];

/// Turns partial records into canonical records or fails the render pass.
///
/// Missing required fields are reported against the first record lacking
/// them; invalid dates are counted over the whole set.
pub fn validate_records(records: Vec<PartialRecord>) -> StreamGraphResult<Vec<CanonicalRecord>> {
    if records.is_empty() {
        return Err(StreamGraphError::EmptyData);
    }

    for (row, record) in records.iter().enumerate() {
        let present = record.present_fields();
        let missing: Vec<String> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| !present.contains(field))
            .map(str::to_owned)
            .collect();
        if !missing.is_empty() {
            return Err(StreamGraphError::MissingFields {
                missing,
                available: present.iter().map(|field| (*field).to_owned()).collect(),
                row,
            });
        }
    }

    let invalid: Vec<&str> = records
        .iter()
        .filter_map(|record| match &record.date {
            Some(DateCell::Invalid(raw)) => Some(raw.as_str()),
            _ => None,
        })
        .collect();
    if let Some(first) = invalid.first() {
        return Err(StreamGraphError::InvalidDate {
            count: invalid.len(),
            first: (*first).to_owned(),
        });
    }

    let canonical: Vec<CanonicalRecord> = records
        .into_iter()
        .filter_map(|record| {
            Some(CanonicalRecord {
                date: record.date?.date()?,
                category: record.category?,
                value: record.value?,
                other: record.other,
            })
        })
        .collect();
    debug!(records = canonical.len(), "validated records");
    Ok(canonical)
}
