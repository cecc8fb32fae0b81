use chrono::NaiveDate;
use streamgraph::api::{PartialRecord, validate_records};
use streamgraph::core::DateCell;
use streamgraph::error::StreamGraphError;

fn record(date: DateCell, category: Option<&str>, value: Option<f64>) -> PartialRecord {
    PartialRecord {
        date: Some(date),
        category: category.map(str::to_owned),
        value,
        other: None,
    }
}

fn valid(year: i32) -> DateCell {
    DateCell::Valid(NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date"))
}

#[test]
fn empty_input_is_empty_data() {
    let err = validate_records(Vec::new()).expect_err("empty");
    assert!(matches!(err, StreamGraphError::EmptyData));
    assert_eq!(err.to_string(), "No data provided");
}

#[test]
fn missing_category_names_the_field() {
    let err = validate_records(vec![record(valid(1999), None, Some(1.0))]).expect_err("missing");
    match &err {
        StreamGraphError::MissingFields {
            missing,
            available,
            row,
        } => {
            assert_eq!(missing, &vec!["category".to_owned()]);
            assert_eq!(available, &vec!["date".to_owned(), "value".to_owned()]);
            assert_eq!(*row, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "Missing required fields: category. Available: date, value"
    );
}

#[test]
fn later_rows_missing_fields_report_their_index() {
    let records = vec![
        record(valid(1999), Some("A"), Some(1.0)),
        record(valid(2000), Some("A"), Some(2.0)),
        record(valid(2001), Some("B"), None),
    ];
    let err = validate_records(records).expect_err("missing");
    assert!(matches!(err, StreamGraphError::MissingFields { row: 2, .. }));
}

#[test]
fn invalid_dates_are_counted() {
    let records = vec![
        record(DateCell::Invalid("someday".to_owned()), Some("A"), Some(1.0)),
        record(valid(2000), Some("A"), Some(2.0)),
        record(DateCell::Invalid("never".to_owned()), Some("B"), Some(3.0)),
    ];
    let err = validate_records(records).expect_err("invalid dates");
    match err {
        StreamGraphError::InvalidDate { count, first } => {
            assert_eq!(count, 2);
            assert_eq!(first, "someday");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn complete_records_become_canonical() {
    let mut partial = record(valid(1999), Some("A"), Some(4.0));
    partial.other = Some("F".to_owned());
    let canonical = validate_records(vec![partial]).expect("valid");
    assert_eq!(canonical.len(), 1);
    assert_eq!(canonical[0].category, "A");
    assert_eq!(canonical[0].value, 4.0);
    assert_eq!(canonical[0].other.as_deref(), Some("F"));
}
