use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::json;
use streamgraph::api::{
    FieldMeta, HostPayload, NormalizeOptions, NumericPolicy, TabularRow, normalize_host_payload,
    normalize_tabular_rows,
};
use streamgraph::core::{DateCell, RawValue};
use streamgraph::error::StreamGraphError;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn payload(value: serde_json::Value) -> HostPayload {
    serde_json::from_value(value).expect("valid host payload")
}

fn tabular(rows: &[&[(&str, RawValue)]]) -> Vec<TabularRow> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(key, value)| ((*key).to_owned(), value.clone()))
                .collect::<IndexMap<_, _>>()
        })
        .collect()
}

#[test]
fn host_shorthand_rows_normalize_in_order() {
    let payload = payload(json!({
        "tables": { "DEFAULT": [
            { "date": ["1999"], "category": ["Alice"], "value": [10] },
            { "date": [2000], "category": ["Bob"], "value": ["12.5"], "other": ["F"] }
        ]}
    }));

    let records = normalize_host_payload(&payload, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, Some(DateCell::Valid(ymd(1999, 1, 1))));
    assert_eq!(records[0].category.as_deref(), Some("Alice"));
    assert_eq!(records[0].value, Some(10.0));
    assert_eq!(records[0].other, None);
    assert_eq!(records[1].date, Some(DateCell::Valid(ymd(2000, 1, 1))));
    assert_eq!(records[1].value, Some(12.5));
    assert_eq!(records[1].other.as_deref(), Some("F"));
}

#[test]
fn numeric_compact_host_dates_are_calendar_days() {
    let payload = payload(json!({
        "tables": { "DEFAULT": [
            { "date": [20200115], "category": ["Alice"], "value": [3] }
        ]}
    }));

    let records = normalize_host_payload(&payload, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records[0].date, Some(DateCell::Valid(ymd(2020, 1, 15))));
}

#[test]
fn host_dimension_arrays_use_field_metadata() {
    let payload = payload(json!({
        "tables": { "DEFAULT": [
            { "dimensions": ["2001-03-04", "Mary", "F"], "metrics": [42] }
        ]},
        "fields": {
            "dimensions": [
                { "id": "d0", "name": "Birth Year" },
                { "id": "d1", "name": "Name" },
                { "id": "d2", "name": "Sex" }
            ],
            "metrics": [ { "id": "m0", "name": "Count" } ]
        }
    }));

    let records = normalize_host_payload(&payload, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.date, Some(DateCell::Valid(ymd(2001, 3, 4))));
    assert_eq!(record.category.as_deref(), Some("Mary"));
    assert_eq!(record.other.as_deref(), Some("F"));
    assert_eq!(record.value, Some(42.0));
}

#[test]
fn shorthand_keys_take_precedence_over_metadata() {
    let payload = HostPayload::new(vec![IndexMap::from([
        ("category".to_owned(), vec![RawValue::text("Direct")]),
        (
            "dimensions".to_owned(),
            vec![RawValue::text("2020-01-01"), RawValue::text("FromMeta")],
        ),
        ("value".to_owned(), vec![RawValue::Number(3.0)]),
    ])])
    .with_field(
        "dimensions",
        vec![FieldMeta::new("d0", "date"), FieldMeta::new("d1", "group")],
    );

    let records = normalize_host_payload(&payload, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records[0].category.as_deref(), Some("Direct"));
    assert_eq!(records[0].date, Some(DateCell::Valid(ymd(2020, 1, 1))));
}

#[test]
fn unparseable_values_coerce_to_zero_by_default() {
    let payload = payload(json!({
        "tables": { "DEFAULT": [
            { "date": ["1999"], "category": ["A"], "value": ["abc"] }
        ]}
    }));

    let records = normalize_host_payload(&payload, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records[0].value, Some(0.0));
}

#[test]
fn reject_policy_fails_on_unparseable_values() {
    let payload = payload(json!({
        "tables": { "DEFAULT": [
            { "date": ["1999"], "category": ["A"], "value": [1] },
            { "date": ["1999"], "category": ["B"], "value": ["n/a"] }
        ]}
    }));

    let options = NormalizeOptions::default().with_numeric_policy(NumericPolicy::Reject);
    let err = normalize_host_payload(&payload, options).expect_err("must reject");
    match err {
        StreamGraphError::InvalidValue { row, raw } => {
            assert_eq!(row, 1);
            assert_eq!(raw, "n/a");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_dates_are_kept_as_raw_text() {
    let payload = payload(json!({
        "tables": { "DEFAULT": [
            { "date": ["not a date"], "category": ["A"], "value": [1] }
        ]}
    }));

    let records = normalize_host_payload(&payload, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records[0].date, Some(DateCell::Invalid("not a date".to_owned())));
}

#[test]
fn tabular_rows_infer_roles_from_column_names() {
    let rows = tabular(&[
        &[
            ("year", RawValue::Number(1880.0)),
            ("name", RawValue::text("Mary")),
            ("sex", RawValue::text("F")),
            ("n", RawValue::Number(7065.0)),
            ("prop", RawValue::Number(0.0724)),
        ],
        &[
            ("year", RawValue::Number(1881.0)),
            ("name", RawValue::text("Anna")),
            ("sex", RawValue::text("F")),
            ("n", RawValue::Number(2604.0)),
            ("prop", RawValue::Number(0.0267)),
        ],
    ]);

    let records = normalize_tabular_rows(&rows, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, Some(DateCell::Valid(ymd(1880, 1, 1))));
    assert_eq!(records[0].category.as_deref(), Some("Mary"));
    assert_eq!(records[0].other.as_deref(), Some("F"));
    assert_eq!(records[0].value, Some(0.0724));
    assert_eq!(records[1].category.as_deref(), Some("Anna"));
}

#[test]
fn tabular_rows_without_a_value_column_are_unmappable() {
    let rows = tabular(&[&[
        ("date", RawValue::text("2020-01-01")),
        ("category", RawValue::text("A")),
        ("region", RawValue::text("north")),
    ]]);

    let err = normalize_tabular_rows(&rows, NormalizeOptions::default()).expect_err("unmappable");
    match err {
        StreamGraphError::UnmappableColumns { missing, available } => {
            assert_eq!(missing, vec!["value".to_owned()]);
            assert_eq!(available, vec!["category", "date", "region"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_tabular_input_is_empty_data() {
    let err = normalize_tabular_rows(&[], NormalizeOptions::default()).expect_err("empty");
    assert!(matches!(err, StreamGraphError::EmptyData));
}

#[test]
fn missing_cells_in_later_rows_leave_fields_absent() {
    let rows = tabular(&[
        &[
            ("date", RawValue::text("2020-01-01")),
            ("category", RawValue::text("A")),
            ("value", RawValue::Number(1.0)),
        ],
        &[
            ("date", RawValue::text("2020-01-02")),
            ("value", RawValue::Number(2.0)),
        ],
    ]);

    let records = normalize_tabular_rows(&rows, NormalizeOptions::default()).expect("normalize");
    assert_eq!(records[1].category, None);
    assert_eq!(records[1].present_fields(), vec!["date", "value"]);
}
