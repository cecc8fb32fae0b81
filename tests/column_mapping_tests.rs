use streamgraph::api::{ColumnMappingOutcome, ColumnRole, resolve_column_mapping, role_for_name};

#[test]
fn babynames_columns_resolve() {
    let mapping = resolve_column_mapping(&["year", "name", "sex", "n", "prop"])
        .into_result()
        .expect("resolved");
    assert_eq!(mapping.date, "year");
    assert_eq!(mapping.category, "name");
    assert_eq!(mapping.secondary.as_deref(), Some("sex"));
    assert_eq!(mapping.value, "prop");
}

#[test]
fn secondary_role_is_optional() {
    let mapping = resolve_column_mapping(&["Date", "Category", "Value"])
        .into_result()
        .expect("resolved");
    assert_eq!(mapping.secondary, None);
    assert_eq!(mapping.column(ColumnRole::Secondary), None);
    assert_eq!(mapping.column(ColumnRole::Value), Some("Value"));
}

#[test]
fn claimed_columns_are_not_reused_by_later_roles() {
    // "type" is a category keyword; "datetype" is claimed by date first.
    let mapping = resolve_column_mapping(&["datetype", "kind_type", "amount"])
        .into_result()
        .expect("resolved");
    assert_eq!(mapping.date, "datetype");
    assert_eq!(mapping.category, "kind_type");
    assert_eq!(mapping.value, "amount");
}

#[test]
fn ties_on_keyword_rank_break_by_name() {
    let forward = resolve_column_mapping(&["start_date", "end_date", "group", "value"]);
    let reversed = resolve_column_mapping(&["value", "group", "end_date", "start_date"]);
    assert_eq!(forward, reversed);
    let mapping = forward.into_result().expect("resolved");
    assert_eq!(mapping.date, "end_date");
}

#[test]
fn unmappable_outcome_reports_every_missing_required_role() {
    let outcome = resolve_column_mapping(&["alpha", "beta"]);
    match outcome {
        ColumnMappingOutcome::Unmappable { missing, available } => {
            assert_eq!(
                missing,
                vec![ColumnRole::Date, ColumnRole::Category, ColumnRole::Value]
            );
            assert_eq!(available, vec!["alpha", "beta"]);
        }
        ColumnMappingOutcome::Resolved(mapping) => panic!("unexpected mapping: {mapping:?}"),
    }
}

#[test]
fn unmappable_error_message_lists_needed_keywords() {
    let err = resolve_column_mapping(&["alpha"])
        .into_result()
        .expect_err("unmappable");
    let message = err.to_string();
    assert!(message.contains("date, category, value"), "{message}");
    assert!(message.contains("Available: alpha"), "{message}");
}

#[test]
fn shorthand_keys_map_to_roles() {
    assert_eq!(ColumnRole::from_shorthand("other"), Some(ColumnRole::Secondary));
    assert_eq!(ColumnRole::from_shorthand("value"), Some(ColumnRole::Value));
    assert_eq!(ColumnRole::from_shorthand("Value"), None);
    assert_eq!(role_for_name("Unemployment Rate"), Some(ColumnRole::Value));
}
