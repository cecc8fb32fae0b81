use proptest::prelude::*;
use proptest::sample::subsequence;
use streamgraph::api::{ColumnMappingOutcome, resolve_column_mapping};

const COLUMN_POOL: &[&str] = &[
    "year",
    "Date",
    "month_start",
    "name",
    "Group",
    "type",
    "sex",
    "gender",
    "n",
    "count",
    "Amount",
    "prop",
    "rate",
    "region",
    "notes",
];

fn column_sets() -> impl Strategy<Value = Vec<&'static str>> {
    subsequence(COLUMN_POOL.to_vec(), 0..=COLUMN_POOL.len()).prop_shuffle()
}

proptest! {
    #[test]
    fn column_mapping_is_order_independent(columns in column_sets()) {
        let mut sorted = columns.clone();
        sorted.sort_unstable();

        prop_assert_eq!(resolve_column_mapping(&columns), resolve_column_mapping(&sorted));
    }

    #[test]
    fn resolved_roles_use_distinct_existing_columns(columns in column_sets()) {
        if let ColumnMappingOutcome::Resolved(mapping) = resolve_column_mapping(&columns) {
            let mut used = vec![mapping.date.as_str(), mapping.category.as_str(), mapping.value.as_str()];
            if let Some(secondary) = mapping.secondary.as_deref() {
                used.push(secondary);
            }
            for column in &used {
                prop_assert!(columns.contains(column));
            }
            let mut deduped = used.clone();
            deduped.sort_unstable();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), used.len());
        }
    }
}
