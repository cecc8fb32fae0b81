use proptest::prelude::*;
use streamgraph::core::{StreamOffset, stack_columns};

fn value_grids() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..6, 1usize..12).prop_flat_map(|(layers, columns)| {
        prop::collection::vec(prop::collection::vec(0.0f64..1_000.0, columns), layers)
    })
}

fn offsets() -> impl Strategy<Value = StreamOffset> {
    prop::sample::select(StreamOffset::ALL.to_vec())
}

proptest! {
    #[test]
    fn stacked_layers_never_overlap(values in value_grids(), offset in offsets()) {
        let bounds = stack_columns(&values, offset);
        prop_assert_eq!(bounds.len(), values.len());
        for column in 0..values[0].len() {
            for layer in 1..bounds.len() {
                let below = bounds[layer - 1][column];
                let above = bounds[layer][column];
                prop_assert!((above.0 - below.1).abs() <= 1e-9);
            }
        }
    }

    #[test]
    fn layer_thickness_matches_value_without_normalization(
        values in value_grids(),
        offset in prop::sample::select(vec![StreamOffset::Wiggle, StreamOffset::Silhouette, StreamOffset::None])
    ) {
        let bounds = stack_columns(&values, offset);
        for (row, row_bounds) in values.iter().zip(&bounds) {
            for (value, (y0, y1)) in row.iter().zip(row_bounds) {
                prop_assert!((y1 - y0 - value).abs() <= 1e-6 * value.max(1.0));
            }
        }
    }

    #[test]
    fn expand_columns_span_zero_to_one(values in value_grids()) {
        let bounds = stack_columns(&values, StreamOffset::Expand);
        for column in 0..values[0].len() {
            let total: f64 = values.iter().map(|row| row[column]).sum();
            if total > 0.0 {
                prop_assert!(bounds[0][column].0.abs() <= 1e-12);
                let top = bounds[bounds.len() - 1][column].1;
                prop_assert!((top - 1.0).abs() <= 1e-9);
            }
        }
    }

    #[test]
    fn silhouette_centers_each_column(values in value_grids()) {
        let bounds = stack_columns(&values, StreamOffset::Silhouette);
        for column in 0..values[0].len() {
            let bottom = bounds[0][column].0;
            let top = bounds[bounds.len() - 1][column].1;
            prop_assert!((bottom + top).abs() <= 1e-6);
        }
    }
}
