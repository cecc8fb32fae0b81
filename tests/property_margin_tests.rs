use proptest::prelude::*;
use streamgraph::api::{Margins, resolve_responsive_margins};

proptest! {
    #[test]
    fn responsive_margins_stay_between_floor_and_fraction(
        top in 0.0f64..1_000.0,
        right in 0.0f64..1_000.0,
        bottom in 0.0f64..1_000.0,
        left in 0.0f64..1_000.0,
        width in 300.0f64..4_000.0,
        height in 200.0f64..4_000.0
    ) {
        let margins = resolve_responsive_margins(Margins::new(top, right, bottom, left), width, height);

        prop_assert!(margins.top >= 10.0);
        prop_assert!(margins.top <= (0.10 * height).max(10.0) + 1e-9);
        prop_assert!(margins.right >= 10.0);
        prop_assert!(margins.right <= (0.05 * width).max(10.0) + 1e-9);
        prop_assert!(margins.bottom >= 30.0);
        prop_assert!(margins.bottom <= (0.15 * height).max(30.0) + 1e-9);
        prop_assert!(margins.left >= 40.0);
        prop_assert!(margins.left <= (0.10 * width).max(40.0) + 1e-9);
    }

    #[test]
    fn responsive_margins_never_exceed_the_request_above_floor(
        top in 10.0f64..1_000.0,
        width in 300.0f64..4_000.0,
        height in 200.0f64..4_000.0
    ) {
        let margins = resolve_responsive_margins(Margins::new(top, 10.0, 30.0, 40.0), width, height);
        prop_assert!(margins.top <= top + 1e-9);
    }
}
