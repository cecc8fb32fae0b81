use approx::assert_relative_eq;
use streamgraph::api::{LEGEND_ROW_HEIGHT, LegendLayout, Margins, resolve_responsive_margins};

#[test]
fn small_chart_caps_requested_top_margin() {
    let margins = resolve_responsive_margins(Margins::new(200.0, 30.0, 40.0, 60.0), 300.0, 200.0);
    assert_relative_eq!(margins.top, 20.0);
    assert!(margins.top >= 10.0 && margins.top <= 0.1 * 200.0);
}

#[test]
fn floors_win_on_tiny_charts() {
    let margins = resolve_responsive_margins(Margins::new(20.0, 30.0, 40.0, 60.0), 100.0, 100.0);
    assert_relative_eq!(margins.top, 10.0);
    assert_relative_eq!(margins.right, 10.0);
    assert_relative_eq!(margins.bottom, 30.0);
    assert_relative_eq!(margins.left, 40.0);
}

#[test]
fn requested_margins_survive_on_large_charts() {
    let requested = Margins::new(20.0, 30.0, 40.0, 60.0);
    let margins = resolve_responsive_margins(requested, 1200.0, 800.0);
    assert_eq!(margins, requested);
}

#[test]
fn zero_requests_are_raised_to_floors() {
    let margins = resolve_responsive_margins(Margins::new(0.0, 0.0, 0.0, 0.0), 1000.0, 1000.0);
    assert_eq!(margins, Margins::new(10.0, 10.0, 30.0, 40.0));
}

#[test]
fn wide_legend_uses_six_unconstrained_columns() {
    let legend = LegendLayout::for_width(800.0);
    assert_eq!(legend.columns, 6);
    assert_eq!(legend.max_width, None);
    assert_eq!(legend.rows(7), 2);
    assert_relative_eq!(legend.band_height(7), 2.0 * LEGEND_ROW_HEIGHT + 6.0);
    assert_relative_eq!(legend.band_height(0), 0.0);
}

#[test]
fn narrow_legend_slots_are_row_major_within_max_width() {
    let legend = LegendLayout::for_width(400.0);
    assert_eq!(legend.columns, 3);
    assert_eq!(legend.max_width, Some(200.0));

    let slots = legend.slots(5, 400.0, 40.0);
    assert_eq!(slots.len(), 5);
    assert_relative_eq!(slots[0].x, 40.0);
    assert_relative_eq!(slots[1].x, 40.0 + 200.0 / 3.0);
    assert_relative_eq!(slots[3].x, 40.0);
    assert!(slots[3].y > slots[2].y);
    assert_relative_eq!(slots[4].y, slots[3].y);
    for slot in &slots {
        assert!(slot.x + slot.width <= 40.0 + 200.0 + 1e-9);
    }
}
