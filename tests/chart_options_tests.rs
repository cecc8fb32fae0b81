use serde_json::json;
use streamgraph::api::{
    ChartDefaults, Margins, ResolvedChartOptions, STYLE_CHART_WIDTH, STYLE_COLOR_SCHEME,
    STYLE_FILL_COLOR, STYLE_FONT_COLOR, STYLE_MARGIN_TOP, STYLE_STREAM_OFFSET, STYLE_TIP,
    StyleBag, TipMode,
};
use streamgraph::core::{ColorScheme, StreamOffset, Viewport};

#[test]
fn schema_defaults_apply_to_an_empty_style() {
    let options = ResolvedChartOptions::resolve(&StyleBag::new(), &ChartDefaults::default(), None);
    assert_eq!((options.width, options.height), (600, 400));
    assert_eq!(options.margins, Margins::new(20.0, 30.0, 40.0, 60.0));
    assert_eq!(options.color_scheme, ColorScheme::Category10);
    assert_eq!(options.stream_offset, StreamOffset::Wiggle);
    assert_eq!(options.tip, TipMode::Default);
    assert_eq!(options.background_color, "#ffffff");
    assert_eq!(options.text_color, "#000000");
}

#[test]
fn fallbacks_apply_when_defaults_are_unset() {
    let options = ResolvedChartOptions::resolve(&StyleBag::new(), &ChartDefaults::empty(), None);
    assert_eq!((options.width, options.height), (1024, 768));
    assert_eq!(options.margins, Margins::new(20.0, 30.0, 40.0, 60.0));
}

#[test]
fn style_values_win_over_defaults() {
    let style = StyleBag::new()
        .with_value(STYLE_COLOR_SCHEME, "tableau10")
        .with_value(STYLE_STREAM_OFFSET, "expand")
        .with_value(STYLE_TIP, "custom")
        .with_value(STYLE_CHART_WIDTH, "900px")
        .with_value(STYLE_MARGIN_TOP, "5")
        .with_entry(STYLE_FILL_COLOR, json!({ "value": { "color": "#101010" } }))
        .with_entry(STYLE_FONT_COLOR, json!({ "color": { "value": "#fafafa" } }));

    let options = ResolvedChartOptions::resolve(&style, &ChartDefaults::default(), None);
    assert_eq!(options.color_scheme, ColorScheme::Tableau10);
    assert_eq!(options.stream_offset, StreamOffset::Expand);
    assert_eq!(options.tip, TipMode::Custom);
    assert_eq!(options.width, 900);
    assert_eq!(options.margins.top, 5.0);
    assert_eq!(options.background_color, "#101010");
    assert_eq!(options.text_color, "#fafafa");
}

#[test]
fn unrecognized_or_blank_style_values_fall_through() {
    let style = StyleBag::new()
        .with_value(STYLE_COLOR_SCHEME, "rainbow")
        .with_value(STYLE_STREAM_OFFSET, "")
        .with_value(STYLE_CHART_WIDTH, "-40");
    let defaults = ChartDefaults {
        color_scheme: Some(ColorScheme::Set2),
        ..ChartDefaults::default()
    };

    let options = ResolvedChartOptions::resolve(&style, &defaults, None);
    assert_eq!(options.color_scheme, ColorScheme::Set2);
    assert_eq!(options.stream_offset, StreamOffset::Wiggle);
    assert_eq!(options.width, 600);
}

#[test]
fn tip_accepts_boolean_values() {
    let style = StyleBag::new().with_value(STYLE_TIP, false);
    let options = ResolvedChartOptions::resolve(&style, &ChartDefaults::default(), None);
    assert_eq!(options.tip, TipMode::Disabled);
}

#[test]
fn container_clamp_shrinks_to_fit_with_floor() {
    let defaults = ChartDefaults {
        chart_width: Some(1200),
        chart_height: Some(900),
        ..ChartDefaults::default()
    };

    let fitted = ResolvedChartOptions::resolve(
        &StyleBag::new(),
        &defaults,
        Some(Viewport::new(1000, 700)),
    );
    assert_eq!((fitted.width, fitted.height), (980, 660));

    let tiny = ResolvedChartOptions::resolve(&StyleBag::new(), &defaults, Some(Viewport::new(100, 100)));
    assert_eq!((tiny.width, tiny.height), (300, 200));
}

#[test]
fn defaults_round_trip_through_a_style_bag() {
    let defaults = ChartDefaults {
        stream_offset: Some(StreamOffset::Silhouette),
        tip: Some(TipMode::Custom),
        fill_color: Some("#222222".to_owned()),
        ..ChartDefaults::default()
    };
    let from_style =
        ResolvedChartOptions::resolve(&defaults.to_style_bag(), &ChartDefaults::empty(), None);
    let from_defaults = ResolvedChartOptions::resolve(&StyleBag::new(), &defaults, None);
    assert_eq!(from_style, from_defaults);
}

#[test]
fn chart_defaults_deserialize_partially() {
    let defaults: ChartDefaults =
        serde_json::from_value(json!({ "streamOffset": "none", "chartWidth": 720 }))
            .expect("valid defaults");
    assert_eq!(defaults.stream_offset, Some(StreamOffset::None));
    assert_eq!(defaults.chart_width, Some(720));
    // Omitted keys keep the schema defaults.
    assert_eq!(defaults.tip, Some(TipMode::Default));
}
