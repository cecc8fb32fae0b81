use streamgraph::api::{
    ChartDefaults, DataElementKind, NumericPolicy, STYLE_MARGIN_TOP, STYLE_STREAM_OFFSET,
    STYLE_TIP, StandaloneConfig, StreamGraphConfig, StyleElementKind, config_schema,
};
use streamgraph::core::StreamOffset;
use streamgraph::error::StreamGraphError;

#[test]
fn schema_declares_three_single_field_data_slots() {
    let schema = config_schema();
    let section = &schema.data[0];
    assert_eq!(section.id, "dimensions");

    let kinds: Vec<(&str, DataElementKind)> = section
        .elements
        .iter()
        .map(|element| (element.id.as_str(), element.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("date", DataElementKind::Dimension),
            ("category", DataElementKind::Dimension),
            ("value", DataElementKind::Metric),
        ]
    );
    assert!(section.elements.iter().all(|element| element.options.min == 1 && element.options.max == 1));
}

#[test]
fn style_defaults_match_configured_defaults() {
    let schema = config_schema();
    let offset = schema.style_element(STYLE_STREAM_OFFSET).expect("offset element");
    assert_eq!(offset.kind, StyleElementKind::SelectSingle);
    assert_eq!(offset.default_value, "wiggle");
    assert_eq!(offset.options.len(), StreamOffset::ALL.len());

    let tip = schema.style_element(STYLE_TIP).expect("tip element");
    assert_eq!(tip.default_value, "true");
    assert_eq!(tip.options[2].label, "Custom Grouped Tooltips");

    let margin = schema.style_element(STYLE_MARGIN_TOP).expect("margin element");
    assert_eq!(margin.kind, StyleElementKind::Textinput);
    assert_eq!(margin.default_value, "20");
}

#[test]
fn schema_json_uses_host_field_names() {
    let json = config_schema().to_json_pretty().expect("json");
    assert!(json.contains("\"type\": \"DIMENSION\""));
    assert!(json.contains("\"type\": \"METRIC\""));
    assert!(json.contains("\"type\": \"FILL_COLOR\""));
    assert!(json.contains("\"type\": \"SELECT_SINGLE\""));
    assert!(json.contains("\"defaultValue\": \"#ffffff\""));
    // Text inputs carry no option list.
    let value: serde_json::Value = serde_json::from_str(&json).expect("round trip");
    let margin = value["style"][0]["elements"]
        .as_array()
        .expect("elements")
        .iter()
        .find(|element| element["id"] == "marginTop")
        .expect("margin element");
    assert!(margin.get("options").is_none());
}

#[test]
fn partial_config_file_keeps_defaults() {
    let config = StreamGraphConfig::from_json_str(
        r#"{ "defaults": { "streamOffset": "expand" }, "numericPolicy": "reject" }"#,
    )
    .expect("config");

    assert_eq!(config.defaults.stream_offset, Some(StreamOffset::Expand));
    assert_eq!(config.defaults.chart_width, ChartDefaults::default().chart_width);
    assert_eq!(config.numeric_policy, NumericPolicy::Reject);
    assert_eq!(config.standalone, StandaloneConfig::default());
    assert_eq!(config.normalize_options().numeric_policy, NumericPolicy::Reject);
}

#[test]
fn config_round_trips_through_json() {
    let config = StreamGraphConfig::default().with_numeric_policy(NumericPolicy::Reject);
    let json = config.to_json_pretty().expect("json");
    assert!(json.contains("\"sampleDataPaths\""));
    assert_eq!(StreamGraphConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn malformed_config_is_invalid_data() {
    let err = StreamGraphConfig::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, StreamGraphError::InvalidData(_)));
}
