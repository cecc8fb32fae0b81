//! Host configuration schema: the data and style elements a dashboard
//! exposes for the stream graph, serialized as the registration artifact.

use serde::{Deserialize, Serialize};

use crate::api::chart_options::{
    STYLE_CHART_HEIGHT, STYLE_CHART_WIDTH, STYLE_COLOR_SCHEME, STYLE_FILL_COLOR, STYLE_FONT_COLOR,
    STYLE_MARGIN_BOTTOM, STYLE_MARGIN_LEFT, STYLE_MARGIN_RIGHT, STYLE_MARGIN_TOP,
    STYLE_STREAM_OFFSET, STYLE_TIP,
};
use crate::api::{ChartDefaults, TipMode};
use crate::core::{ColorScheme, StreamOffset};
use crate::error::StreamGraphResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataElementKind {
    Dimension,
    Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataElement {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: DataElementKind,
    pub options: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSection {
    pub id: String,
    pub label: String,
    pub elements: Vec<DataElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleElementKind {
    FillColor,
    FontColor,
    SelectSingle,
    Textinput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleElement {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: StyleElementKind,
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSection {
    pub id: String,
    pub label: String,
    pub elements: Vec<StyleElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub data: Vec<DataSection>,
    pub style: Vec<StyleSection>,
}

impl ConfigSchema {
    #[must_use]
    pub fn style_element(&self, id: &str) -> Option<&StyleElement> {
        self.style
            .iter()
            .flat_map(|section| &section.elements)
            .find(|element| element.id == id)
    }

    pub fn to_json_pretty(&self) -> StreamGraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn data_element(id: &str, label: &str, kind: DataElementKind) -> DataElement {
    DataElement {
        id: id.to_owned(),
        label: label.to_owned(),
        kind,
        options: Cardinality { min: 1, max: 1 },
    }
}

fn style_element(id: &str, label: &str, kind: StyleElementKind, default_value: &str) -> StyleElement {
    StyleElement {
        id: id.to_owned(),
        label: label.to_owned(),
        kind,
        default_value: default_value.to_owned(),
        options: Vec::new(),
    }
}

fn select_element<'a>(
    id: &str,
    label: &str,
    default_value: &str,
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> StyleElement {
    StyleElement {
        options: options
            .into_iter()
            .map(|(label, value)| SelectOption {
                label: label.to_owned(),
                value: value.to_owned(),
            })
            .collect(),
        ..style_element(id, label, StyleElementKind::SelectSingle, default_value)
    }
}

fn offset_label(offset: StreamOffset) -> &'static str {
    match offset {
        StreamOffset::Wiggle => "Wiggle",
        StreamOffset::Silhouette => "Silhouette",
        StreamOffset::Expand => "Expand",
        StreamOffset::None => "None",
    }
}

fn tip_label(tip: TipMode) -> &'static str {
    match tip {
        TipMode::Default => "Basic Tooltips",
        TipMode::Disabled => "No Tooltips",
        TipMode::Custom => "Custom Grouped Tooltips",
    }
}

/// The declared host configuration schema.
///
/// Style defaults come from [`ChartDefaults::default`], so the schema and
/// the configured-defaults tier never drift apart.
#[must_use]
pub fn config_schema() -> ConfigSchema {
    let defaults = ChartDefaults::default();
    let text = |value: Option<String>| value.unwrap_or_default();
    let number = |value: Option<f64>| value.map(|value| value.to_string()).unwrap_or_default();

    let data = vec![DataSection {
        id: "dimensions".to_owned(),
        label: "Stream Graph Data".to_owned(),
        elements: vec![
            data_element("date", "Date", DataElementKind::Dimension),
            data_element("category", "Category", DataElementKind::Dimension),
            data_element("value", "Value", DataElementKind::Metric),
        ],
    }];

    let elements = vec![
        style_element(
            STYLE_FILL_COLOR,
            "Background Color",
            StyleElementKind::FillColor,
            &text(defaults.fill_color.clone()),
        ),
        style_element(
            STYLE_FONT_COLOR,
            "Text Color",
            StyleElementKind::FontColor,
            &text(defaults.font_color.clone()),
        ),
        select_element(
            STYLE_COLOR_SCHEME,
            "Color Scheme",
            defaults.color_scheme.map_or("", ColorScheme::as_str),
            ColorScheme::ALL.map(|scheme| (scheme.label(), scheme.as_str())),
        ),
        select_element(
            STYLE_STREAM_OFFSET,
            "Stream Layout",
            defaults.stream_offset.map_or("", StreamOffset::as_str),
            StreamOffset::ALL.map(|offset| (offset_label(offset), offset.as_str())),
        ),
        style_element(
            STYLE_MARGIN_TOP,
            "Chart Top Margin",
            StyleElementKind::Textinput,
            &number(defaults.margin_top),
        ),
        style_element(
            STYLE_MARGIN_RIGHT,
            "Chart Right Margin",
            StyleElementKind::Textinput,
            &number(defaults.margin_right),
        ),
        style_element(
            STYLE_MARGIN_BOTTOM,
            "Chart Bottom Margin",
            StyleElementKind::Textinput,
            &number(defaults.margin_bottom),
        ),
        style_element(
            STYLE_MARGIN_LEFT,
            "Chart Left Margin",
            StyleElementKind::Textinput,
            &number(defaults.margin_left),
        ),
        style_element(
            STYLE_CHART_WIDTH,
            "Chart Width (px)",
            StyleElementKind::Textinput,
            &defaults.chart_width.map(|width| width.to_string()).unwrap_or_default(),
        ),
        style_element(
            STYLE_CHART_HEIGHT,
            "Chart Height (px)",
            StyleElementKind::Textinput,
            &defaults.chart_height.map(|height| height.to_string()).unwrap_or_default(),
        ),
        select_element(
            STYLE_TIP,
            "Tooltip Style",
            defaults.tip.map_or("", TipMode::as_str),
            TipMode::ALL.map(|tip| (tip_label(tip), tip.as_str())),
        ),
    ];

    ConfigSchema {
        data,
        style: vec![StyleSection {
            id: "styleOptions".to_owned(),
            label: "Stream Graph Options".to_owned(),
            elements,
        }],
    }
}
