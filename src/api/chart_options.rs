use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::StyleBag;
use crate::core::{ColorScheme, StreamOffset, Viewport};

pub const STYLE_FILL_COLOR: &str = "fillColor";
pub const STYLE_FONT_COLOR: &str = "fontColor";
pub const STYLE_COLOR_SCHEME: &str = "colorScheme";
pub const STYLE_STREAM_OFFSET: &str = "streamOffset";
pub const STYLE_MARGIN_TOP: &str = "marginTop";
pub const STYLE_MARGIN_RIGHT: &str = "marginRight";
pub const STYLE_MARGIN_BOTTOM: &str = "marginBottom";
pub const STYLE_MARGIN_LEFT: &str = "marginLeft";
pub const STYLE_CHART_WIDTH: &str = "chartWidth";
pub const STYLE_CHART_HEIGHT: &str = "chartHeight";
pub const STYLE_TIP: &str = "tip";

// Last-resort values when neither the style nor the configured defaults set an option.
const FALLBACK_WIDTH: u32 = 1024;
const FALLBACK_HEIGHT: u32 = 768;
const FALLBACK_MARGINS: Margins = Margins::new(20.0, 30.0, 40.0, 60.0);
const FALLBACK_BACKGROUND: &str = "#ffffff";
const FALLBACK_TEXT: &str = "#000000";

const MIN_HOSTED_WIDTH: u32 = 300;
const MIN_HOSTED_HEIGHT: u32 = 200;
const HOSTED_WIDTH_GUTTER: u32 = 20;
const HOSTED_HEIGHT_GUTTER: u32 = 40;

/// Tooltip behavior of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipMode {
    #[serde(rename = "false")]
    Disabled,
    /// Single-point tooltip of the drawing backend.
    #[serde(rename = "true")]
    Default,
    /// Grouped panel listing every category at the hovered date.
    #[serde(rename = "custom")]
    Custom,
}

impl TipMode {
    pub const ALL: [Self; 3] = [Self::Default, Self::Disabled, Self::Custom];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "false",
            Self::Default => "true",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tip mode `{s}`"))
    }
}

/// Chart margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Configured defaults: the middle tier of option resolution.
///
/// `Default` yields the defaults declared in the host configuration schema.
/// A `None` field defers to the built-in fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartDefaults {
    pub fill_color: Option<String>,
    pub font_color: Option<String>,
    pub color_scheme: Option<ColorScheme>,
    pub stream_offset: Option<StreamOffset>,
    pub margin_top: Option<f64>,
    pub margin_right: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub margin_left: Option<f64>,
    pub chart_width: Option<u32>,
    pub chart_height: Option<u32>,
    pub tip: Option<TipMode>,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            fill_color: Some("#ffffff".to_owned()),
            font_color: Some("#000000".to_owned()),
            color_scheme: Some(ColorScheme::Category10),
            stream_offset: Some(StreamOffset::Wiggle),
            margin_top: Some(20.0),
            margin_right: Some(30.0),
            margin_bottom: Some(40.0),
            margin_left: Some(60.0),
            chart_width: Some(600),
            chart_height: Some(400),
            tip: Some(TipMode::Default),
        }
    }
}

impl ChartDefaults {
    /// Defaults with every option unset, so only the built-in fallbacks apply.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fill_color: None,
            font_color: None,
            color_scheme: None,
            stream_offset: None,
            margin_top: None,
            margin_right: None,
            margin_bottom: None,
            margin_left: None,
            chart_width: None,
            chart_height: None,
            tip: None,
        }
    }

    /// Style bag carrying these defaults as explicit values, as used in
    /// standalone mode where no host supplies a style.
    #[must_use]
    pub fn to_style_bag(&self) -> StyleBag {
        let mut style = StyleBag::new();
        if let Some(color) = &self.fill_color {
            style = style.with_entry(STYLE_FILL_COLOR, serde_json::json!({ "color": { "value": color } }));
        }
        if let Some(color) = &self.font_color {
            style = style.with_entry(STYLE_FONT_COLOR, serde_json::json!({ "color": { "value": color } }));
        }
        if let Some(scheme) = self.color_scheme {
            style = style.with_value(STYLE_COLOR_SCHEME, scheme.as_str());
        }
        if let Some(offset) = self.stream_offset {
            style = style.with_value(STYLE_STREAM_OFFSET, offset.as_str());
        }
        for (id, margin) in [
            (STYLE_MARGIN_TOP, self.margin_top),
            (STYLE_MARGIN_RIGHT, self.margin_right),
            (STYLE_MARGIN_BOTTOM, self.margin_bottom),
            (STYLE_MARGIN_LEFT, self.margin_left),
        ] {
            if let Some(margin) = margin {
                style = style.with_value(id, margin.to_string());
            }
        }
        if let Some(width) = self.chart_width {
            style = style.with_value(STYLE_CHART_WIDTH, width.to_string());
        }
        if let Some(height) = self.chart_height {
            style = style.with_value(STYLE_CHART_HEIGHT, height.to_string());
        }
        if let Some(tip) = self.tip {
            style = style.with_value(STYLE_TIP, tip.as_str());
        }
        style
    }
}

/// Fully resolved rendering parameters for one render pass.
///
/// `margins` are the requested margins; the responsive clamp is applied by
/// the layout step against the final dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedChartOptions {
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    pub color_scheme: ColorScheme,
    pub stream_offset: StreamOffset,
    pub tip: TipMode,
    pub background_color: String,
    pub text_color: String,
}

impl ResolvedChartOptions {
    /// Resolves every option through style value, configured default, then fallback.
    ///
    /// When the host reports its container size, the configured dimensions
    /// are shrunk to fit it, down to a minimum viable chart.
    #[must_use]
    pub fn resolve(style: &StyleBag, defaults: &ChartDefaults, container: Option<Viewport>) -> Self {
        let mut width = style_parsed(style, STYLE_CHART_WIDTH, parse_pixels)
            .or(defaults.chart_width)
            .unwrap_or(FALLBACK_WIDTH);
        let mut height = style_parsed(style, STYLE_CHART_HEIGHT, parse_pixels)
            .or(defaults.chart_height)
            .unwrap_or(FALLBACK_HEIGHT);
        if let Some(container) = container {
            width = width
                .min(container.width.saturating_sub(HOSTED_WIDTH_GUTTER))
                .max(MIN_HOSTED_WIDTH);
            height = height
                .min(container.height.saturating_sub(HOSTED_HEIGHT_GUTTER))
                .max(MIN_HOSTED_HEIGHT);
        }

        let margin = |id: &str, configured: Option<f64>, fallback: f64| {
            style_parsed(style, id, parse_margin)
                .or(configured)
                .unwrap_or(fallback)
        };
        let margins = Margins::new(
            margin(STYLE_MARGIN_TOP, defaults.margin_top, FALLBACK_MARGINS.top),
            margin(STYLE_MARGIN_RIGHT, defaults.margin_right, FALLBACK_MARGINS.right),
            margin(STYLE_MARGIN_BOTTOM, defaults.margin_bottom, FALLBACK_MARGINS.bottom),
            margin(STYLE_MARGIN_LEFT, defaults.margin_left, FALLBACK_MARGINS.left),
        );

        let color_scheme = style_parsed(style, STYLE_COLOR_SCHEME, |text| text.parse().ok())
            .or(defaults.color_scheme)
            .unwrap_or(ColorScheme::Category10);
        let stream_offset = style_parsed(style, STYLE_STREAM_OFFSET, |text| text.parse().ok())
            .or(defaults.stream_offset)
            .unwrap_or(StreamOffset::Wiggle);
        let tip = style_parsed(style, STYLE_TIP, |text| text.parse().ok())
            .or(defaults.tip)
            .unwrap_or(TipMode::Default);

        let background_color = style.color(
            STYLE_FILL_COLOR,
            defaults.fill_color.as_deref().unwrap_or(FALLBACK_BACKGROUND),
        );
        let text_color = style.color(
            STYLE_FONT_COLOR,
            defaults.font_color.as_deref().unwrap_or(FALLBACK_TEXT),
        );

        let resolved = Self {
            width,
            height,
            margins,
            color_scheme,
            stream_offset,
            tip,
            background_color,
            text_color,
        };
        debug!(?resolved, "resolved chart options");
        resolved
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

fn style_parsed<T>(style: &StyleBag, id: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let text = style.value_text(id)?;
    let parsed = parse(&text);
    if parsed.is_none() {
        debug!(option = id, value = %text, "ignoring unrecognized style value");
    }
    parsed
}

/// Leading integer of `text`, as a lenient integer parse would read it.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let sign = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign + digits].parse().ok()
}

fn parse_pixels(text: &str) -> Option<u32> {
    parse_leading_integer(text)
        .filter(|pixels| *pixels > 0)
        .and_then(|pixels| u32::try_from(pixels).ok())
}

fn parse_margin(text: &str) -> Option<f64> {
    parse_leading_integer(text)
        .filter(|margin| *margin >= 0)
        .map(|margin| margin as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_is_lenient() {
        assert_eq!(parse_leading_integer("640px"), Some(640));
        assert_eq!(parse_leading_integer(" 12.9 "), Some(12));
        assert_eq!(parse_leading_integer("-5"), Some(-5));
        assert_eq!(parse_leading_integer("px"), None);
        assert_eq!(parse_pixels("0"), None);
        assert_eq!(parse_margin("-5"), None);
    }
}
