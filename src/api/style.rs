use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Style option bag as sent by the host: option id to entry object.
///
/// Scalar options carry their current value under `value`. Color options
/// are nested differently depending on the style engine, see
/// [`extract_color_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleBag {
    entries: Map<String, Value>,
}

impl StyleBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_map(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Sets `{ "value": value }` for a scalar option.
    #[must_use]
    pub fn with_value(mut self, id: &str, value: impl Into<Value>) -> Self {
        self.entries
            .insert(id.to_owned(), json!({ "value": value.into() }));
        self
    }

    /// Stores a raw entry, for color options or unusual nesting.
    #[must_use]
    pub fn with_entry(mut self, id: &str, entry: Value) -> Self {
        self.entries.insert(id.to_owned(), entry);
        self
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current value of a scalar option as text.
    ///
    /// Empty strings and nulls count as unset so that the next resolution
    /// tier applies.
    #[must_use]
    pub fn value_text(&self, id: &str) -> Option<String> {
        let value = self.entries.get(id)?.get("value")?;
        let text = match value {
            Value::String(text) => text.trim().to_owned(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Hex color of a color option, or `default`.
    #[must_use]
    pub fn color(&self, id: &str, default: &str) -> String {
        extract_color_value(self.entries.get(id), default)
    }
}

/// Walks the known nestings of a color entry and returns the first hex string.
///
/// Checked in order: `.value.color`, `.color.value`, `.value`, `.color`,
/// and the entry itself.
#[must_use]
pub fn extract_color_value(entry: Option<&Value>, default: &str) -> String {
    let Some(entry) = entry else {
        return default.to_owned();
    };

    let candidates = [
        entry.get("value").and_then(|value| value.get("color")),
        entry.get("color").and_then(|color| color.get("value")),
        entry.get("value"),
        entry.get("color"),
        Some(entry),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|text| text.starts_with('#'))
        .map_or_else(|| default.to_owned(), |text| text.to_owned())
}
