//! Wire shapes delivered by the hosting dashboard and by standalone sources.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::api::StyleBag;
use crate::core::RawValue;

/// Host row: every field value arrives wrapped in a sequence.
pub type HostRow = IndexMap<String, Vec<RawValue>>;

/// Tabular row: column name to scalar, in source column order.
pub type TabularRow = IndexMap<String, RawValue>;

/// Per-field metadata declared by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, alias = "role", skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
}

impl FieldMeta {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type: None,
            concept: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostTables {
    #[serde(rename = "DEFAULT", default)]
    pub default: Vec<HostRow>,
}

/// Payload pushed by the host on every data change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostPayload {
    #[serde(default)]
    pub tables: HostTables,
    #[serde(default)]
    pub fields: IndexMap<String, Vec<FieldMeta>>,
    #[serde(default)]
    pub style: StyleBag,
}

impl HostPayload {
    #[must_use]
    pub fn new(rows: Vec<HostRow>) -> Self {
        Self {
            tables: HostTables { default: rows },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, meta: Vec<FieldMeta>) -> Self {
        self.fields.insert(key.into(), meta);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleBag) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn rows(&self) -> &[HostRow] {
        &self.tables.default
    }

    /// Metadata name of the value at `index` under `key`, if declared.
    #[must_use]
    pub fn field_name(&self, key: &str, index: usize) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|fields| fields.get(index))
            .map(|field| field.name.as_str())
    }
}
