//! Keyword-driven inference of the semantic role of a column or field.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StreamGraphError;

const DATE_KEYWORDS: &[&str] = &["date", "time", "year", "month", "day"];
const CATEGORY_KEYWORDS: &[&str] = &["category", "group", "type", "class", "name"];
const SECONDARY_KEYWORDS: &[&str] = &["sex", "gender", "other", "secondary", "subgroup"];
const VALUE_KEYWORDS: &[&str] = &["value", "amount", "count", "number", "prop", "rate", "percent"];

/// Semantic role of an input column, in inference priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Date,
    Category,
    Secondary,
    Value,
}

impl ColumnRole {
    pub const PRIORITY: [Self; 4] = [Self::Date, Self::Category, Self::Secondary, Self::Value];

    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Date => DATE_KEYWORDS,
            Self::Category => CATEGORY_KEYWORDS,
            Self::Secondary => SECONDARY_KEYWORDS,
            Self::Value => VALUE_KEYWORDS,
        }
    }

    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Secondary)
    }

    /// Canonical record field the role fills.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Category => "category",
            Self::Secondary => "other",
            Self::Value => "value",
        }
    }

    /// Maps a shorthand host key (`date`, `category`, `other`, `value`) to its role.
    #[must_use]
    pub fn from_shorthand(key: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|role| role.field_name() == key)
    }

    /// Index of the first keyword contained in `name`, case-insensitively.
    #[must_use]
    pub fn keyword_rank(self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.keywords()
            .iter()
            .position(|keyword| lower.contains(keyword))
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// First role, in priority order, whose keywords match `name`.
#[must_use]
pub fn role_for_name(name: &str) -> Option<ColumnRole> {
    ColumnRole::PRIORITY
        .into_iter()
        .find(|role| role.keyword_rank(name).is_some())
}

/// Resolved column names for each role of a tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub category: String,
    pub secondary: Option<String>,
    pub value: String,
}

impl ColumnMapping {
    #[must_use]
    pub fn column(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Date => Some(&self.date),
            ColumnRole::Category => Some(&self.category),
            ColumnRole::Secondary => self.secondary.as_deref(),
            ColumnRole::Value => Some(&self.value),
        }
    }
}

/// Outcome of column-role resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMappingOutcome {
    Resolved(ColumnMapping),
    Unmappable {
        missing: Vec<ColumnRole>,
        available: Vec<String>,
    },
}

impl ColumnMappingOutcome {
    pub fn into_result(self) -> Result<ColumnMapping, StreamGraphError> {
        match self {
            Self::Resolved(mapping) => Ok(mapping),
            Self::Unmappable { missing, available } => Err(StreamGraphError::UnmappableColumns {
                missing: missing.iter().map(ToString::to_string).collect(),
                available,
            }),
        }
    }
}

/// Resolves which column plays which role.
///
/// Roles are resolved in priority order and a column claimed by an earlier
/// role is not offered to later ones. Among the candidates of a role the
/// one matching the earliest keyword wins, ties broken by column name, so
/// the result does not depend on the order the columns are listed in.
#[must_use]
pub fn resolve_column_mapping<S: AsRef<str>>(columns: &[S]) -> ColumnMappingOutcome {
    let mut claimed: Vec<&str> = Vec::with_capacity(4);
    let mut resolved: [Option<String>; 4] = [None, None, None, None];

    for (slot, role) in ColumnRole::PRIORITY.into_iter().enumerate() {
        let best = columns
            .iter()
            .map(AsRef::as_ref)
            .filter(|column| !claimed.contains(column))
            .filter_map(|column| role.keyword_rank(column).map(|rank| (rank, column)))
            .min();
        if let Some((_, column)) = best {
            claimed.push(column);
            resolved[slot] = Some(column.to_owned());
        }
    }

    let [date, category, secondary, value] = resolved;
    match (date, category, value) {
        (Some(date), Some(category), Some(value)) => ColumnMappingOutcome::Resolved(ColumnMapping {
            date,
            category,
            secondary,
            value,
        }),
        (date, category, value) => {
            let missing = [
                (ColumnRole::Date, date.is_none()),
                (ColumnRole::Category, category.is_none()),
                (ColumnRole::Value, value.is_none()),
            ]
            .into_iter()
            .filter_map(|(role, absent)| absent.then_some(role))
            .collect();
            let mut available: Vec<String> =
                columns.iter().map(|column| column.as_ref().to_owned()).collect();
            available.sort();
            ColumnMappingOutcome::Unmappable { missing, available }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_priority_prefers_date_over_value() {
        // "daycount" matches both the date and the value keywords.
        assert_eq!(role_for_name("DayCount"), Some(ColumnRole::Date));
        assert_eq!(role_for_name("Amount"), Some(ColumnRole::Value));
        assert_eq!(role_for_name("region"), None);
    }

    #[test]
    fn earliest_keyword_wins_within_a_role() {
        let outcome = resolve_column_mapping(&["month", "date", "name", "count"]);
        let mapping = outcome.into_result().expect("resolved");
        assert_eq!(mapping.date, "date");
        assert_eq!(mapping.category, "name");
        assert_eq!(mapping.value, "count");
    }

    #[test]
    fn unmappable_lists_missing_roles() {
        let outcome = resolve_column_mapping(&["year", "region", "n"]);
        assert_eq!(
            outcome,
            ColumnMappingOutcome::Unmappable {
                missing: vec![ColumnRole::Category, ColumnRole::Value],
                available: vec!["n".to_owned(), "region".to_owned(), "year".to_owned()],
            }
        );
    }
}
