use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categorical color schemes offered by the style panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Category10,
    Tableau10,
    Set1,
    Set2,
    Paired,
}

const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];
const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];
const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];
const PAIRED: &[&str] = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

impl ColorScheme {
    pub const ALL: [Self; 5] = [
        Self::Category10,
        Self::Tableau10,
        Self::Set1,
        Self::Set2,
        Self::Paired,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category10 => "category10",
            Self::Tableau10 => "tableau10",
            Self::Set1 => "set1",
            Self::Set2 => "set2",
            Self::Paired => "paired",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Category10 => "Category 10",
            Self::Tableau10 => "Tableau 10",
            Self::Set1 => "Set 1",
            Self::Set2 => "Set 2",
            Self::Paired => "Paired",
        }
    }

    #[must_use]
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            Self::Category10 => CATEGORY10,
            Self::Tableau10 => TABLEAU10,
            Self::Set1 => SET1,
            Self::Set2 => SET2,
            Self::Paired => PAIRED,
        }
    }

    /// Hex color for the category at `index` in category order; wraps around.
    #[must_use]
    pub fn color_at(self, index: usize) -> &'static str {
        let colors = self.colors();
        colors[index % colors.len()]
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown color scheme `{s}`"))
    }
}
