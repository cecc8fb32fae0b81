use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::{ChartDefaults, NormalizeOptions, NumericPolicy, TipMode};
use crate::error::{StreamGraphError, StreamGraphResult};

/// Standalone-mode settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StandaloneConfig {
    /// Candidate sample files, tried in order.
    pub sample_data_paths: Vec<PathBuf>,
    /// Replaces `defaults.tip` for standalone renders.
    pub tip: Option<TipMode>,
}

impl Default for StandaloneConfig {
    fn default() -> Self {
        Self {
            sample_data_paths: vec![PathBuf::from("./data/babynames.csv")],
            tip: Some(TipMode::Custom),
        }
    }
}

/// Top-level configuration file.
///
/// Every section is optional; a partial file keeps the defaults for the
/// rest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamGraphConfig {
    pub defaults: ChartDefaults,
    pub numeric_policy: NumericPolicy,
    pub standalone: StandaloneConfig,
}

impl StreamGraphConfig {
    #[must_use]
    pub fn with_defaults(mut self, defaults: ChartDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_numeric_policy(mut self, numeric_policy: NumericPolicy) -> Self {
        self.numeric_policy = numeric_policy;
        self
    }

    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions::default().with_numeric_policy(self.numeric_policy)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> StreamGraphResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StreamGraphError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> StreamGraphResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| StreamGraphError::InvalidData(format!("failed to parse config: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> StreamGraphResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
