use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// OptionsError
///

#[derive(Debug, ThisError)]
pub enum OptionsError {
    #[error("invalid evaluation options: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// TrackingMode
/// Change-tracking hint forwarded to the query source.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// Leave tracking to the source's default.
    #[default]
    SourceDefault,
    Tracked,
    Untracked,
}

///
/// EvaluationOptions
///
/// Hints handed to the query source before any stage runs. Only
/// `stable_sort_by_id_when_missing` changes what the evaluator itself does.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EvaluationOptions {
    pub tracking: TrackingMode,
    pub split_query: bool,
    pub ignore_query_filters: bool,
    pub stable_sort_by_id_when_missing: bool,
    pub identity_resolution: bool,
    pub tag: Option<String>,
}

impl EvaluationOptions {
    /// Parse options from a TOML document; missing keys take defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(input)?)
    }

    #[must_use]
    pub const fn with_tracking(mut self, tracking: TrackingMode) -> Self {
        self.tracking = tracking;
        self
    }

    #[must_use]
    pub const fn with_split_query(mut self, split_query: bool) -> Self {
        self.split_query = split_query;
        self
    }

    #[must_use]
    pub const fn with_ignore_query_filters(mut self, ignore: bool) -> Self {
        self.ignore_query_filters = ignore;
        self
    }

    /// Order by the entity identity when a specification has no sort.
    #[must_use]
    pub const fn with_stable_sort_by_id(mut self, enabled: bool) -> Self {
        self.stable_sort_by_id_when_missing = enabled;
        self
    }

    #[must_use]
    pub const fn with_identity_resolution(mut self, enabled: bool) -> Self {
        self.identity_resolution = enabled;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}
