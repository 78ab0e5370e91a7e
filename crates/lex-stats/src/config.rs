//! Configuration types for dataset analysis.
//!
//! Everything the analysis depends on (sample window, classification
//! threshold, which key lists to group by) is passed in explicitly through
//! [`AnalysisConfig`], built with the builder pattern.

use serde::{Deserialize, Serialize};

/// Default number of leading rows inspected by the type classifier.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Default share of numeric cells (among non-empty sampled cells) above which
/// a column is classified as numeric.
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.8;

/// Default cap on groups that receive a full statistics map.
pub const DEFAULT_MAX_DETAILED_GROUPS: usize = 100;

/// Default number of entries in the "largest groups" ranking.
pub const DEFAULT_LARGEST_GROUPS_LIMIT: usize = 20;

/// Key lists used for the advertising report: per page, then per page and ad.
pub fn default_groupings() -> Vec<Vec<String>> {
    vec![
        vec!["page_id".to_string()],
        vec!["page_id".to_string(), "ad_id".to_string()],
    ]
}

/// Configuration for a dataset analysis run.
///
/// Use [`AnalysisConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_stats::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .sample_size(500)
///     .numeric_threshold(0.9)
///     .grouping(["page_id"])
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of leading rows sampled for type classification.
    /// Default: 100
    pub sample_size: usize,

    /// Numeric share a column must strictly exceed to be classified numeric.
    /// Default: 0.8 (80%)
    pub numeric_threshold: f64,

    /// Key lists to group by, in report order. A key list whose columns are
    /// missing from the dataset is skipped.
    /// Default: `[["page_id"], ["page_id", "ad_id"]]`
    pub groupings: Vec<Vec<String>>,

    /// Only the first `max_detailed_groups` groups (discovery order) of each
    /// grouping get a full statistics map; the rest count towards group sizes.
    /// Default: 100
    pub max_detailed_groups: usize,

    /// Length of the "largest groups" ranking.
    /// Default: 20
    pub largest_groups_limit: usize,

    /// Compute columns and groups on the rayon thread pool.
    /// Default: true
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
            groupings: default_groupings(),
            max_detailed_groups: DEFAULT_MAX_DETAILED_GROUPS,
            largest_groups_limit: DEFAULT_LARGEST_GROUPS_LIMIT,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(self.sample_size));
        }

        if !(0.0..1.0).contains(&self.numeric_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "numeric_threshold".to_string(),
                value: self.numeric_threshold,
            });
        }

        if let Some(index) = self.groupings.iter().position(|keys| keys.is_empty()) {
            return Err(ConfigValidationError::EmptyGrouping(index));
        }

        if let Some(keys) = self
            .groupings
            .iter()
            .find(|keys| keys.iter().any(|key| key.trim().is_empty()))
        {
            return Err(ConfigValidationError::BlankGroupingKey(keys.clone()));
        }

        if self.largest_groups_limit == 0 {
            return Err(ConfigValidationError::InvalidLimit {
                field: "largest_groups_limit".to_string(),
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),

    #[error("Invalid threshold for '{field}': {value} (must be in [0.0, 1.0))")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Grouping #{0} has no key columns")]
    EmptyGrouping(usize),

    #[error("Grouping {0:?} contains a blank column name")]
    BlankGroupingKey(Vec<String>),

    #[error("Invalid value for '{field}': must be at least 1")]
    InvalidLimit { field: String },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    sample_size: Option<usize>,
    numeric_threshold: Option<f64>,
    groupings: Option<Vec<Vec<String>>>,
    max_detailed_groups: Option<usize>,
    largest_groups_limit: Option<usize>,
    parallel: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set how many leading rows the type classifier inspects.
    pub fn sample_size(mut self, rows: usize) -> Self {
        self.sample_size = Some(rows);
        self
    }

    /// Set the numeric classification threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value in [0.0, 1.0) (e.g., 0.8 = more than 80% numeric)
    pub fn numeric_threshold(mut self, threshold: f64) -> Self {
        self.numeric_threshold = Some(threshold);
        self
    }

    /// Append one grouping key list. The first call replaces the defaults.
    pub fn grouping<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groupings
            .get_or_insert_with(Vec::new)
            .push(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Replace all grouping key lists. An empty list disables grouping.
    pub fn groupings(mut self, groupings: Vec<Vec<String>>) -> Self {
        self.groupings = Some(groupings);
        self
    }

    /// Set how many groups per grouping get a full statistics map.
    pub fn max_detailed_groups(mut self, groups: usize) -> Self {
        self.max_detailed_groups = Some(groups);
        self
    }

    /// Set the length of the "largest groups" ranking.
    pub fn largest_groups_limit(mut self, limit: usize) -> Self {
        self.largest_groups_limit = Some(limit);
        self
    }

    /// Enable or disable rayon-based parallel computation.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            sample_size: self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            numeric_threshold: self.numeric_threshold.unwrap_or(DEFAULT_NUMERIC_THRESHOLD),
            groupings: self.groupings.unwrap_or_else(default_groupings),
            max_detailed_groups: self
                .max_detailed_groups
                .unwrap_or(DEFAULT_MAX_DETAILED_GROUPS),
            largest_groups_limit: self
                .largest_groups_limit
                .unwrap_or(DEFAULT_LARGEST_GROUPS_LIMIT),
            parallel: self.parallel.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
