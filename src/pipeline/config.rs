//! Named configuration for every threshold and column list the pipeline uses

use super::error::PipelineError;

/// Column names and thresholds driving each stage.
///
/// `Default` reproduces the reference analysis of the Airbnb open data
/// listings file exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Columns always dropped for near-total missingness
    pub high_missing_columns: Vec<String>,
    /// Unregistered columns whose missing ratio is strictly above this are dropped
    pub missing_threshold: f64,
    /// Rows missing any of these are removed
    pub coordinate_columns: Vec<String>,
    /// (source column, derived prefix) pairs split into currency and value
    pub compound_columns: Vec<(String, String)>,
    /// Filled with the column median
    pub numeric_impute_columns: Vec<String>,
    /// Filled with the column mode
    pub categorical_impute_columns: Vec<String>,
    /// Filled with zero
    pub zero_fill_columns: Vec<String>,
    /// Parsed into a date and cleared when in the future
    pub date_column: String,
    /// true/false text mapped to 1/0
    pub flag_column: String,
    /// Nominal columns expanded into indicator columns
    pub one_hot_columns: Vec<String>,
    /// Capped with the IQR rule, then min-max scaled
    pub iqr_columns: Vec<String>,
    pub iqr_multiplier: f64,
    /// Standardized to zero mean and unit variance
    pub standardize_columns: Vec<String>,
    /// Derived price target, the sum of the compound values
    pub target_column: String,
    /// Indicator columns of this source define correlation subgroups
    pub subgroup_column: String,
    pub top_n: usize,
    pub subgroup_top_n: usize,
    /// Fraction of rows sampled before cleaning; 1.0 keeps every row
    pub sample_fraction: f64,
    pub seed: u64,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            high_missing_columns: owned(&["house_rules", "license"]),
            missing_threshold: 0.5,
            coordinate_columns: owned(&["lat", "long"]),
            compound_columns: vec![
                ("price".to_string(), "price".to_string()),
                ("service fee".to_string(), "service_fee".to_string()),
            ],
            numeric_impute_columns: owned(&[
                "price_value",
                "service_fee_value",
                "minimum nights",
                "number of reviews",
                "review rate number",
                "calculated host listings count",
                "availability 365",
                "Construction year",
            ]),
            categorical_impute_columns: owned(&[
                "NAME",
                "host_identity_verified",
                "host name",
                "neighbourhood group",
                "neighbourhood",
                "country",
                "country code",
                "instant_bookable",
                "cancellation_policy",
            ]),
            zero_fill_columns: owned(&["reviews per month"]),
            date_column: "last review".to_string(),
            flag_column: "instant_bookable".to_string(),
            one_hot_columns: owned(&[
                "host_identity_verified",
                "neighbourhood group",
                "cancellation_policy",
                "room type",
            ]),
            iqr_columns: owned(&[
                "minimum nights",
                "number of reviews",
                "calculated host listings count",
                "reviews per month",
            ]),
            iqr_multiplier: 1.5,
            standardize_columns: owned(&["total_price", "availability 365"]),
            target_column: "total_price".to_string(),
            subgroup_column: "neighbourhood group".to_string(),
            top_n: 10,
            subgroup_top_n: 5,
            sample_fraction: 1.0,
            seed: 42,
        }
    }
}

impl PipelineConfig {
    /// Name of the derived value column for a compound prefix
    pub fn value_column(prefix: &str) -> String {
        format!("{}_value", prefix)
    }

    /// Name of the derived currency column for a compound prefix
    pub fn currency_column(prefix: &str) -> String {
        format!("{}_currency", prefix)
    }

    /// Columns inspected for skewness and kurtosis before capping
    pub fn shape_columns(&self) -> Vec<String> {
        let mut columns = vec![self.target_column.clone()];
        for col in self.iqr_columns.iter().chain(&self.standardize_columns) {
            if !columns.contains(col) {
                columns.push(col.clone());
            }
        }
        columns
    }

    /// Check ranges that clap validators cannot see when the config is built in code
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.missing_threshold) {
            return Err(PipelineError::InvalidConfig(format!(
                "missing_threshold must be between 0.0 and 1.0, got {}",
                self.missing_threshold
            )));
        }
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "sample_fraction must be in (0.0, 1.0], got {}",
                self.sample_fraction
            )));
        }
        if self.iqr_multiplier <= 0.0 || !self.iqr_multiplier.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "iqr_multiplier must be a positive number, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}
