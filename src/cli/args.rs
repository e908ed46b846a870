//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::PipelineConfig;

/// Rentcorr - clean a rental listings CSV and rank what correlates with total price
#[derive(Parser, Debug)]
#[command(name = "rentcorr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Listings CSV file, or a directory whose first .csv file (by name) is used
    #[arg(short, long)]
    pub input: PathBuf,

    /// Drop columns without a known role whose missing ratio is above this value
    #[arg(long, default_value = "0.5", value_parser = validate_ratio)]
    pub missing_threshold: f64,

    /// Number of features in the overall correlation ranking
    #[arg(long, default_value = "10")]
    pub top_n: usize,

    /// Number of features in each subgroup ranking
    #[arg(long, default_value = "5")]
    pub subgroup_top_n: usize,

    /// IQR multiplier for outlier bounds (Q1 - k·IQR, Q3 + k·IQR)
    #[arg(long, default_value = "1.5", value_parser = validate_positive)]
    pub iqr_multiplier: f64,

    /// Fraction of rows to sample before cleaning (1.0 keeps every row)
    #[arg(long, default_value = "1.0", value_parser = validate_fraction)]
    pub sample_fraction: f64,

    /// Random seed for row sampling
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Default pipeline configuration with the command-line overrides applied
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            missing_threshold: self.missing_threshold,
            top_n: self.top_n,
            subgroup_top_n: self.subgroup_top_n,
            iqr_multiplier: self.iqr_multiplier,
            sample_fraction: self.sample_fraction,
            seed: self.seed,
            ..Default::default()
        }
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not a valid number", s))
}

/// Validator for ratios in [0, 1]
fn validate_ratio(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!("value must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for fractions in (0, 1]
fn validate_fraction(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("fraction must be in (0.0, 1.0], got {}", value))
    }
}

/// Validator for strictly positive numbers
fn validate_positive(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("value must be a positive number, got {}", value))
    }
}
