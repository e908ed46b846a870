//! Distribution shape of the scaling candidates

use anyhow::Result;
use polars::prelude::*;

use super::schema::{float_column, has_column};

/// Skewness and excess kurtosis of one column
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionShape {
    pub column: String,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

impl DistributionShape {
    /// Heavy tails or strong asymmetry; such columns suit min-max scaling after capping
    pub fn is_skewed(&self) -> bool {
        self.skewness.map(|s| s.abs() > 1.0).unwrap_or(false)
            || self.kurtosis.map(|k| k > 3.0).unwrap_or(false)
    }
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Shape statistics for the named columns that exist in the table.
///
/// Skewness is the bias-corrected G1 (needs three values) and kurtosis the
/// bias-corrected excess G2 (needs four). A constant column has shape 0.
pub fn distribution_shapes(df: &DataFrame, columns: &[String]) -> Result<Vec<DistributionShape>> {
    let mut shapes = Vec::with_capacity(columns.len());
    for name in columns.iter().filter(|name| has_column(df, name)) {
        let series = float_column(df, name)?.into_series().drop_nulls();
        let skewness = match series.len() {
            n if n >= 3 => series.skew(false)?.map(zero_if_nan),
            _ => None,
        };
        let kurtosis = match series.len() {
            n if n >= 4 => series.kurtosis(true, false)?.map(zero_if_nan),
            _ => None,
        };
        shapes.push(DistributionShape {
            column: name.clone(),
            skewness,
            kurtosis,
        });
    }
    Ok(shapes)
}
