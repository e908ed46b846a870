//! Outlier capping with the interquartile range rule

use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

use super::schema::{float_column, put_column};

/// Quartiles and the clipping bounds derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct IqrBounds {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
    /// Values moved to a bound
    pub capped: usize,
}

impl IqrBounds {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Bounds `Q1 - k·IQR` and `Q3 + k·IQR` over present values, as `(q1, q3, lower, upper)`
pub fn iqr_bounds(ca: &Float64Chunked, multiplier: f64) -> Result<Option<(f64, f64, f64, f64)>> {
    let q1 = ca.quantile(0.25, QuantileMethod::Linear)?;
    let q3 = ca.quantile(0.75, QuantileMethod::Linear)?;
    let (Some(q1), Some(q3)) = (q1, q3) else {
        return Ok(None);
    };
    let iqr = q3 - q1;
    Ok(Some((q1, q3, q1 - multiplier * iqr, q3 + multiplier * iqr)))
}

/// Clip a column into its IQR bounds in place.
///
/// Missing values stay missing. Returns `None` when the column has no values.
pub fn cap_outliers_iqr(df: &mut DataFrame, name: &str, multiplier: f64) -> Result<Option<IqrBounds>> {
    let ca = float_column(df, name)?;
    let Some((q1, q3, lower, upper)) = iqr_bounds(&ca, multiplier)? else {
        return Ok(None);
    };

    let capped = ca.gt(upper).num_trues() + ca.lt(lower).num_trues();

    let clipped = ca
        .into_series()
        .into_frame()
        .lazy()
        .select([when(col(name).gt(lit(upper)))
            .then(lit(upper))
            .when(col(name).lt(lit(lower)))
            .then(lit(lower))
            .otherwise(col(name))
            .alias(name)])
        .collect()?;

    put_column(df, clipped.column(name)?.as_materialized_series().clone())?;
    debug!(column = name, lower, upper, capped, "capped outliers");

    Ok(Some(IqrBounds {
        column: name.to_string(),
        q1,
        q3,
        lower,
        upper,
        capped,
    }))
}
