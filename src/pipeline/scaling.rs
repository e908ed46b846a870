//! Min-max normalization and standardization
//!
//! Each scaler is fit on the full table and applied in place, one set of
//! statistics per column. A column with zero range (or zero spread) keeps a
//! scale of 1 so its values map to 0 rather than NaN.

use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

use super::schema::{float_column, put_column};

/// Fitted parameters for one column: `scaled = (x - offset) / scale`
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleParams {
    pub column: String,
    pub offset: f64,
    pub scale: f64,
}

fn non_zero(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() {
        1.0
    } else {
        scale
    }
}

fn apply(df: &mut DataFrame, params: &ScaleParams, ca: &Float64Chunked) -> Result<()> {
    let scaled = (ca - params.offset) / params.scale;
    put_column(df, scaled.with_name(params.column.as_str().into()).into_series())
}

/// Rescale each column to [0, 1]
pub fn min_max_scale(df: &mut DataFrame, columns: &[String]) -> Result<Vec<ScaleParams>> {
    let mut fitted = Vec::with_capacity(columns.len());

    for name in columns {
        let ca = float_column(df, name)?;
        let (Some(min), Some(max)) = (ca.min(), ca.max()) else {
            continue;
        };

        let params = ScaleParams {
            column: name.clone(),
            offset: min,
            scale: non_zero(max - min),
        };
        apply(df, &params, &ca)?;
        debug!(column = name.as_str(), min, max, "min-max scaled");
        fitted.push(params);
    }

    Ok(fitted)
}

/// Rescale each column to zero mean and unit population variance
pub fn standardize(df: &mut DataFrame, columns: &[String]) -> Result<Vec<ScaleParams>> {
    let mut fitted = Vec::with_capacity(columns.len());

    for name in columns {
        let ca = float_column(df, name)?;
        let (Some(mean), Some(std)) = (ca.mean(), ca.std(0)) else {
            continue;
        };

        let params = ScaleParams {
            column: name.clone(),
            offset: mean,
            scale: non_zero(std),
        };
        apply(df, &params, &ca)?;
        debug!(column = name.as_str(), mean, std, "standardized");
        fitted.push(params);
    }

    Ok(fitted)
}
