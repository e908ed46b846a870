//! Missing value analysis, column/row dropping and imputation

use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

use super::schema::{float_column, put_column, string_column, ColumnRegistry};

/// Null count per column, in table order
pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}

/// Missing ratio per column, sorted descending
pub fn analyze_missing_values(df: &DataFrame) -> Vec<(String, f64)> {
    // Handle empty DataFrame
    if df.height() == 0 {
        return Vec::new();
    }

    let rows = df.height() as f64;
    let mut missing_ratios: Vec<(String, f64)> = missing_counts(df)
        .into_iter()
        .map(|(name, nulls)| (name, nulls as f64 / rows))
        .collect();

    missing_ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    missing_ratios
}

/// Columns too sparse to impute: ratio strictly above `threshold` and no registered role
pub fn select_sparse_columns(
    missing_ratios: &[(String, f64)],
    threshold: f64,
    registry: &ColumnRegistry,
) -> Vec<String> {
    missing_ratios
        .iter()
        .filter(|(name, ratio)| *ratio > threshold && !registry.contains(name))
        .map(|(name, _)| name.clone())
        .collect()
}

/// Remove rows where any of `columns` is missing. Returns the table and the rows removed.
pub fn drop_rows_missing(df: DataFrame, columns: &[String]) -> Result<(DataFrame, usize)> {
    let mut keep = BooleanChunked::full("keep".into(), true, df.height());
    for name in columns {
        keep = &keep & &float_column(&df, name)?.is_not_null();
    }

    let removed = df.height() - keep.num_trues();
    if removed == 0 {
        return Ok((df, 0));
    }

    Ok((df.filter(&keep)?, removed))
}

/// Fill gaps with the column median. Returns the fill value, `None` if the column is empty.
pub fn impute_numeric_median(df: &mut DataFrame, name: &str) -> Result<Option<f64>> {
    let ca = float_column(df, name)?;
    let fill = ca.median();

    match fill {
        Some(fill) => {
            put_column(df, ca.fill_null_with_values(fill)?.into_series())?;
            debug!(column = name, median = fill, "imputed numeric column");
        }
        None => put_column(df, ca.into_series())?,
    }

    Ok(fill)
}

/// Most frequent present value of a column; ties go to the smallest value
pub fn column_mode(df: &DataFrame, name: &str) -> Result<Option<String>> {
    let modes = string_column(df, name)?
        .into_series()
        .into_frame()
        .lazy()
        .select([col(name)
            .drop_nulls()
            .mode()
            .sort(SortOptions::default())
            .first()])
        .collect()?;

    Ok(modes.column(name)?.str()?.get(0).map(|s| s.to_string()))
}

/// Fill gaps with the column mode. Returns the fill value, `None` if the column is empty.
pub fn impute_categorical_mode(df: &mut DataFrame, name: &str) -> Result<Option<String>> {
    let fill = column_mode(df, name)?;

    if let Some(fill) = &fill {
        let ca = string_column(df, name)?;
        let filled: StringChunked = ca
            .iter()
            .map(|v| Some(v.unwrap_or(fill.as_str())))
            .collect::<StringChunked>()
            .with_name(ca.name().clone());
        put_column(df, filled.into_series())?;
        debug!(column = name, mode = fill.as_str(), "imputed categorical column");
    }

    Ok(fill)
}

/// Fill gaps with a constant. Returns how many cells were filled.
pub fn fill_missing_with(df: &mut DataFrame, name: &str, fill: f64) -> Result<usize> {
    let ca = float_column(df, name)?;
    let filled_count = ca.null_count();
    put_column(df, ca.fill_null_with_values(fill)?.into_series())?;
    Ok(filled_count)
}
