//! Boolean normalization and one-hot encoding of nominal columns

use std::collections::BTreeSet;

use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

use super::schema::{float_values, put_column, string_values};

/// Map a flag cell to 1/0; anything other than true/false is missing
pub fn flag_value(text: &str) -> Option<i32> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Some(1),
        "false" => Some(0),
        _ => None,
    }
}

/// Convert a true/false column to Int32 0/1
pub fn normalize_flag_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let dtype = df.column(name)?.dtype().clone();

    let values: Vec<Option<i32>> = if dtype.is_primitive_numeric() {
        float_values(df, name)?
            .into_iter()
            .map(|v| match v {
                Some(x) if x == 1.0 => Some(1),
                Some(x) if x == 0.0 => Some(0),
                _ => None,
            })
            .collect()
    } else {
        // Boolean columns cast to "true"/"false" text
        string_values(df, name)?
            .iter()
            .map(|cell| cell.as_deref().and_then(flag_value))
            .collect()
    };

    put_column(df, Series::new(name.into(), values))
}

/// Cast every Boolean column to Int32. Returns the converted column names.
pub fn booleans_to_int(df: &mut DataFrame) -> Result<Vec<String>> {
    let boolean_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| matches!(col.dtype(), DataType::Boolean))
        .map(|col| col.name().to_string())
        .collect();

    for name in &boolean_columns {
        let converted = df.column(name)?.cast(&DataType::Int32)?;
        put_column(df, converted.as_materialized_series().clone())?;
    }

    Ok(boolean_columns)
}

/// Name of the indicator column for one category
pub fn indicator_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

/// Distinct present categories in sorted order
pub fn distinct_categories(values: &[Option<String>]) -> Vec<String> {
    values
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Replace `name` with one Boolean indicator column per observed category.
///
/// Missing cells produce all-false indicators. Returns the indicator names in
/// the order they were appended.
pub fn one_hot_encode(df: DataFrame, name: &str) -> Result<(DataFrame, Vec<String>)> {
    let values = string_values(&df, name)?;
    let categories = distinct_categories(&values);

    let mut df = df.drop(name)?;
    let mut indicators = Vec::with_capacity(categories.len());

    for category in &categories {
        let indicator = indicator_name(name, category);
        let flags: Vec<bool> = values
            .iter()
            .map(|v| v.as_deref() == Some(category.as_str()))
            .collect();
        put_column(&mut df, Series::new(indicator.as_str().into(), flags))?;
        indicators.push(indicator);
    }

    debug!(column = name, categories = categories.len(), "one-hot encoded column");
    Ok((df, indicators))
}
