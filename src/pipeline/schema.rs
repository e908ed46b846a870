//! Typed column registry and column access helpers
//!
//! The raw CSV has loosely typed cells. Every column the pipeline touches is
//! registered here with its semantic role. The helpers below read columns as
//! `Float64Chunked` / `StringChunked` (or plain `Option` vectors), where null
//! is the missing marker.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::config::PipelineConfig;
use super::error::PipelineError;

/// Semantic role of a raw input column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Free text, mode-imputed and kept as-is
    Text,
    /// Nominal category, mode-imputed where configured and one-hot encoded
    Categorical,
    /// Numeric measurement
    Numeric,
    /// true/false text mapped to 0/1
    Flag,
    Date,
    /// Latitude / longitude; rows without them are dropped
    Coordinate,
    /// Currency symbol concatenated with an amount
    Compound,
}

/// Ordered mapping from raw column name to its role
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    entries: Vec<(String, ColumnRole)>,
}

impl ColumnRegistry {
    /// Register every raw column the configuration refers to.
    ///
    /// Derived columns (`price_value`, `total_price`, ...) are not part of the
    /// raw schema and are skipped; the first role assigned to a name wins.
    pub fn from_config(cfg: &PipelineConfig) -> Self {
        let mut registry = Self::default();
        let derived: Vec<String> = cfg
            .compound_columns
            .iter()
            .flat_map(|(_, prefix)| {
                [
                    PipelineConfig::value_column(prefix),
                    PipelineConfig::currency_column(prefix),
                ]
            })
            .chain(std::iter::once(cfg.target_column.clone()))
            .collect();

        for (source, _) in &cfg.compound_columns {
            registry.insert(source, ColumnRole::Compound);
        }
        for name in &cfg.coordinate_columns {
            registry.insert(name, ColumnRole::Coordinate);
        }
        registry.insert(&cfg.date_column, ColumnRole::Date);
        registry.insert(&cfg.flag_column, ColumnRole::Flag);
        for name in &cfg.one_hot_columns {
            registry.insert(name, ColumnRole::Categorical);
        }
        for name in &cfg.categorical_impute_columns {
            registry.insert(name, ColumnRole::Text);
        }
        for name in cfg
            .numeric_impute_columns
            .iter()
            .chain(&cfg.zero_fill_columns)
            .chain(&cfg.iqr_columns)
            .chain(&cfg.standardize_columns)
        {
            if !derived.contains(name) {
                registry.insert(name, ColumnRole::Numeric);
            }
        }

        registry
    }

    fn insert(&mut self, name: &str, role: ColumnRole) {
        if self.role(name).is_none() {
            self.entries.push((name.to_string(), role));
        }
    }

    pub fn role(&self, name: &str) -> Option<ColumnRole> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, role)| *role)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.role(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fail with every registered column that the table lacks
    pub fn validate(&self, df: &DataFrame) -> Result<(), PipelineError> {
        let present = column_names(df);
        let missing: Vec<String> = self
            .names()
            .filter(|name| !present.iter().any(|p| p == name))
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::MissingColumns(missing))
        }
    }
}

/// Column names in table order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

fn require<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    if !has_column(df, name) {
        return Err(PipelineError::ColumnNotFound(name.to_string()).into());
    }
    Ok(df.column(name)?)
}

/// Read a column as a `Float64` array; NaN and cells that cannot be cast become null
pub fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = require(df, name)?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numbers", name))?;
    let ca: Float64Chunked = column.f64()?.iter().map(|v| v.filter(|x| !x.is_nan())).collect();
    Ok(ca.with_name(name.into()))
}

/// Read a column as a `String` array
pub fn string_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = require(df, name)?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", name))?;
    Ok(column.str()?.clone())
}

/// Read a column as floats; cells that cannot be cast become `None`
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(float_column(df, name)?.iter().collect())
}

/// Read a column as text
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let values = string_column(df, name)?
        .iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();
    Ok(values)
}

/// Insert or replace a column, keeping its position when it already exists
pub fn put_column(df: &mut DataFrame, series: Series) -> Result<()> {
    let name = series.name().to_string();
    df.with_column(series)
        .with_context(|| format!("Failed to write column '{}'", name))?;
    Ok(())
}

/// Drop the named columns that exist, ignoring the rest
pub fn drop_present(df: DataFrame, names: &[String]) -> DataFrame {
    let present: Vec<&str> = names
        .iter()
        .map(|s| s.as_str())
        .filter(|name| has_column(&df, name))
        .collect();
    if present.is_empty() {
        df
    } else {
        df.drop_many(present)
    }
}

/// Listing of `(column, dtype)` pairs in table order
pub fn dtype_listing(df: &DataFrame) -> Vec<(String, String)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.dtype().to_string()))
        .collect()
}
