//! Exact duplicate row removal

use anyhow::Result;
use polars::prelude::*;

/// Drop rows identical in every column, keeping the first occurrence in order
pub fn drop_duplicate_rows(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let unique = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let removed = before - unique.height();
    Ok((unique, removed))
}

/// Number of rows that repeat an earlier row
pub fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
    let (_, removed) = drop_duplicate_rows(df.clone())?;
    Ok(removed)
}
