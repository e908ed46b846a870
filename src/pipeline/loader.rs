//! Locating and loading the listings CSV

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::PipelineError;

fn is_csv(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
}

/// First `.csv` file in `dir`, by file name order
pub fn find_csv_file(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_csv(path))
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::NoCsvFile(dir.to_path_buf()).into())
}

/// Accept either a CSV file or a directory containing one
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        find_csv_file(path)
    } else if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        anyhow::bail!("Input path does not exist: {}", path.display())
    }
}

/// Load a CSV into memory, returning the table, its shape and estimated size in MB.
///
/// `infer_schema_length` of 0 scans the whole file for type inference.
pub fn load_listings(path: &Path, infer_schema_length: usize) -> Result<(DataFrame, usize, usize, f64)> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(schema_length)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    Ok((df, rows, cols, memory_mb))
}

/// Sample a fraction of rows without replacement; a fraction of 1.0 is a no-op
pub fn sample_rows(df: DataFrame, fraction: f64, seed: u64) -> Result<DataFrame> {
    if fraction >= 1.0 {
        return Ok(df);
    }
    let frac = Series::new("frac".into(), &[fraction]);
    let sampled = df
        .sample_frac(&frac, false, false, Some(seed))
        .context("Failed to sample rows")?;
    Ok(sampled)
}
