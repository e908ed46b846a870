//! Correlation matrix and target rankings, overall and per subgroup

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

use super::error::PipelineError;
use super::schema::{float_values, has_column};

/// Direction of a correlation coefficient.
///
/// Zero counts as `Positive`: the label follows `coefficient >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationSign {
    Positive,
    Negative,
}

impl CorrelationSign {
    pub fn of(coefficient: f64) -> Self {
        if coefficient >= 0.0 {
            CorrelationSign::Positive
        } else {
            CorrelationSign::Negative
        }
    }
}

impl std::fmt::Display for CorrelationSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationSign::Positive => write!(f, "Positive"),
            CorrelationSign::Negative => write!(f, "Negative"),
        }
    }
}

/// One feature's association with the target
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCorrelation {
    pub feature: String,
    pub correlation: f64,
}

impl TargetCorrelation {
    pub fn sign(&self) -> CorrelationSign {
        CorrelationSign::of(self.correlation)
    }
}

/// Ranking restricted to the rows of one indicator column
#[derive(Debug, Clone)]
pub struct SubgroupCorrelations {
    /// Category value, the indicator name without its source prefix
    pub group: String,
    pub indicator: String,
    pub rows: usize,
    pub correlations: Vec<TargetCorrelation>,
}

/// Full symmetric Pearson matrix over the numeric columns.
///
/// Undefined coefficients (constant or empty columns) are NaN.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Mat<f64>,
}

impl CorrelationMatrix {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[(self.index_of(a)?, self.index_of(b)?)])
    }

    /// Coefficients of every other column against `name`, in column order
    pub fn row(&self, name: &str) -> Option<Vec<(String, f64)>> {
        let i = self.index_of(name)?;
        Some(
            self.columns
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(j, col)| (col.clone(), self.values[(i, j)]))
                .collect(),
        )
    }
}

/// Pearson correlation over rows where both values are present.
///
/// Returns `None` with fewer than two complete rows or when either side is
/// constant, where the coefficient is undefined.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Names of numeric columns (integer and float; booleans must be converted first)
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}

/// Pairwise-complete Pearson correlation between every pair of numeric columns
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_columns(df);
    let n = columns.len();

    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| float_values(df, name))
        .collect::<Result<_>>()?;

    // Upper triangle, evaluated in parallel
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| (i, j, pearson(&data[i], &data[j]).unwrap_or(f64::NAN)))
        .collect();

    let mut values = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        let defined = pearson(&data[i], &data[i]).is_some();
        values[(i, i)] = if defined { 1.0 } else { f64::NAN };
    }
    for (i, j, c) in coefficients {
        values[(i, j)] = c;
        values[(j, i)] = c;
    }

    Ok(CorrelationMatrix { columns, values })
}

/// Sort by absolute coefficient descending, dropping undefined ones
fn rank(mut entries: Vec<(String, f64)>, top_n: usize) -> Vec<TargetCorrelation> {
    entries.retain(|(_, c)| !c.is_nan());
    entries.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
        .into_iter()
        .take(top_n)
        .map(|(feature, correlation)| TargetCorrelation {
            feature,
            correlation,
        })
        .collect()
}

fn check_target(df: &DataFrame, target: &str) -> Result<()> {
    if !has_column(df, target) {
        return Err(PipelineError::ColumnNotFound(target.to_string()).into());
    }
    let dtype = df.column(target)?.dtype();
    if !dtype.is_primitive_numeric() {
        return Err(PipelineError::NonNumericTarget {
            column: target.to_string(),
            dtype: dtype.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Top `top_n` features by absolute correlation with `target`, self excluded
pub fn rank_target_correlations(
    df: &DataFrame,
    target: &str,
    top_n: usize,
) -> Result<Vec<TargetCorrelation>> {
    check_target(df, target)?;
    let matrix = correlation_matrix(df)?;
    let row = matrix.row(target).unwrap_or_default();
    Ok(rank(row, top_n))
}

/// Indicator columns produced from `source` by one-hot encoding, in table order
pub fn indicator_columns(df: &DataFrame, source: &str) -> Vec<String> {
    let prefix = format!("{}_", source);
    df.get_column_names()
        .iter()
        .filter(|name| name.as_str().starts_with(prefix.as_str()))
        .map(|name| name.to_string())
        .collect()
}

/// Repeat the target ranking within the rows of each `source` indicator.
///
/// Subgroups whose ranking comes out empty are skipped.
pub fn rank_subgroup_correlations(
    df: &DataFrame,
    target: &str,
    source: &str,
    top_n: usize,
) -> Result<Vec<SubgroupCorrelations>> {
    check_target(df, target)?;
    let prefix = format!("{}_", source);
    let mut subgroups = Vec::new();

    for indicator in indicator_columns(df, source) {
        let mask: Vec<bool> = float_values(df, &indicator)?
            .iter()
            .map(|v| *v == Some(1.0))
            .collect();
        let group_df = df.filter(&BooleanChunked::from_slice("group".into(), &mask))?;
        if group_df.height() == 0 {
            continue;
        }

        let correlations = rank_target_correlations(&group_df, target, top_n)?;
        if correlations.is_empty() {
            continue;
        }

        subgroups.push(SubgroupCorrelations {
            group: indicator
                .strip_prefix(prefix.as_str())
                .unwrap_or(&indicator)
                .to_string(),
            rows: group_df.height(),
            indicator,
            correlations,
        });
    }

    Ok(subgroups)
}
