//! Derived target column

use anyhow::Result;
use polars::prelude::*;

use super::schema::{float_values, put_column};

/// Add `target` as the row-wise sum of `inputs` and remove the inputs.
///
/// A row missing any input gets a missing target.
pub fn derive_sum_column(df: DataFrame, inputs: &[String], target: &str) -> Result<DataFrame> {
    let mut total: Vec<Option<f64>> = vec![Some(0.0); df.height()];
    for name in inputs {
        for (acc, value) in total.iter_mut().zip(float_values(&df, name)?) {
            *acc = match (*acc, value) {
                (Some(a), Some(v)) => Some(a + v),
                _ => None,
            };
        }
    }

    let mut df = df.drop_many(inputs.iter().map(|s| s.as_str()));
    put_column(&mut df, Series::new(target.into(), total))?;
    Ok(df)
}
