//! Splitting compound currency + amount cells such as `"$1,234.50"`

use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

use super::config::PipelineConfig;
use super::schema::{put_column, string_values};

/// A compound cell split into its currency symbol and amount text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySplit {
    pub currency: String,
    /// Digits, `.` and `,` in their original order; `None` when the cell was missing
    pub amount: Option<String>,
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

/// Partition a cell into currency characters and amount characters.
///
/// A missing cell yields an empty currency and a missing amount.
pub fn split_currency(cell: Option<&str>) -> CurrencySplit {
    match cell {
        Some(text) => {
            let currency: String = text.chars().filter(|c| !is_amount_char(*c)).collect();
            let amount: String = text.chars().filter(|c| is_amount_char(*c)).collect();
            CurrencySplit {
                currency: currency.trim().to_string(),
                amount: Some(amount.trim().to_string()),
            }
        }
        None => CurrencySplit {
            currency: String::new(),
            amount: None,
        },
    }
}

/// Strip grouping commas and parse; anything unparseable is missing
pub fn parse_amount(amount: Option<&str>) -> Option<f64> {
    let cleaned = amount?.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Replace `source` with `<prefix>_currency` (text) and `<prefix>_value` (float).
///
/// Returns the number of present cells whose amount could not be parsed.
pub fn split_compound_column(df: DataFrame, source: &str, prefix: &str) -> Result<(DataFrame, usize)> {
    let cells = string_values(&df, source)?;

    let mut currencies = Vec::with_capacity(cells.len());
    let mut amounts = Vec::with_capacity(cells.len());
    let mut unparsed = 0usize;

    for cell in &cells {
        let split = split_currency(cell.as_deref());
        let value = parse_amount(split.amount.as_deref());
        if value.is_none() && cell.is_some() {
            unparsed += 1;
        }
        currencies.push(split.currency);
        amounts.push(value);
    }

    let mut df = df.drop(source)?;
    put_column(
        &mut df,
        Series::new(PipelineConfig::currency_column(prefix).as_str().into(), currencies),
    )?;
    put_column(
        &mut df,
        Series::new(PipelineConfig::value_column(prefix).as_str().into(), amounts),
    )?;

    debug!(column = source, unparsed, "split compound currency column");
    Ok((df, unparsed))
}
