//! Last-review date parsing and the future-date sanity filter
//!
//! Dates are stored as a naive polars `Datetime` column in milliseconds, so a
//! time of day in the source survives parsing. Cells that fail to parse become
//! null, the "no date" marker.

use std::borrow::Cow;

use anyhow::Result;
use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::debug;

use super::schema::{has_column, put_column, string_column};
use super::error::PipelineError;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

const DATETIME_TYPE: DataType = DataType::Datetime(TimeUnit::Milliseconds, None);

/// Milliseconds since the epoch behind a temporal series
fn millis(series: &Series) -> Result<Int64Chunked> {
    Ok(series.cast(&DATETIME_TYPE)?.cast(&DataType::Int64)?.i64()?.clone())
}

/// Parse text with every known format, keeping the first match per cell
fn parse_text(text: &StringChunked) -> Result<Series> {
    let text = text.apply_values(|s| Cow::Borrowed(s.trim()));
    let ambiguous = StringChunked::full("ambiguous".into(), "raise", text.len());
    let mut parsed = Int64Chunked::full_null(text.name().clone(), text.len());

    for &fmt in DATETIME_FORMATS {
        let attempt = text
            .as_datetime(Some(fmt), TimeUnit::Milliseconds, false, false, None, &ambiguous)?
            .into_series();
        parsed = parsed.zip_with(&parsed.is_not_null(), &millis(&attempt)?)?;
    }
    for &fmt in DATE_FORMATS {
        let attempt = text.as_date(Some(fmt), false)?.into_series();
        parsed = parsed.zip_with(&parsed.is_not_null(), &millis(&attempt)?)?;
    }

    Ok(parsed.into_series().cast(&DATETIME_TYPE)?)
}

/// Read a column as a millisecond `Datetime` series, parsing text when needed
fn datetime_column(df: &DataFrame, name: &str) -> Result<Series> {
    if !has_column(df, name) {
        return Err(PipelineError::ColumnNotFound(name.to_string()).into());
    }
    let column = df.column(name)?;

    match column.dtype() {
        DataType::Date | DataType::Datetime(_, _) => {
            Ok(column.as_materialized_series().cast(&DATETIME_TYPE)?)
        }
        _ => parse_text(&string_column(df, name)?),
    }
}

/// Read a column as naive date-times
pub fn datetime_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDateTime>>> {
    Ok(datetime_column(df, name)?.datetime()?.as_datetime_iter().collect())
}

/// Convert a column to `Datetime`. Returns how many present cells failed to parse.
pub fn parse_date_column(df: &mut DataFrame, name: &str) -> Result<usize> {
    let before = df.column(name)?.null_count();
    let parsed = datetime_column(df, name)?;
    let unparsed = parsed.null_count().saturating_sub(before);

    put_column(df, parsed)?;
    debug!(column = name, unparsed, "parsed date column");
    Ok(unparsed)
}

/// Clear every date strictly after `now`. Returns how many were cleared.
pub fn reset_future_dates(df: &mut DataFrame, name: &str, now: NaiveDateTime) -> Result<usize> {
    let stamps = millis(&datetime_column(df, name)?)?;
    let future = stamps.gt(now.and_utc().timestamp_millis());
    let reset = future.num_trues();

    let kept = stamps.set(&future, None)?.into_series().cast(&DATETIME_TYPE)?;
    put_column(df, kept)?;
    debug!(column = name, reset, %now, "cleared future dates");
    Ok(reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn parse(cells: &[Option<&str>]) -> Vec<Option<NaiveDateTime>> {
        let mut df = df! { "last review" => cells }.unwrap();
        parse_date_column(&mut df, "last review").unwrap();
        datetime_values(&df, "last review").unwrap()
    }

    #[test]
    fn test_parse_known_formats() {
        let midnight = at(2021, 10, 19, 0, 0);
        assert_eq!(
            parse(&[
                Some("10/19/2021"),
                Some("2021-10-19"),
                Some(" 2021/10/19 "),
                Some("19.10.2021"),
            ]),
            vec![Some(midnight); 4]
        );
    }

    #[test]
    fn test_parse_keeps_time_of_day() {
        assert_eq!(
            parse(&[Some("2021-10-19 08:30:00"), Some("10/19/2021 23:59")]),
            vec![Some(at(2021, 10, 19, 8, 30)), Some(at(2021, 10, 19, 23, 59))]
        );
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(
            parse(&[Some("not a date"), Some(""), Some("13/45/2021"), None]),
            vec![None; 4]
        );
    }
}
