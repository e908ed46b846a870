//! Tests for encoding, outlier capping, scaling and distribution shape

use polars::prelude::*;
use rentcorr::pipeline::{
    booleans_to_int, cap_outliers_iqr, derive_sum_column, distribution_shapes, iqr_bounds,
    min_max_scale, normalize_flag_column, one_hot_encode, standardize,
};

#[path = "common/mod.rs"]
mod common;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_normalize_flag_column_from_text() {
    let mut df = df! {
        "instant_bookable" => [Some("TRUE"), Some("false"), None, Some("True")],
    }
    .unwrap();

    normalize_flag_column(&mut df, "instant_bookable").unwrap();

    let col = df.column("instant_bookable").unwrap();
    assert_eq!(col.dtype(), &DataType::Int32);
    let values: Vec<Option<i32>> = col.i32().unwrap().iter().collect();
    assert_eq!(values, vec![Some(1), Some(0), None, Some(1)]);
}

#[test]
fn test_normalize_flag_column_from_boolean() {
    let mut df = df! {
        "instant_bookable" => [true, false, true],
    }
    .unwrap();

    normalize_flag_column(&mut df, "instant_bookable").unwrap();

    let values: Vec<Option<i32>> = df
        .column("instant_bookable")
        .unwrap()
        .i32()
        .unwrap()
        .iter()
        .collect();
    assert_eq!(values, vec![Some(1), Some(0), Some(1)]);
}

#[test]
fn test_one_hot_rows_have_exactly_one_indicator() {
    let df = df! {
        "id" => [1i64, 2, 3, 4],
        "room type" => [Some("Private room"), None, Some("Entire home/apt"), Some("Private room")],
    }
    .unwrap();

    let (mut df, indicators) = one_hot_encode(df, "room type").unwrap();

    assert_eq!(
        indicators,
        vec!["room type_Entire home/apt", "room type_Private room"]
    );
    common::assert_missing_columns(&df, &["room type"]);
    assert!(matches!(
        df.column("room type_Private room").unwrap().dtype(),
        DataType::Boolean
    ));

    let converted = booleans_to_int(&mut df).unwrap();
    assert_eq!(converted, indicators);

    let private = common::floats(&df, "room type_Private room");
    let entire = common::floats(&df, "room type_Entire home/apt");
    let sums: Vec<f64> = private
        .iter()
        .zip(&entire)
        .map(|(a, b)| a.unwrap() + b.unwrap())
        .collect();

    // The missing row is all zeros, every other row has exactly one 1
    assert_eq!(sums, vec![1.0, 0.0, 1.0, 1.0]);
    assert_eq!(private, vec![Some(1.0), Some(0.0), Some(0.0), Some(1.0)]);
}

#[test]
fn test_booleans_to_int_leaves_other_columns() {
    let mut df = df! {
        "flag" => [true, false],
        "value" => [1.5f64, 2.5],
    }
    .unwrap();

    let converted = booleans_to_int(&mut df).unwrap();

    assert_eq!(converted, vec!["flag"]);
    assert_eq!(df.column("flag").unwrap().dtype(), &DataType::Int32);
    assert_eq!(df.column("value").unwrap().dtype(), &DataType::Float64);
}

// ============================================================================
// Derived target
// ============================================================================

#[test]
fn test_derive_sum_column_from_split_values() {
    let df = df! {
        "price_value" => [Some(1020.0f64), Some(350.0), None],
        "service_fee_value" => [Some(204.0f64), Some(70.0), Some(10.0)],
    }
    .unwrap();

    let df = derive_sum_column(
        df,
        &names(&["price_value", "service_fee_value"]),
        "total_price",
    )
    .unwrap();

    common::assert_shape(&df, 3, 1);
    assert_eq!(
        common::floats(&df, "total_price"),
        vec![Some(1224.0), Some(420.0), None]
    );
}

// ============================================================================
// Outliers
// ============================================================================

#[test]
fn test_iqr_bounds_linear_interpolation() {
    let values = Float64Chunked::from_slice("x".into(), &[1.0, 2.0, 3.0, 4.0, 100.0]);
    let (q1, q3, lower, upper) = iqr_bounds(&values, 1.5).unwrap().unwrap();

    assert_eq!(q1, 2.0);
    assert_eq!(q3, 4.0);
    assert_eq!(lower, -1.0);
    assert_eq!(upper, 7.0);
}

#[test]
fn test_cap_outliers_iqr_clips_into_bounds() {
    let mut df = df! {
        "number of reviews" => [Some(1.0f64), Some(2.0), None, Some(3.0), Some(4.0), Some(100.0)],
    }
    .unwrap();

    let bounds = cap_outliers_iqr(&mut df, "number of reviews", 1.5)
        .unwrap()
        .unwrap();

    assert_eq!(bounds.capped, 1);
    assert_eq!(bounds.iqr(), 2.0);
    let values = common::floats(&df, "number of reviews");
    assert_eq!(
        values,
        vec![Some(1.0), Some(2.0), None, Some(3.0), Some(4.0), Some(7.0)]
    );
    assert!(values
        .iter()
        .flatten()
        .all(|v| *v >= bounds.lower && *v <= bounds.upper));
}

#[test]
fn test_cap_outliers_empty_column_is_skipped() {
    let mut df = df! { "x" => [None::<f64>, None] }.unwrap();
    assert!(cap_outliers_iqr(&mut df, "x", 1.5).unwrap().is_none());
}

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_min_max_scale_to_unit_range() {
    let mut df = df! {
        "minimum nights" => [Some(1.0f64), Some(5.0), None, Some(9.0)],
        "constant" => [3.0f64, 3.0, 3.0, 3.0],
    }
    .unwrap();

    let fitted = min_max_scale(&mut df, &names(&["minimum nights", "constant"])).unwrap();

    assert_eq!(fitted.len(), 2);
    assert_eq!(
        common::floats(&df, "minimum nights"),
        vec![Some(0.0), Some(0.5), None, Some(1.0)]
    );
    // Zero range maps to 0 rather than NaN
    assert_eq!(common::floats(&df, "constant"), vec![Some(0.0); 4]);
}

#[test]
fn test_standardize_zero_mean_unit_std() {
    let mut df = df! {
        "availability 365" => [10.0f64, 200.0, 340.0, 90.0, 12.0],
    }
    .unwrap();

    standardize(&mut df, &names(&["availability 365"])).unwrap();

    let values: Vec<f64> = common::floats(&df, "availability 365")
        .into_iter()
        .flatten()
        .collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    assert!(mean.abs() < 1e-9, "mean should be ~0, got {}", mean);
    assert!((var.sqrt() - 1.0).abs() < 1e-9, "std should be ~1, got {}", var.sqrt());
}

// ============================================================================
// Distribution shape
// ============================================================================

#[test]
fn test_distribution_shapes_flags_heavy_tail() {
    let df = df! {
        "symmetric" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        "tailed" => [1.0f64, 1.0, 1.0, 1.0, 1.0, 50.0],
    }
    .unwrap();

    let shapes =
        distribution_shapes(&df, &names(&["symmetric", "tailed", "absent"])).unwrap();

    assert_eq!(shapes.len(), 2, "absent columns are skipped");
    assert!((shapes[0].skewness.unwrap()).abs() < 1e-9);
    assert!((shapes[0].kurtosis.unwrap() + 1.2).abs() < 1e-9);
    assert!(!shapes[0].is_skewed());
    assert!(shapes[1].is_skewed());
}
